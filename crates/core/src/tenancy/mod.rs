//! Credential client resolution

pub mod ports;
pub mod resolver;

pub use ports::CredentialStore;
pub use resolver::ClientResolver;
