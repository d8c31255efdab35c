//! # Suitegate Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - Configuration loading (files, `.env`, environment overrides)
//! - The filesystem credential store
//! - The Tokio sleeper used between retries
//! - Tracing subscriber setup
//! - [`AppContext`], which wires everything together
//!
//! ## Architecture
//! - Implements traits defined in `suitegate-core`
//! - Contains all "impure" code (filesystem, environment, timers)

pub mod config;
pub mod context;
pub mod credentials;
pub mod observability;
pub mod runtime;

// Re-export commonly used items
pub use context::AppContext;
pub use credentials::FileCredentialStore;
pub use observability::init_logging;
pub use runtime::TokioSleeper;
