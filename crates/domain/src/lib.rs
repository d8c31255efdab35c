//! # Suitegate Domain
//!
//! Domain types for the resilience and request-shaping layer.
//!
//! This crate contains:
//! - Credential client and domain names with their normalisation rules
//! - Tenant resolution input and output-projection specs
//! - The remote failure description and the closed API error taxonomy
//! - Configuration structures, constants and the top-level error type
//!
//! ## Architecture
//! - Only depends on the foundation tier of `suitegate-common`
//! - No I/O, no async, no logging

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
