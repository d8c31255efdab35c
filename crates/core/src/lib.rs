//! # Suitegate Core
//!
//! Request-shaping logic shared by every service command. No I/O.
//!
//! This crate contains:
//! - Failure classification into the closed `ApiError` taxonomy
//! - Credential client resolution
//! - Output projection
//! - The retry loop with per-endpoint-group circuit breakers
//!
//! ## Architecture Principles
//! - Only depends on `suitegate-common` and `suitegate-domain`
//! - Credential lookup and sleeping go through ports (traits)
//! - Everything else is pure and testable without a runtime clock

pub mod classification;
pub mod execution;
pub mod output;
pub mod tenancy;

pub use classification::ErrorClassifier;
pub use execution::{BreakerRegistry, RequestRunner, Sleeper};
pub use output::OutputProjector;
pub use tenancy::{ClientResolver, CredentialStore};
