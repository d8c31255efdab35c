//! Shared, domain-free building blocks for the Suitegate crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: error classification trait and severity levels
//! - `runtime`: resilience primitives (clock, circuit breaker, backoff)
//! - `observability`: tracing for state transitions (pulled in by `runtime`)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod error;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod resilience;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "foundation")]
pub use error::{ErrorClassification, ErrorSeverity};
#[cfg(feature = "runtime")]
pub use resilience::{
    backoff_delay, backoff_delay_at, is_retryable_status, parse_retry_after, BreakerConfig,
    BreakerEvent, BreakerSnapshot, BreakerState, CircuitBreaker, CircuitStatus, Clock,
    ConfigError, ConfigResult, FnClock, MockClock, SystemClock, Transition,
};
