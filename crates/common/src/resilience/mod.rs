//! Resilience patterns for fault tolerance
//!
//! This module provides **generic, reusable** resilience primitives:
//! - **Circuit Breaker**: stops calling a failing endpoint group after a run
//!   of consecutive failures and re-allows calls after a cooldown window
//! - **Backoff**: exponential delay with jitter that honours server-supplied
//!   Retry-After hints
//!
//! Nothing in here performs I/O or sleeps. Callers own the retry loop and the
//! actual waiting; these types only make decisions.
//!
//! ## Determinism
//!
//! Every time-dependent decision has an injectable source of "now":
//! the breaker takes a [`Clock`] (use [`MockClock`] in tests) and the backoff
//! calculator has an `_at` variant that accepts the current instant plus a
//! caller-supplied random source.

pub mod backoff;
pub mod circuit_breaker;

// Re-export backoff helpers
pub use backoff::{backoff_delay, backoff_delay_at, is_retryable_status, parse_retry_after};
// Re-export circuit breaker types
pub use circuit_breaker::{
    transition, BreakerConfig, BreakerEvent, BreakerSnapshot, BreakerState, CircuitBreaker,
    CircuitStatus, Clock, ConfigError, ConfigResult, FnClock, MockClock, SystemClock, Transition,
};
