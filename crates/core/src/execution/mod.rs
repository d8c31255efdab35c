//! Guarded execution of remote calls
//!
//! [`RequestRunner`] drives the retry loop: breaker check, call, classify,
//! back off, report the outcome to the endpoint group's breaker.

pub mod ports;
pub mod registry;
pub mod runner;

pub use ports::Sleeper;
pub use registry::BreakerRegistry;
pub use runner::RequestRunner;
