//! Async runtime adapters

pub mod sleeper;

pub use sleeper::TokioSleeper;
