//! Shared test helpers for `suitegate-core` integration tests.
//!
//! Lightweight port mocks so the tests can focus on behaviour instead of
//! boilerplate.

#![allow(dead_code)]

pub mod mocks;

pub use mocks::{FailingCredentialStore, MockCredentialStore, RecordingSleeper};
