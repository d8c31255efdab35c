//! In-memory port implementations

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use suitegate_core::{CredentialStore, Sleeper};
use suitegate_domain::{ClientName, Result as DomainResult, SuiteError};

/// Credential store backed by a fixed set of client names.
///
/// Counts probes so tests can assert the store was (or was not) consulted.
#[derive(Default)]
pub struct MockCredentialStore {
    known: HashSet<String>,
    probes: Mutex<Vec<String>>,
}

impl MockCredentialStore {
    pub fn new<I, S>(known: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { known: known.into_iter().map(Into::into).collect(), probes: Mutex::new(Vec::new()) }
    }

    /// Client names the resolver asked about, in order
    pub fn probes(&self) -> Vec<String> {
        self.probes.lock().expect("probe log poisoned").clone()
    }
}

#[async_trait]
impl CredentialStore for MockCredentialStore {
    async fn exists(&self, client: &ClientName) -> DomainResult<bool> {
        self.probes.lock().expect("probe log poisoned").push(client.to_string());
        Ok(self.known.contains(client.as_str()))
    }
}

/// Credential store whose backing storage is broken
#[derive(Default)]
pub struct FailingCredentialStore {
    pub calls: AtomicUsize,
}

#[async_trait]
impl CredentialStore for FailingCredentialStore {
    async fn exists(&self, _client: &ClientName) -> DomainResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SuiteError::Credentials("permission denied".to_string()))
    }
}

/// Sleeper that returns immediately and remembers what it was asked for
#[derive(Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().expect("delay log poisoned").clone()
    }

    pub fn delays_ms(&self) -> Vec<u128> {
        self.delays().iter().map(Duration::as_millis).collect()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().expect("delay log poisoned").push(duration);
    }
}
