//! Ports used by the request runner

use std::time::Duration;

use async_trait::async_trait;

/// Port for waiting between attempts.
///
/// The runner never sleeps on its own; production wiring supplies a Tokio
/// timer and tests record the requested delays instead of waiting.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
