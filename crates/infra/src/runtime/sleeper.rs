//! Tokio-backed implementation of the runner's `Sleeper` port

use std::time::Duration;

use async_trait::async_trait;
use suitegate_core::Sleeper;

/// Waits on the Tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
