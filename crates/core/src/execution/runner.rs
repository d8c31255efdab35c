//! Retry loop around a single remote operation
//!
//! Per attempt:
//! 1. Fail fast with `CircuitOpen` if the group's breaker is open
//! 2. Invoke the operation
//! 3. On a retry-eligible failure with budget left, compute the backoff
//!    (Retry-After wins), sleep through the [`Sleeper`] port and go again
//! 4. Otherwise report the outcome to the breaker and classify the failure
//!
//! Rate-limit (429) and server (5xx) failures draw from separate budgets.
//! Failures without a status are never retried.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use suitegate_common::resilience::{
    backoff_delay, backoff_delay_at, is_retryable_status, BreakerConfig, Clock, ConfigResult,
    SystemClock,
};
use suitegate_domain::{
    ApiError, CircuitBreakerSettings, ClassifiedError, FailureHint, RemoteFailure, RetryConfig,
};
use tracing::{debug, instrument, warn};

use super::ports::Sleeper;
use super::registry::BreakerRegistry;
use crate::classification::ErrorClassifier;

type JitterSource = Arc<dyn Fn() -> f64 + Send + Sync>;

/// Runs remote operations under retry budgets and per-group breakers
pub struct RequestRunner<C: Clock + Clone = SystemClock> {
    breakers: Arc<BreakerRegistry<C>>,
    sleeper: Arc<dyn Sleeper>,
    retry: RetryConfig,
    classifier: ErrorClassifier,
    jitter: Option<JitterSource>,
}

impl RequestRunner<SystemClock> {
    /// Build a runner with its own wall-clock breaker registry
    pub fn from_settings(
        retry: RetryConfig,
        breaker: &CircuitBreakerSettings,
        sleeper: Arc<dyn Sleeper>,
    ) -> ConfigResult<Self> {
        let config = BreakerConfig::new(breaker.failure_threshold, breaker.reset_window())?;
        let breakers = Arc::new(BreakerRegistry::new(config)?);
        Ok(Self::new(breakers, sleeper, retry))
    }
}

impl<C: Clock + Clone> RequestRunner<C> {
    /// Runner over an existing registry and sleeper
    pub fn new(
        breakers: Arc<BreakerRegistry<C>>,
        sleeper: Arc<dyn Sleeper>,
        retry: RetryConfig,
    ) -> Self {
        Self { breakers, sleeper, retry, classifier: ErrorClassifier::new(), jitter: None }
    }

    /// Replace the thread-local RNG used for backoff jitter
    pub fn with_jitter_source(mut self, source: impl Fn() -> f64 + Send + Sync + 'static) -> Self {
        self.jitter = Some(Arc::new(source));
        self
    }

    /// Breakers consulted before each call
    pub fn breakers(&self) -> &Arc<BreakerRegistry<C>> {
        &self.breakers
    }

    /// Run `call` for endpoint group `group` with no caller hint.
    pub async fn run<T, F, Fut>(&self, group: &str, call: F) -> Result<T, ClassifiedError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RemoteFailure>>,
    {
        self.run_with_hint(group, |_| None, call).await
    }

    /// Run `call`; `hint` may attach call-site meaning to a terminal failure.
    ///
    /// # Errors
    /// `CircuitOpen` if the group's breaker is open before an attempt,
    /// otherwise the classification of the last failure.
    #[instrument(skip_all, fields(group = %group))]
    pub async fn run_with_hint<T, F, Fut, H>(
        &self,
        group: &str,
        hint: H,
        mut call: F,
    ) -> Result<T, ClassifiedError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RemoteFailure>>,
        H: Fn(&RemoteFailure) -> Option<FailureHint>,
    {
        let mut rate_limit_retries = 0u32;
        let mut server_retries = 0u32;

        loop {
            if self.breakers.is_open(group) {
                debug!("Circuit open, not attempting call");
                return Err(ClassifiedError::bare(ApiError::CircuitOpen));
            }

            let failure = match call().await {
                Ok(value) => {
                    self.breakers.record_success(group);
                    return Ok(value);
                }
                Err(failure) => failure,
            };

            let budget_left = match failure.status {
                Some(429) => rate_limit_retries < self.retry.max_rate_limit_retries,
                Some(status) if status >= 500 => {
                    server_retries < self.retry.max_server_error_retries
                }
                _ => false,
            };

            if budget_left {
                let attempt = rate_limit_retries + server_retries;
                let delay_ms = self.delay_ms(attempt, failure.retry_after());
                if failure.status == Some(429) {
                    rate_limit_retries += 1;
                } else {
                    server_retries += 1;
                }
                debug!(
                    status = ?failure.status,
                    attempt,
                    delay_ms,
                    "Retrying remote call after backoff"
                );
                self.sleeper.sleep(Duration::from_millis(delay_ms)).await;
                continue;
            }

            let counts_against_breaker = failure.status.map_or(true, is_retryable_status);
            if counts_against_breaker && self.breakers.record_failure(group) {
                warn!(service = %failure.service, "Endpoint group tripped its circuit breaker");
            }

            let call_hint = hint(&failure);
            return Err(self.classifier.classify(failure, call_hint, rate_limit_retries));
        }
    }

    fn delay_ms(&self, attempt: u32, retry_after: Option<&str>) -> u64 {
        let base = self.retry.base_delay_ms;
        match &self.jitter {
            Some(source) => backoff_delay_at(Utc::now(), attempt, retry_after, base, || source()),
            None => backoff_delay(attempt, retry_after, base),
        }
    }
}
