//! Failure classifier
//!
//! Turns a [`RemoteFailure`] into exactly one [`ApiError`]. Precedence:
//!
//! 1. A caller-supplied [`FailureHint`] always wins
//! 2. Reason codes in the structured error body (rate limit, quota)
//! 3. Status 429 is a rate limit
//! 4. Everything else is `Unclassified`
//!
//! The original failure is kept as the cause of the returned error.

use chrono::{DateTime, Utc};
use suitegate_common::resilience::{is_retryable_status, parse_retry_after};
use suitegate_domain::constants::{QUOTA_REASONS, RATE_LIMIT_REASONS};
use suitegate_domain::{ApiError, ClassifiedError, FailureHint, RemoteFailure};

/// Stateless failure classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Create a classifier
    pub fn new() -> Self {
        Self
    }

    /// Classify against the wall clock (only matters for date Retry-After hints)
    pub fn classify(
        &self,
        failure: RemoteFailure,
        hint: Option<FailureHint>,
        retries: u32,
    ) -> ClassifiedError {
        self.classify_at(Utc::now(), failure, hint, retries)
    }

    /// Classify `failure`; `retries` is how many retries were already spent.
    pub fn classify_at(
        &self,
        now: DateTime<Utc>,
        failure: RemoteFailure,
        hint: Option<FailureHint>,
        retries: u32,
    ) -> ClassifiedError {
        let error = match hint {
            Some(hint) => from_hint(&failure.service, hint),
            None => infer(now, &failure, retries),
        };
        ClassifiedError::new(error, failure)
    }

    /// Whether the failure is worth another attempt (429 or any 5xx)
    pub fn is_retryable(&self, failure: &RemoteFailure) -> bool {
        failure.status.is_some_and(is_retryable_status)
    }
}

fn from_hint(service: &str, hint: FailureHint) -> ApiError {
    match hint {
        FailureHint::AuthRequired { account, client } => {
            ApiError::AuthRequired { service: service.to_string(), account, client }
        }
        FailureHint::NotFound { resource, id } => ApiError::NotFound { resource, id },
        FailureHint::PermissionDenied { resource, action } => {
            ApiError::PermissionDenied { resource, action }
        }
        FailureHint::QuotaExceeded { resource } => ApiError::QuotaExceeded { resource },
    }
}

fn infer(now: DateTime<Utc>, failure: &RemoteFailure, retries: u32) -> ApiError {
    let reasons = failure.reasons();
    let has_reason = |known: &[&str]| reasons.iter().any(|reason| known.contains(reason));

    if has_reason(RATE_LIMIT_REASONS) || failure.status == Some(429) {
        let retry_after_ms = failure.retry_after().and_then(|hint| parse_retry_after(hint, now));
        return ApiError::RateLimit { retries, retry_after_ms };
    }
    if has_reason(QUOTA_REASONS) {
        return ApiError::QuotaExceeded { resource: failure.service.clone() };
    }
    ApiError::unclassified(failure.service.clone(), failure.message.clone())
}
