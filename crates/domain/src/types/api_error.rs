//! Closed taxonomy of remote-call failures
//!
//! Every failure that leaves the request layer is exactly one [`ApiError`]
//! variant. Callers match on the variant; the `Display` output is the
//! user-facing message and is kept stable.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use suitegate_common::error::{ErrorClassification, ErrorSeverity};
use thiserror::Error;

use super::remote::RemoteFailure;

/// Closed set of user-facing API failures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApiError {
    /// The account has no usable token for this client
    AuthRequired { service: String, account: String, client: String },

    /// Throttled; `retries` is how many retries were spent before giving up
    RateLimit { retries: u32, retry_after_ms: Option<u64> },

    /// The breaker for this endpoint group is open; nothing was sent
    CircuitOpen,

    /// A usage quota on `resource` is exhausted
    QuotaExceeded { resource: String },

    /// The addressed item does not exist
    NotFound { resource: String, id: String },

    /// The caller may not perform `action`
    PermissionDenied { resource: String, action: String },

    /// Anything the classifier could not place
    Unclassified { service: String, message: String },
}

impl ApiError {
    /// Stable snake_case discriminant for logs and JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AuthRequired { .. } => "auth_required",
            Self::RateLimit { .. } => "rate_limit",
            Self::CircuitOpen => "circuit_open",
            Self::QuotaExceeded { .. } => "quota_exceeded",
            Self::NotFound { .. } => "not_found",
            Self::PermissionDenied { .. } => "permission_denied",
            Self::Unclassified { .. } => "unclassified",
        }
    }

    /// Shorthand for [`ApiError::Unclassified`]
    pub fn unclassified(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unclassified { service: service.into(), message: message.into() }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuthRequired { service, account, client } => {
                if client.is_empty() {
                    write!(f, "auth required for {service} {account}")
                } else {
                    write!(f, "auth required for {service} {account} (client {client})")
                }
            }
            Self::RateLimit { retries, retry_after_ms } => match retry_after_ms {
                Some(ms) => write!(
                    f,
                    "rate limit exceeded, retry after {ms}ms (attempted {retries} retries)"
                ),
                None => write!(f, "rate limit exceeded after {retries} retries"),
            },
            Self::CircuitOpen => {
                write!(f, "circuit breaker is open, too many recent failures - try again later")
            }
            Self::QuotaExceeded { resource } => write!(f, "quota exceeded for {resource}"),
            Self::NotFound { resource, id } => {
                if id.is_empty() {
                    write!(f, "{resource} not found")
                } else {
                    write!(f, "{resource} not found: {id}")
                }
            }
            Self::PermissionDenied { resource, action } => {
                write!(f, "permission denied: cannot {action} {resource}")
            }
            Self::Unclassified { service, message } => {
                write!(f, "{service} api request failed: {message}")
            }
        }
    }
}

impl ErrorClassification for ApiError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimit { .. } | Self::CircuitOpen)
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound { .. } => ErrorSeverity::Info,
            Self::RateLimit { .. } | Self::CircuitOpen | Self::QuotaExceeded { .. } => {
                ErrorSeverity::Warning
            }
            Self::AuthRequired { .. }
            | Self::PermissionDenied { .. }
            | Self::Unclassified { .. } => ErrorSeverity::Error,
        }
    }

    fn is_critical(&self) -> bool {
        false
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimit { retry_after_ms: Some(ms), .. } => Some(Duration::from_millis(*ms)),
            _ => None,
        }
    }
}

/// An [`ApiError`] together with the failure it was derived from
#[derive(Debug, Clone, Error)]
#[error("{error}")]
pub struct ClassifiedError {
    /// The classification
    pub error: ApiError,
    /// Failure the classification was derived from
    #[source]
    pub cause: Option<RemoteFailure>,
}

impl ClassifiedError {
    /// Classification that keeps its cause
    pub fn new(error: ApiError, cause: RemoteFailure) -> Self {
        Self { error, cause: Some(cause) }
    }

    /// A classification with no underlying remote failure (e.g. open circuit)
    pub fn bare(error: ApiError) -> Self {
        Self { error, cause: None }
    }
}
