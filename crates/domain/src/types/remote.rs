//! Description of a failed remote call
//!
//! Service adapters translate their transport errors into a
//! [`RemoteFailure`]; everything downstream (classification, retry
//! eligibility, breaker accounting) works from this value alone.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A remote operation failure with whatever the transport could tell us
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct RemoteFailure {
    /// Logical service name (e.g. "drive", "gmail")
    pub service: String,
    /// HTTP status, absent for transport-level failures
    pub status: Option<u16>,
    /// Response headers, keys lowercased
    pub headers: BTreeMap<String, String>,
    /// Human-readable failure text
    pub message: String,
    /// Structured error body, if the remote side sent one
    pub detail: Option<Value>,
}

impl RemoteFailure {
    /// Transport-level failure with no status
    pub fn new(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            status: None,
            headers: BTreeMap::new(),
            message: message.into(),
            detail: None,
        }
    }

    /// Attach the HTTP status
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach a response header; the name is lowercased
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Attach the structured error body
    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Raw `Retry-After` header value
    pub fn retry_after(&self) -> Option<&str> {
        self.header("retry-after")
    }

    /// Reason codes from a structured error body.
    ///
    /// Understands both `{"error": {"errors": [{"reason": ..}]}}` and
    /// `{"error": {"details": [{"reason": ..}]}}` shapes, plus a top-level
    /// `reason` string.
    pub fn reasons(&self) -> Vec<&str> {
        let Some(detail) = &self.detail else {
            return Vec::new();
        };
        let body = detail.get("error").unwrap_or(detail);

        let mut reasons: Vec<&str> = ["errors", "details"]
            .iter()
            .filter_map(|key| body.get(*key).and_then(Value::as_array))
            .flatten()
            .filter_map(|entry| entry.get("reason").and_then(Value::as_str))
            .collect();
        if let Some(reason) = body.get("reason").and_then(Value::as_str) {
            reasons.push(reason);
        }
        reasons
    }
}

/// Caller-supplied semantic context for a failure.
///
/// Call sites usually know more than the status code does ("this 404 means
/// the file is missing"); a hint always takes precedence over inference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureHint {
    AuthRequired { account: String, client: String },
    NotFound { resource: String, id: String },
    PermissionDenied { resource: String, action: String },
    QuotaExceeded { resource: String },
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_headers_are_case_insensitive() {
        let failure = RemoteFailure::new("drive", "slow down").with_header("Retry-After", "7");
        assert_eq!(failure.retry_after(), Some("7"));
        assert_eq!(failure.header("RETRY-AFTER"), Some("7"));
    }

    #[test]
    fn test_reasons_from_errors_array() {
        let failure = RemoteFailure::new("gmail", "quota").with_detail(json!({
            "error": {"code": 403, "errors": [{"reason": "dailyLimitExceeded"}]}
        }));
        assert_eq!(failure.reasons(), vec!["dailyLimitExceeded"]);
    }

    #[test]
    fn test_reasons_from_details_and_top_level() {
        let failure = RemoteFailure::new("calendar", "x").with_detail(json!({
            "details": [{"reason": "rateLimitExceeded"}],
            "reason": "backendError"
        }));
        assert_eq!(failure.reasons(), vec!["rateLimitExceeded", "backendError"]);
    }

    #[test]
    fn test_reasons_without_detail() {
        assert!(RemoteFailure::new("docs", "boom").reasons().is_empty());
    }
}
