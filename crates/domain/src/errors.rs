//! Error types used throughout the workspace

use std::time::Duration;

use suitegate_common::error::{ErrorClassification, ErrorSeverity};
use thiserror::Error;

use crate::types::ClassifiedError;

/// Main error type for Suitegate
#[derive(Error, Debug)]
pub enum SuiteError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("invalid client name {name:?}: {reason}")]
    InvalidClientName { name: String, reason: String },

    #[error("invalid domain {domain:?}: {reason}")]
    InvalidDomain { domain: String, reason: String },

    #[error("invalid field path {path:?}: {reason}")]
    InvalidFieldPath { path: String, reason: String },

    #[error("Credential store error: {0}")]
    Credentials(String),

    #[error(transparent)]
    Api(#[from] ClassifiedError),
}

impl SuiteError {
    pub(crate) fn invalid_client(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidClientName { name: name.to_string(), reason: reason.into() }
    }

    pub(crate) fn invalid_domain(domain: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDomain { domain: domain.to_string(), reason: reason.into() }
    }

    pub(crate) fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFieldPath { path: path.to_string(), reason: reason.into() }
    }
}

impl ErrorClassification for SuiteError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Api(err) => err.error.is_retryable(),
            _ => false,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Api(err) => err.error.severity(),
            Self::Credentials(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    fn is_critical(&self) -> bool {
        matches!(self, Self::Credentials(_))
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Api(err) => err.error.retry_after(),
            _ => None,
        }
    }
}

/// Result type alias for Suitegate operations
pub type Result<T> = std::result::Result<T, SuiteError>;
