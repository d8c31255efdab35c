//! Configuration management

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_DELAY_MS, DEFAULT_BREAKER_RESET_MS, DEFAULT_BREAKER_THRESHOLD,
    DEFAULT_MAX_RATE_LIMIT_RETRIES, DEFAULT_MAX_SERVER_ERROR_RETRIES,
};
use crate::errors::{Result, SuiteError};
use crate::types::{normalize_email, ClientName, DomainName, TenantResolutionInput};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Account to client routing
    pub tenancy: TenancyConfig,
    /// Retry budgets and backoff base
    pub retry: RetryConfig,
    /// Per-group breaker thresholds
    pub circuit_breaker: CircuitBreakerSettings,
    /// Credential file location
    pub credentials: CredentialsConfig,
    /// Log filter and format
    pub logging: LoggingConfig,
}

/// Which credential client serves which account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenancyConfig {
    /// Forces one client for every account
    pub client_override: Option<String>,
    /// email -> client
    pub account_clients: BTreeMap<String, String>,
    /// domain -> client
    pub domain_clients: BTreeMap<String, String>,
}

/// Retry budgets for the request runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries allowed for 429 responses
    pub max_rate_limit_retries: u32,
    /// Retries allowed for 5xx responses
    pub max_server_error_retries: u32,
    /// First backoff step; doubles per retry
    pub base_delay_ms: u64,
}

/// Breaker settings shared by every endpoint group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitBreakerSettings {
    /// Consecutive failures that open a circuit
    pub failure_threshold: u32,
    /// How long an open circuit stays open
    pub reset_window_ms: u64,
}

/// Where credential files live
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Directory holding `credentials*.json`; platform config dir when unset
    pub directory: Option<PathBuf>,
}

/// Tracing subscriber settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; overridden by `SUITEGATE_LOG` / `RUST_LOG`
    pub filter: Option<String>,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_rate_limit_retries: DEFAULT_MAX_RATE_LIMIT_RETRIES,
            max_server_error_retries: DEFAULT_MAX_SERVER_ERROR_RETRIES,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
        }
    }
}

impl Default for CircuitBreakerSettings {
    fn default() -> Self {
        Self {
            failure_threshold: DEFAULT_BREAKER_THRESHOLD,
            reset_window_ms: DEFAULT_BREAKER_RESET_MS,
        }
    }
}

impl CircuitBreakerSettings {
    /// Reset window as a `Duration`
    pub fn reset_window(&self) -> Duration {
        Duration::from_millis(self.reset_window_ms)
    }
}

impl TenancyConfig {
    /// Resolution input for `account_email`, honouring the configured override
    pub fn input_for<'a>(&'a self, account_email: &'a str) -> TenantResolutionInput<'a> {
        TenantResolutionInput::new(account_email, &self.account_clients, &self.domain_clients)
            .with_override(self.client_override.as_deref().unwrap_or(""))
    }
}

impl Config {
    /// Normalise mapping tables and check numeric bounds.
    ///
    /// Account keys are trimmed and lowercased, domain keys follow the
    /// domain rules, mapped client names follow the client rules.
    ///
    /// # Errors
    /// Returns `SuiteError::Config` describing the first offending entry.
    pub fn validate(mut self) -> Result<Self> {
        if self.circuit_breaker.failure_threshold == 0 {
            return Err(SuiteError::Config(
                "circuit_breaker.failure_threshold must be greater than zero".to_string(),
            ));
        }

        self.tenancy.client_override = match self.tenancy.client_override.take() {
            Some(raw) if !raw.trim().is_empty() => {
                Some(client_value("tenancy.client_override", &raw)?)
            }
            _ => None,
        };

        let mut accounts = BTreeMap::new();
        for (email, client) in std::mem::take(&mut self.tenancy.account_clients) {
            let key = normalize_email(&email);
            if key.is_empty() {
                return Err(SuiteError::Config(
                    "tenancy.account_clients contains an empty email".to_string(),
                ));
            }
            let value = client_value(&format!("tenancy.account_clients[{key}]"), &client)?;
            accounts.insert(key, value);
        }
        self.tenancy.account_clients = accounts;

        let mut domains = BTreeMap::new();
        for (domain, client) in std::mem::take(&mut self.tenancy.domain_clients) {
            let key = DomainName::parse(&domain)
                .map_err(|e| SuiteError::Config(format!("tenancy.domain_clients: {e}")))?;
            let value = client_value(&format!("tenancy.domain_clients[{key}]"), &client)?;
            domains.insert(key.as_str().to_string(), value);
        }
        self.tenancy.domain_clients = domains;

        Ok(self)
    }
}

fn client_value(field: &str, raw: &str) -> Result<String> {
    ClientName::parse(raw)
        .map(ClientName::into_string)
        .map_err(|e| SuiteError::Config(format!("{field}: {e}")))
}
