//! Application context
//!
//! Wires configuration, adapters and core services together once per
//! process. Service commands borrow what they need from here.

use std::path::PathBuf;
use std::sync::Arc;

use suitegate_core::{ClientResolver, OutputProjector, RequestRunner};
use suitegate_domain::{ClientName, Config, Result, SuiteError};
use tracing::info;

use crate::config::{self, default_config_dir};
use crate::credentials::FileCredentialStore;
use crate::observability::init_logging;
use crate::runtime::TokioSleeper;

/// Process-wide services built from one configuration
pub struct AppContext {
    config: Config,
    credentials: Arc<FileCredentialStore>,
    resolver: ClientResolver,
    runner: RequestRunner,
    projector: OutputProjector,
}

impl AppContext {
    /// Load configuration, install logging and build the context
    ///
    /// # Errors
    /// Returns `SuiteError::Config` if configuration cannot be loaded.
    pub fn bootstrap() -> Result<Self> {
        let config = config::load()?;
        init_logging(&config.logging);
        Self::new(config)
    }

    /// Build the context from an already validated configuration
    ///
    /// # Errors
    /// Returns `SuiteError::Config` if the breaker settings are invalid or
    /// no credentials directory can be determined.
    pub fn new(config: Config) -> Result<Self> {
        let directory = credentials_directory(&config)?;
        info!(
            credentials_dir = %directory.display(),
            failure_threshold = config.circuit_breaker.failure_threshold,
            "Initialising application context"
        );

        let credentials = Arc::new(FileCredentialStore::new(directory));
        let resolver = ClientResolver::new(credentials.clone());
        let runner = RequestRunner::from_settings(
            config.retry.clone(),
            &config.circuit_breaker,
            Arc::new(TokioSleeper),
        )
        .map_err(|e| SuiteError::Config(e.to_string()))?;

        Ok(Self { config, credentials, resolver, runner, projector: OutputProjector::new() })
    }

    /// Client for `account_email` under the configured override and mappings
    pub async fn resolve_client(&self, account_email: &str) -> Result<ClientName> {
        self.resolver.resolve(self.config.tenancy.input_for(account_email)).await
    }

    /// Like [`AppContext::resolve_client`] with a per-invocation override
    /// taking precedence over the configured one
    pub async fn resolve_client_with_override(
        &self,
        account_email: &str,
        override_client: &str,
    ) -> Result<ClientName> {
        let mut input = self.config.tenancy.input_for(account_email);
        if !override_client.trim().is_empty() {
            input = input.with_override(override_client);
        }
        self.resolver.resolve(input).await
    }

    /// Validated configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Credential store shared with the resolver
    pub fn credentials(&self) -> &FileCredentialStore {
        &self.credentials
    }

    /// Shared runner; breaker state persists across calls
    pub fn runner(&self) -> &RequestRunner {
        &self.runner
    }

    /// Output projector
    pub fn projector(&self) -> &OutputProjector {
        &self.projector
    }
}

fn credentials_directory(config: &Config) -> Result<PathBuf> {
    config.credentials.directory.clone().or_else(default_config_dir).ok_or_else(|| {
        SuiteError::Config(
            "credentials directory is not configured and no config directory was found"
                .to_string(),
        )
    })
}
