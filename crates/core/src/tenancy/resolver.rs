//! Client resolution service
//!
//! Picks the credential client for an account. First match wins:
//!
//! 1. Explicit override
//! 2. Per-account mapping
//! 3. Per-domain mapping
//! 4. A stored credential set named after the email domain
//! 5. The default client
//!
//! The credential store is only consulted in step 4.

use std::sync::Arc;

use suitegate_domain::{email_domain, normalize_email, ClientName, Result, TenantResolutionInput};
use tracing::debug;

use super::ports::CredentialStore;

/// Resolves which credential client serves an account
pub struct ClientResolver {
    store: Arc<dyn CredentialStore>,
}

impl ClientResolver {
    /// Resolver probing `store` for domain-named credentials
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Resolve the client for `input`.
    ///
    /// # Errors
    /// Returns `SuiteError::InvalidClientName` when the chosen name fails
    /// normalisation, or whatever the credential store propagates.
    pub async fn resolve(&self, input: TenantResolutionInput<'_>) -> Result<ClientName> {
        if !input.override_client.trim().is_empty() {
            debug!(client = input.override_client, "Client resolved from override");
            return ClientName::parse(input.override_client);
        }

        let email = normalize_email(input.account_email);
        if !email.is_empty() {
            if let Some(mapped) = non_blank(input.account_clients.get(&email)) {
                debug!(account = %email, client = mapped, "Client resolved from account mapping");
                return ClientName::parse(mapped);
            }
        }

        let domain = email_domain(&email);
        if let Some(mapped) = non_blank(input.domain_clients.get(domain)) {
            debug!(domain, client = mapped, "Client resolved from domain mapping");
            return ClientName::parse(mapped);
        }

        if !domain.is_empty() {
            let candidate = ClientName::parse(domain)?;
            if self.store.exists(&candidate).await? {
                debug!(client = %candidate, "Client resolved from stored domain credentials");
                return Ok(candidate);
            }
        }

        debug!(account = %email, "No client mapping matched, using default client");
        Ok(ClientName::default_client())
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}
