//! Inputs to credential client resolution

use std::collections::BTreeMap;

/// Everything the client resolver looks at, borrowed from the caller.
///
/// Map keys are expected to be normalised already (emails lowercased,
/// domains without a leading `@`); the resolver only performs lookups.
#[derive(Debug, Clone, Copy)]
pub struct TenantResolutionInput<'a> {
    /// Explicit client requested by the caller; blank means "not set"
    pub override_client: &'a str,
    /// Account being resolved, as given
    pub account_email: &'a str,
    /// email -> client
    pub account_clients: &'a BTreeMap<String, String>,
    /// domain -> client
    pub domain_clients: &'a BTreeMap<String, String>,
}

impl<'a> TenantResolutionInput<'a> {
    /// Input with no override
    pub fn new(
        account_email: &'a str,
        account_clients: &'a BTreeMap<String, String>,
        domain_clients: &'a BTreeMap<String, String>,
    ) -> Self {
        Self { override_client: "", account_email, account_clients, domain_clients }
    }

    /// Set an explicit client; blank is ignored by the resolver
    pub fn with_override(mut self, override_client: &'a str) -> Self {
        self.override_client = override_client;
        self
    }
}
