//! Credential client names and email domains

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CLIENT_NAME;
use crate::errors::{Result, SuiteError};

static NAME_CHARSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9._-]+$").expect("NAME_CHARSET pattern is valid and well-formed")
});

/// Normalised name of a credential set ("client").
///
/// Lowercase ASCII letters, digits, `-`, `_` and `.` only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientName(String);

impl ClientName {
    /// Normalise and validate a client name. Empty input is rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        let name = raw.trim().to_lowercase();
        if name.is_empty() {
            return Err(SuiteError::invalid_client(raw, "name is empty"));
        }
        if !NAME_CHARSET.is_match(&name) {
            return Err(SuiteError::invalid_client(
                raw,
                "only lowercase letters, digits, '-', '_' and '.' are allowed",
            ));
        }
        Ok(Self(name))
    }

    /// Like [`ClientName::parse`], but blank input yields the default client.
    pub fn parse_or_default(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default_client());
        }
        Self::parse(raw)
    }

    /// The fallback client
    pub fn default_client() -> Self {
        Self(DEFAULT_CLIENT_NAME.to_string())
    }

    /// Whether this is the fallback client
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_CLIENT_NAME
    }

    /// Normalised name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the normalised name
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for ClientName {
    fn default() -> Self {
        Self::default_client()
    }
}

impl fmt::Display for ClientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClientName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ClientName {
    type Error = SuiteError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ClientName> for String {
    fn from(value: ClientName) -> Self {
        value.0
    }
}

/// Normalised email domain used as a tenant-mapping key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DomainName(String);

impl DomainName {
    /// Lowercase, strip one leading `@`, require a `.` and the client charset.
    pub fn parse(raw: &str) -> Result<Self> {
        let lowered = raw.trim().to_lowercase();
        let domain = lowered.strip_prefix('@').unwrap_or(&lowered);
        if domain.is_empty() {
            return Err(SuiteError::invalid_domain(raw, "domain is empty"));
        }
        if !domain.contains('.') {
            return Err(SuiteError::invalid_domain(raw, "domain must contain a '.'"));
        }
        if !NAME_CHARSET.is_match(domain) {
            return Err(SuiteError::invalid_domain(
                raw,
                "only lowercase letters, digits, '-', '_' and '.' are allowed",
            ));
        }
        Ok(Self(domain.to_string()))
    }

    /// Normalised domain
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed, lowercased account email
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Portion of `email` after the `@`; empty unless there is exactly one `@`.
pub fn email_domain(email: &str) -> &str {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(domain), None) => domain,
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_name_is_lowercased_and_trimmed() {
        let name = ClientName::parse("  Prod-Workspace_1.eu ").unwrap();
        assert_eq!(name.as_str(), "prod-workspace_1.eu");
    }

    #[test]
    fn test_client_name_rejects_bad_characters() {
        for raw in ["has space", "slash/y", "émoji", "a@b"] {
            let err = ClientName::parse(raw).unwrap_err();
            assert!(matches!(err, SuiteError::InvalidClientName { .. }), "{raw} accepted");
        }
    }

    #[test]
    fn test_client_name_empty() {
        assert!(ClientName::parse("   ").is_err());
        assert!(ClientName::parse_or_default("   ").unwrap().is_default());
        assert_eq!(ClientName::parse_or_default("Work").unwrap().as_str(), "work");
    }

    #[test]
    fn test_client_name_deserialize_validates() {
        let ok: ClientName = serde_json::from_str("\"Team\"").unwrap();
        assert_eq!(ok.as_str(), "team");
        assert!(serde_json::from_str::<ClientName>("\"bad name\"").is_err());
    }

    #[test]
    fn test_domain_name_rules() {
        assert_eq!(DomainName::parse("@Example.COM").unwrap().as_str(), "example.com");
        assert!(matches!(
            DomainName::parse("localhost").unwrap_err(),
            SuiteError::InvalidDomain { .. }
        ));
        assert!(DomainName::parse("@").is_err());
        assert!(DomainName::parse("exa mple.com").is_err());
    }

    #[test]
    fn test_email_domain() {
        assert_eq!(email_domain("a@b.com"), "b.com");
        assert_eq!(email_domain("no-at-sign"), "");
        assert_eq!(email_domain("a@b@c.com"), "");
        assert_eq!(email_domain("a@"), "");
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Alice@Example.com "), "alice@example.com");
    }
}
