//! Ports used by client resolution
//!
//! # Example
//!
//! ```no_run
//! use suitegate_core::CredentialStore;
//! use suitegate_domain::ClientName;
//!
//! async fn has_work_client(store: &impl CredentialStore) -> bool {
//!     let client = ClientName::parse("work").unwrap();
//!     store.exists(&client).await.unwrap_or(false)
//! }
//! ```

use async_trait::async_trait;
use suitegate_domain::{ClientName, Result};

/// Port answering "is there a credential set stored under this client?"
///
/// Implementations must return `Ok(false)` when the credentials simply do
/// not exist. Errors are reserved for infrastructure failures (unreadable
/// directory, permission problems) and are propagated to the caller.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn exists(&self, client: &ClientName) -> Result<bool>;
}
