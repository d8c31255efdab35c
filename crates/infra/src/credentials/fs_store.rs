//! Filesystem credential store
//!
//! Credential files live side by side in one directory:
//! - `credentials.json` for the default client
//! - `credentials-{client}.json` for every other client
//!
//! Only existence is checked here; reading and refreshing tokens is the
//! job of the auth layer.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use suitegate_core::CredentialStore;
use suitegate_domain::{ClientName, Result, SuiteError};
use tracing::debug;

/// Credential store backed by a directory of JSON files
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    directory: PathBuf,
}

impl FileCredentialStore {
    /// Store rooted at `directory`; nothing is read until queried
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self { directory: directory.into() }
    }

    /// Directory searched for credential files
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the credential file for `client`
    pub fn path_for(&self, client: &ClientName) -> PathBuf {
        if client.is_default() {
            self.directory.join("credentials.json")
        } else {
            self.directory.join(format!("credentials-{}.json", client))
        }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn exists(&self, client: &ClientName) -> Result<bool> {
        let path = self.path_for(client);
        match tokio::fs::metadata(&path).await {
            Ok(meta) => {
                debug!(path = %path.display(), is_file = meta.is_file(), "Probed credential file");
                Ok(meta.is_file())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SuiteError::Credentials(format!(
                "cannot inspect {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
