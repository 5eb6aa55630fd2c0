//! File-based durable token slot.
//!
//! The token is stored as a small JSON record under the user's local data
//! directory (or any path the caller chooses). The value is opaque; the
//! envelope only adds a schema version and a timestamp.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use laced_application::{TokenStorage, TokenStorageError};
use laced_domain::{AccessToken, PersistedToken};

/// Durable token slot backed by one JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    /// Creates a slot at the given file path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The conventional slot location under the user's local data
    /// directory, when one exists.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("laced").join("session.json"))
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStorage for FileTokenStorage {
    async fn load(&self) -> Result<Option<AccessToken>, TokenStorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let record: PersistedToken = serde_json::from_slice(&bytes)
            .map_err(|e| TokenStorageError::Serialization(e.to_string()))?;
        Ok(Some(record.into_token()))
    }

    async fn save(&self, token: &AccessToken) -> Result<(), TokenStorageError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let record = PersistedToken::new(token.clone());
        let bytes = serde_json::to_vec_pretty(&record)
            .map_err(|e| TokenStorageError::Serialization(e.to_string()))?;
        tokio::fs::write(&self.path, &bytes).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStorageError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
