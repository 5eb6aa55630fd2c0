//! Volatile token slot.

use async_trait::async_trait;
use laced_application::{TokenStorage, TokenStorageError};
use laced_domain::AccessToken;
use tokio::sync::RwLock;

/// In-memory token slot for tests and sessions that should not outlive
/// the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    slot: RwLock<Option<AccessToken>>,
}

impl MemoryTokenStorage {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStorage for MemoryTokenStorage {
    async fn load(&self) -> Result<Option<AccessToken>, TokenStorageError> {
        Ok(self.slot.read().await.clone())
    }

    async fn save(&self, token: &AccessToken) -> Result<(), TokenStorageError> {
        *self.slot.write().await = Some(token.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStorageError> {
        *self.slot.write().await = None;
        Ok(())
    }
}
