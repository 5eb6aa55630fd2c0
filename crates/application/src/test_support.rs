//! Shared doubles for unit tests.

use laced_domain::AccessToken;
use tokio::sync::RwLock;

use crate::ports::{TokenStorage, TokenStorageError};

/// In-memory durable slot for exercising the token store in isolation.
#[derive(Default)]
pub(crate) struct MemoryStorage {
    slot: RwLock<Option<AccessToken>>,
}

#[async_trait::async_trait]
impl TokenStorage for MemoryStorage {
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
