//! Single-slot token store with durable write-through.

use std::sync::Arc;

use laced_domain::AccessToken;
use tokio::sync::RwLock;
use tracing::warn;

use crate::ports::TokenStorage;

/// Holds the current access token for this process.
///
/// Exactly zero or one token exists at a time. The in-memory slot is
/// authoritative; every change is mirrored to durable storage so the
/// session survives a restart, but a storage failure does not fail the
/// operation.
pub struct TokenStore {
    slot: RwLock<Option<AccessToken>>,
    storage: Arc<dyn TokenStorage>,
}

impl TokenStore {
    /// Creates an empty store backed by the given durable slot.
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self {
            slot: RwLock::new(None),
            storage,
        }
    }

    /// Replaces the stored token unconditionally.
    pub async fn set(&self, token: AccessToken) {
        {
            let mut slot = self.slot.write().await;
            *slot = Some(token.clone());
        }
        if let Err(err) = self.storage.save(&token).await {
            warn!(error = %err, "failed to persist access token");
        }
    }

    /// Returns the current token, or `None` when absent. Never fails.
    pub async fn get(&self) -> Option<AccessToken> {
        self.slot.read().await.clone()
    }

    /// Removes the token from memory and durable storage. Idempotent.
    pub async fn clear(&self) {
        {
            let mut slot = self.slot.write().await;
            *slot = None;
        }
        if let Err(err) = self.storage.clear().await {
            warn!(error = %err, "failed to clear persisted access token");
        }
    }

    /// Pulls the durable token into the slot, if one was persisted.
    ///
    /// Returns true when a token was found. A corrupt or unreadable store
    /// is treated as absent.
    pub async fn load_persisted(&self) -> bool {
        match self.storage.load().await {
            Ok(Some(token)) => {
                let mut slot = self.slot.write().await;
                *slot = Some(token);
                true
            }
            Ok(None) => false,
            Err(err) => {
                warn!(error = %err, "failed to load persisted access token");
                false
            }
        }
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore").finish_non_exhaustive()
    }
}
