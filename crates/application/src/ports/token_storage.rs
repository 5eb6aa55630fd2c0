//! Durable token storage port.

use async_trait::async_trait;
use laced_domain::AccessToken;
use thiserror::Error;

/// Errors from the durable token slot.
#[derive(Debug, Error)]
pub enum TokenStorageError {
    /// Reading or writing the backing store failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored record could not be (de)serialized.
    #[error("storage serialization error: {0}")]
    Serialization(String),
}

/// Port for the single durable token slot.
///
/// The slot survives process restarts and holds at most one token; the
/// value is opaque and never parsed. Implementations must make `clear`
/// idempotent.
#[async_trait]
pub trait TokenStorage: Send + Sync {
    /// Loads the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store exists but cannot be read.
    async fn load(&self) -> Result<Option<AccessToken>, TokenStorageError>;

    /// Replaces the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be written.
    async fn save(&self, token: &AccessToken) -> Result<(), TokenStorageError>;

    /// Removes the stored token. Removing an absent token is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be modified.
    async fn clear(&self) -> Result<(), TokenStorageError>;
}
