//! Persisted document shapes for client-side durable storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::AccessToken;

/// Schema version written into the token record.
pub const TOKEN_SCHEMA_VERSION: u32 = 1;

/// The durable form of the session token.
///
/// The token value itself is opaque and never parsed; the envelope exists
/// so the stored file is self-describing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedToken {
    /// Format version of this record.
    pub schema_version: u32,
    /// The stored access token.
    pub access_token: AccessToken,
    /// When the token was written.
    pub saved_at: DateTime<Utc>,
}

impl PersistedToken {
    /// Wraps a token for storage, stamped with the current time.
    #[must_use]
    pub fn new(access_token: AccessToken) -> Self {
        Self {
            schema_version: TOKEN_SCHEMA_VERSION,
            access_token,
            saved_at: Utc::now(),
        }
    }

    /// Unwraps the stored token.
    #[must_use]
    pub fn into_token(self) -> AccessToken {
        self.access_token
    }
}
