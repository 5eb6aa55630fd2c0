//! Authentication types: credentials, the opaque access token, and the
//! identity-service wire format.
//!
//! The access token is treated as an opaque bearer string; nothing in this
//! client parses or validates its content. Presence implies authorized.

use serde::{Deserialize, Serialize};

/// Opaque bearer token returned by the identity service.
///
/// At most one token exists per session; it is owned by the token store and
/// attached to outgoing calls for exactly the lifetime of one request.
/// `Debug` output is redacted to a short preview so tokens never end up in
/// logs verbatim.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token value for attaching to a request.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a short preview of the token (first 8 chars + ...).
    #[must_use]
    pub fn preview(&self) -> String {
        if self.0.len() > 12 {
            format!("{}...", &self.0[..8])
        } else {
            self.0.clone()
        }
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessToken({})", self.preview())
    }
}

/// Login form data.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email address.
    pub email: String,
    /// Account password, sent only over the login call.
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration form data.
#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterDetails {
    /// Display name for the new account.
    pub name: String,
    /// Account email address.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl std::fmt::Debug for RegisterDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterDetails")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful response body of the login, register and refresh endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// The fresh access token.
    pub access_token: AccessToken,
}
