//! Application error types.
//!
//! The taxonomy separates failures by what they mean for the session:
//! transport and validation failures are local to the failing call and
//! never touch session state; only an authorization failure drives the
//! refresh protocol, and a rejected refresh always ends the session.

use laced_domain::DomainError;
use thiserror::Error;

use crate::ports::TransportError;

/// Fallback message when the identity service rejects a login or
/// registration without a usable message of its own.
pub const GENERIC_AUTH_FAILURE: &str = "authorization failed";

/// Errors from the identity gateway (login, register, refresh, logout).
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server rejected the credentials or registration details.
    ///
    /// Carries the server-supplied message when present, else
    /// [`GENERIC_AUTH_FAILURE`]. Surfaced verbatim to the UI; no session
    /// state changes.
    #[error("{message}")]
    Rejected {
        /// Server-supplied or fallback message.
        message: String,
    },

    /// The refresh endpoint rejected the session or timed out.
    ///
    /// Terminal: the session cannot be recovered without a fresh login.
    #[error("session unrecoverable")]
    RefreshRejected,

    /// The network round trip itself failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The outgoing request could not be built.
    #[error("domain error: {0}")]
    Invalid(#[from] DomainError),
}

/// Errors from authorized API calls after the retry protocol has run.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The network round trip failed; not retried automatically.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The call was rejected as unauthorized and no (further) refresh is
    /// possible: either no session exists, or a freshly refreshed token
    /// was rejected again.
    #[error("not authorized")]
    Unauthorized,

    /// The in-flight refresh failed; the session has ended and the token
    /// slot is empty.
    #[error("session expired, please log in again")]
    SessionExpired,

    /// The server answered with a non-success status other than 401.
    #[error("request failed with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-supplied or fallback message.
        message: String,
    },

    /// A request body or response body could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The request failed domain validation before going out.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
}
