//! HTTP transport port.

use async_trait::async_trait;
use laced_domain::{ApiRequest, ApiResponse};
use thiserror::Error;

/// Errors raised by the transport itself, before any HTTP status exists.
///
/// Transport failures are surfaced to the caller immediately; the retry
/// coordinator never retries them and they never affect session state.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The round trip exceeded the configured timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// The host name could not be resolved.
    #[error("DNS resolution failed for {host}: {message}")]
    Dns {
        /// Host that failed to resolve.
        host: String,
        /// Resolver error text.
        message: String,
    },

    /// The server actively refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Any other transport-level failure.
    #[error("{0}")]
    Other(String),
}

/// Port for performing one HTTP round trip.
///
/// The transport resolves the request against its configured base URL,
/// attaches the bearer token when one is present on the request, and
/// returns the status and body without interpreting them. Carrying the
/// server's session cookie between calls (used by the refresh endpoint)
/// is the transport's responsibility.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Executes the request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no HTTP response was obtained at
    /// all; HTTP-level failures are ordinary responses.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}
