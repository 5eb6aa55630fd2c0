//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

const fn default_request_timeout_ms() -> u64 {
    30_000
}

const fn default_refresh_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    "Laced/0.1.0".to_string()
}

/// Configuration for a [`crate::ShopClient`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the storefront API, e.g. `https://shop.example.com/api/`.
    pub base_url: Url,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Bound on the token refresh round trip; elapse counts as a refresh
    /// failure and ends the session.
    #[serde(default = "default_refresh_timeout_ms")]
    pub refresh_timeout_ms: u64,
    /// User-Agent header value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a configuration with default timeouts.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            request_timeout_ms: default_request_timeout_ms(),
            refresh_timeout_ms: default_refresh_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }

    /// Overrides the refresh timeout.
    #[must_use]
    pub fn with_refresh_timeout(mut self, timeout: Duration) -> Self {
        self.refresh_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Per-request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Refresh timeout as a [`Duration`].
    #[must_use]
    pub const fn refresh_timeout(&self) -> Duration {
        Duration::from_millis(self.refresh_timeout_ms)
    }
}
