//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port. The underlying
//! client keeps a cookie store: the identity service scopes the refresh
//! endpoint to the session via a cookie, so the jar must persist across
//! calls within one client.

use std::time::Duration;

use async_trait::async_trait;
use laced_application::{ClientConfig, HttpTransport, TransportError};
use laced_domain::{ApiRequest, ApiResponse, HttpMethod};
use reqwest::{Client, Method, Url};
use tracing::debug;

/// HTTP transport over a shared `reqwest::Client`.
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
    request_timeout: Duration,
}

impl ReqwestTransport {
    /// Creates a transport for the configured API.
    ///
    /// The base URL should end with a slash so relative paths append to
    /// it (`https://shop.example.com/api/` + `products`).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(10))
            .cookie_store(true)
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            request_timeout: config.request_timeout(),
        })
    }

    /// Converts the domain method to a reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Resolves the request path and query against the base URL.
    fn build_url(&self, request: &ApiRequest) -> Result<Url, TransportError> {
        let mut url = self
            .base_url
            .join(request.path())
            .map_err(|e| TransportError::InvalidUrl(format!("{e}: {}", request.path())))?;
        url.set_query(request.query());
        Ok(url)
    }

    /// Maps reqwest errors to the port's `TransportError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout { timeout_ms };
        }

        if error.is_connect() {
            let message = error.to_string();
            let host = error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string();
            if message.to_lowercase().contains("dns") || message.to_lowercase().contains("resolve")
            {
                return TransportError::Dns { host, message };
            }
            if message.to_lowercase().contains("refused") {
                return TransportError::ConnectionRefused {
                    host,
                    port: error.url().and_then(Url::port_or_known_default).unwrap_or(80),
                };
            }
            return TransportError::ConnectionFailed(message);
        }

        TransportError::Other(error.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.build_url(&request)?;
        let method = request.method();

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(method), url)
            .timeout(self.request_timeout);

        if let Some(token) = request.bearer() {
            builder = builder.bearer_auth(token.as_str());
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let timeout_ms = u64::try_from(self.request_timeout.as_millis()).unwrap_or(u64::MAX);
        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Other(format!("failed to read body: {e}")))?
            .to_vec();

        debug!(method = method.as_str(), path = request.path(), status, "api call completed");
        Ok(ApiResponse::new(status, body))
    }
}
