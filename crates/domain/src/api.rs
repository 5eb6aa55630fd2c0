//! Transport-neutral request and response types.
//!
//! An [`ApiRequest`] is a value describing one outbound call: method, path
//! relative to the API base, optional query string, optional JSON body and
//! the bearer token attached for this attempt. Because it is a plain value
//! it can be cloned and re-issued after a token refresh.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::auth::AccessToken;
use crate::error::{DomainError, DomainResult};

/// HTTP methods used by the storefront API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET request.
    Get,
    /// POST request.
    Post,
    /// PUT request.
    Put,
    /// PATCH request.
    Patch,
    /// DELETE request.
    Delete,
}

impl HttpMethod {
    /// Returns the canonical method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Description of a single outbound API call.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: HttpMethod,
    path: String,
    query: Option<String>,
    body: Option<serde_json::Value>,
    bearer: Option<AccessToken>,
}

impl ApiRequest {
    /// Creates a request with the given method and API-relative path.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: None,
            bearer: None,
        }
    }

    /// Creates a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Creates a PATCH request.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    /// Creates a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Attaches a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBody`] if the value cannot be
    /// serialized.
    pub fn with_json<T: Serialize>(mut self, body: &T) -> DomainResult<Self> {
        let value =
            serde_json::to_value(body).map_err(|e| DomainError::InvalidBody(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Attaches an already-encoded query string (no leading `?`).
    #[must_use]
    pub fn with_raw_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = if query.is_empty() { None } else { Some(query) };
        self
    }

    /// Sets or clears the bearer token for this attempt.
    #[must_use]
    pub fn with_bearer(mut self, token: Option<AccessToken>) -> Self {
        self.bearer = token;
        self
    }

    /// The HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// The API-relative path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The encoded query string, if any.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// The JSON body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// The bearer token attached for this attempt, if any.
    #[must_use]
    pub const fn bearer(&self) -> Option<&AccessToken> {
        self.bearer.as_ref()
    }
}

/// Response to an [`ApiRequest`]: status code plus raw body bytes.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    body: Vec<u8>,
}

impl ApiResponse {
    /// Creates a response from a status code and body bytes.
    #[must_use]
    pub const fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// The HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns true when the attached token was rejected.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// The raw body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying decode error if the body is not valid JSON of
    /// the expected shape.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Extracts the server-supplied error message from a failure body.
    ///
    /// The identity service reports errors as `{"message": "..."}`;
    /// validation failures may carry an array of messages instead, which is
    /// joined into one line.
    #[must_use]
    pub fn server_message(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        match value.get("message")? {
            serde_json::Value::String(message) => Some(message.clone()),
            serde_json::Value::Array(parts) => {
                let joined: Vec<&str> = parts.iter().filter_map(serde_json::Value::as_str).collect();
                if joined.is_empty() {
                    None
                } else {
                    Some(joined.join(", "))
                }
            }
            _ => None,
        }
    }
}
