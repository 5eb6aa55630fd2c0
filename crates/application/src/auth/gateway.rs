//! Identity service gateway.

use std::sync::Arc;

use laced_domain::{AccessToken, ApiRequest, AuthResponse, Credentials, RegisterDetails};
use serde::Serialize;
use tracing::{debug, warn};

use crate::auth::Session;
use crate::error::{AuthError, GENERIC_AUTH_FAILURE};
use crate::ports::{HttpTransport, TransportError};
use crate::routes;

/// Client for the four identity operations: login, register, refresh and
/// logout. Each is a single network round trip; none retries.
///
/// Side effects are confined to the token store: a successful login,
/// registration or refresh stores the fresh token. The gateway never
/// touches session state or events.
#[derive(Clone)]
pub struct AuthGateway {
    transport: Arc<dyn HttpTransport>,
    session: Arc<Session>,
}

impl AuthGateway {
    /// Creates a gateway over the shared session context.
    pub fn new(transport: Arc<dyn HttpTransport>, session: Arc<Session>) -> Self {
        Self { transport, session }
    }

    /// Exchanges credentials for a fresh token.
    ///
    /// # Errors
    ///
    /// [`AuthError::Rejected`] when the server refuses, carrying the
    /// server-supplied message when present; transport errors otherwise.
    pub async fn login(&self, credentials: &Credentials) -> Result<AccessToken, AuthError> {
        self.obtain(routes::auth::LOGIN, credentials).await
    }

    /// Creates an account and returns its first token.
    ///
    /// # Errors
    ///
    /// Same as [`Self::login`].
    pub async fn register(&self, details: &RegisterDetails) -> Result<AccessToken, AuthError> {
        self.obtain(routes::auth::REGISTER, details).await
    }

    /// Shared login/register round trip: POST the form, store the token.
    async fn obtain<T: Serialize>(&self, path: &str, form: &T) -> Result<AccessToken, AuthError> {
        let request = ApiRequest::post(path).with_json(form)?;
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            let message = response
                .server_message()
                .unwrap_or_else(|| GENERIC_AUTH_FAILURE.to_string());
            debug!(status = response.status(), "authentication rejected");
            return Err(AuthError::Rejected { message });
        }

        let auth: AuthResponse = response.json().map_err(|err| {
            TransportError::Other(format!("failed to parse auth response: {err}"))
        })?;
        self.session.tokens().set(auth.access_token.clone()).await;
        Ok(auth.access_token)
    }

    /// Exchanges the current session for a fresh access token.
    ///
    /// The call carries no body and no bearer token: the server associates
    /// it with the session through the cookie the transport maintains. Any
    /// failure (rejection, malformed response or transport) means the
    /// session is unrecoverable.
    ///
    /// # Errors
    ///
    /// [`AuthError::RefreshRejected`] on every failure path.
    pub async fn refresh(&self) -> Result<AccessToken, AuthError> {
        let request = ApiRequest::post(routes::auth::ACCESS_TOKEN);
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "token refresh transport failure");
                return Err(AuthError::RefreshRejected);
            }
        };

        if !response.is_success() {
            warn!(status = response.status(), "token refresh rejected");
            return Err(AuthError::RefreshRejected);
        }

        match response.json::<AuthResponse>() {
            Ok(auth) => {
                self.session.tokens().set(auth.access_token.clone()).await;
                debug!(token = %auth.access_token.preview(), "access token refreshed");
                Ok(auth.access_token)
            }
            Err(err) => {
                warn!(error = %err, "token refresh response malformed");
                Err(AuthError::RefreshRejected)
            }
        }
    }

    /// Ends the session server-side.
    ///
    /// Returns whether the server acknowledged. The caller owns local
    /// cleanup and must clear the token store either way.
    ///
    /// # Errors
    ///
    /// Transport errors only; an unacknowledged logout is `Ok(false)`.
    pub async fn logout(&self) -> Result<bool, AuthError> {
        let bearer = self.session.tokens().get().await;
        let request = ApiRequest::post(routes::auth::LOGOUT).with_bearer(bearer);
        let response = self.transport.send(request).await?;

        let acknowledged = response.is_success() && response.json::<bool>().unwrap_or(false);
        Ok(acknowledged)
    }
}

impl std::fmt::Debug for AuthGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGateway").finish_non_exhaustive()
    }
}
