//! Retry coordinator: the authorized-call capability.
//!
//! Every domain call goes through [`RetryCoordinator::execute`]. A 401
//! answer starts (or joins) the single in-flight token refresh; the
//! refresh attempt runs as its own task so that callers abandoning their
//! await never cancel it, and parked calls are replayed strictly in the
//! order they failed.

use std::sync::Arc;
use std::time::Duration;

use laced_domain::{ApiRequest, ApiResponse, SessionEndReason, SessionEvent};
use tracing::{debug, warn};

use crate::auth::session::{CallOutcome, UnauthorizedOutcome};
use crate::auth::{AuthGateway, Session};
use crate::error::ApiError;
use crate::ports::HttpTransport;

struct CoordinatorInner {
    session: Arc<Session>,
    gateway: AuthGateway,
    transport: Arc<dyn HttpTransport>,
    refresh_timeout: Duration,
}

/// Wraps outbound calls with the shared-refresh retry protocol.
///
/// Cheap to clone; clones share the same session context and therefore
/// the same single-flight guarantee.
#[derive(Clone)]
pub struct RetryCoordinator {
    inner: Arc<CoordinatorInner>,
}

impl RetryCoordinator {
    /// Creates a coordinator over the shared session context.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        gateway: AuthGateway,
        session: Arc<Session>,
        refresh_timeout: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(CoordinatorInner {
                session,
                gateway,
                transport,
                refresh_timeout,
            }),
        }
    }

    /// Performs an authorized call.
    ///
    /// The current token (if any) is attached before sending. Non-401
    /// responses, success or not, are returned unchanged. A 401 is
    /// absorbed by the refresh protocol and the call resolves with either
    /// the replayed response or a final authorization failure.
    ///
    /// # Errors
    ///
    /// [`ApiError::Transport`] when the round trip itself fails,
    /// [`ApiError::Unauthorized`] when no refresh can help, and
    /// [`ApiError::SessionExpired`] when the refresh was rejected or timed
    /// out.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let token = self.inner.session.tokens().get().await;
        let attempt = request.clone().with_bearer(token);
        let response = self.inner.transport.send(attempt).await?;
        if !response.is_unauthorized() {
            return Ok(response);
        }

        match self.inner.session.on_unauthorized(request) {
            UnauthorizedOutcome::Anonymous => Err(ApiError::Unauthorized),
            UnauthorizedOutcome::Lead(outcome) => {
                debug!("authorized call rejected; starting token refresh");
                tokio::spawn(drive_refresh(Arc::clone(&self.inner)));
                outcome.await.unwrap_or(Err(ApiError::SessionExpired))
            }
            UnauthorizedOutcome::Parked(outcome) => {
                debug!("authorized call rejected; joining refresh in flight");
                outcome.await.unwrap_or(Err(ApiError::SessionExpired))
            }
        }
    }
}

impl std::fmt::Debug for RetryCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryCoordinator")
            .field("refresh_timeout", &self.inner.refresh_timeout)
            .finish_non_exhaustive()
    }
}

/// The single refresh attempt.
///
/// Runs detached from every caller: the round trip completes and the
/// queue drains even when the call that triggered it has been abandoned.
async fn drive_refresh(inner: Arc<CoordinatorInner>) {
    let refreshed = tokio::time::timeout(inner.refresh_timeout, inner.gateway.refresh()).await;
    match refreshed {
        Ok(Ok(_token)) => {
            let Some(pending) = inner.session.complete_refresh() else {
                // A logout raced the refresh and already drained the queue.
                return;
            };
            inner.session.emit(SessionEvent::Restored);
            debug!(parked = pending.len(), "token refresh succeeded; replaying parked calls");
            for call in pending {
                let outcome = replay(&inner, call.request).await;
                let _ = call.reply.send(outcome);
            }
        }
        Ok(Err(err)) => {
            warn!(error = %err, "token refresh failed; ending session");
            expire(&inner).await;
        }
        Err(_elapsed) => {
            warn!(timeout = ?inner.refresh_timeout, "token refresh timed out; ending session");
            expire(&inner).await;
        }
    }
}

/// Re-issues one parked call with the fresh token.
///
/// A second 401 on a freshly refreshed token is final; retrying it would
/// loop forever against a server that keeps rejecting.
async fn replay(inner: &CoordinatorInner, request: ApiRequest) -> CallOutcome {
    let token = inner.session.tokens().get().await;
    let response = inner.transport.send(request.with_bearer(token)).await?;
    if response.is_unauthorized() {
        return Err(ApiError::Unauthorized);
    }
    Ok(response)
}

/// Refresh failed or timed out: end the session and fail every parked
/// call uniformly.
async fn expire(inner: &CoordinatorInner) {
    let pending = inner.session.deactivate();
    inner.session.tokens().clear().await;
    inner
        .session
        .emit(SessionEvent::Ended { reason: SessionEndReason::Expired });
    for call in pending {
        let _ = call.reply.send(Err(ApiError::SessionExpired));
    }
}
