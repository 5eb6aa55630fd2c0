//! Process-scoped session context and the user-facing controller.
//!
//! [`Session`] owns the only two pieces of shared mutable state in the
//! client: the token slot and the session state machine. The state is a
//! tagged value; `Refreshing` carries the queue of parked calls, so "at
//! most one refresh attempt" holds by construction rather than by a flag
//! that could drift from a side list.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use laced_domain::{
    ApiRequest, ApiResponse, Credentials, RegisterDetails, SessionEndReason, SessionEvent,
    SessionPhase,
};
use tokio::sync::{broadcast, oneshot};
use tracing::{info, warn};

use crate::auth::{AuthGateway, TokenStore};
use crate::error::{ApiError, AuthError};
use crate::ports::TokenStorage;

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Final outcome delivered to a parked call.
pub(crate) type CallOutcome = Result<ApiResponse, ApiError>;

/// A call parked behind the in-flight refresh, with the channel that
/// delivers its final outcome. Exists only inside the `Refreshing` state.
pub(crate) struct PendingCall {
    /// The original request, re-issued with the fresh token on success.
    pub(crate) request: ApiRequest,
    /// Outcome channel back to the caller. The caller may have gone away;
    /// a failed send means the result has no observer, nothing more.
    pub(crate) reply: oneshot::Sender<CallOutcome>,
}

/// The session state machine. `Refreshing` owns the pending queue.
enum SessionState {
    Anonymous,
    Authenticated,
    Refreshing { pending: VecDeque<PendingCall> },
}

impl SessionState {
    const fn phase(&self) -> SessionPhase {
        match self {
            Self::Anonymous => SessionPhase::Anonymous,
            Self::Authenticated => SessionPhase::Authenticated,
            Self::Refreshing { .. } => SessionPhase::Refreshing,
        }
    }
}

/// How an authorization failure was absorbed by the session.
pub(crate) enum UnauthorizedOutcome {
    /// This call triggered the refresh; the caller must spawn the single
    /// refresh attempt and then wait like everyone else.
    Lead(oneshot::Receiver<CallOutcome>),
    /// A refresh is already in flight; the call is parked behind it.
    Parked(oneshot::Receiver<CallOutcome>),
    /// No session exists; the failure is final.
    Anonymous,
}

/// Process-scoped session context shared by the gateway, the retry
/// coordinator and the controller.
///
/// The state mutex guards only the check-and-transition decisions; it is
/// never held across an await, which makes each decision atomic with
/// respect to every other call in flight.
pub struct Session {
    state: Mutex<SessionState>,
    tokens: TokenStore,
    events: broadcast::Sender<SessionEvent>,
}

impl Session {
    /// Creates an anonymous session backed by the given durable token slot.
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: Mutex::new(SessionState::Anonymous),
            tokens: TokenStore::new(storage),
            events,
        }
    }

    /// The token store for this session.
    pub const fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Current coarse phase, for display.
    pub fn phase(&self) -> SessionPhase {
        self.lock_state().phase()
    }

    /// Subscribes to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub(crate) fn emit(&self, event: SessionEvent) {
        // No subscribers is fine; events are best-effort notifications.
        let _ = self.events.send(event);
    }

    /// Transition to `Authenticated` after a login, registration or
    /// restore.
    pub(crate) fn activate(&self) {
        let mut state = self.lock_state();
        *state = SessionState::Authenticated;
    }

    /// Transition to `Anonymous`, returning any calls that were parked
    /// behind a refresh so the caller can fail them.
    pub(crate) fn deactivate(&self) -> VecDeque<PendingCall> {
        let mut state = self.lock_state();
        match std::mem::replace(&mut *state, SessionState::Anonymous) {
            SessionState::Refreshing { pending } => pending,
            _ => VecDeque::new(),
        }
    }

    /// Absorb an authorization failure: the single atomic decision point
    /// of the refresh protocol.
    ///
    /// The first failure while `Authenticated` moves the session to
    /// `Refreshing` and makes that call the leader; failures while
    /// `Refreshing` are parked on the same attempt; failures while
    /// `Anonymous` are final.
    pub(crate) fn on_unauthorized(&self, request: ApiRequest) -> UnauthorizedOutcome {
        let mut state = self.lock_state();
        match &mut *state {
            SessionState::Anonymous => UnauthorizedOutcome::Anonymous,
            SessionState::Authenticated => {
                let (reply, outcome) = oneshot::channel();
                let mut pending = VecDeque::new();
                pending.push_back(PendingCall { request, reply });
                *state = SessionState::Refreshing { pending };
                UnauthorizedOutcome::Lead(outcome)
            }
            SessionState::Refreshing { pending } => {
                let (reply, outcome) = oneshot::channel();
                pending.push_back(PendingCall { request, reply });
                UnauthorizedOutcome::Parked(outcome)
            }
        }
    }

    /// Conclude a successful refresh: back to `Authenticated`, handing the
    /// parked queue (in arrival order) to the caller for replay.
    ///
    /// Returns `None` when a logout won the race against the refresh; the
    /// queue was already drained by [`Self::deactivate`].
    pub(crate) fn complete_refresh(&self) -> Option<VecDeque<PendingCall>> {
        let mut state = self.lock_state();
        match std::mem::replace(&mut *state, SessionState::Authenticated) {
            SessionState::Refreshing { pending } => Some(pending),
            other => {
                *state = other;
                None
            }
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, SessionState> {
        // A poisoned state mutex means a panic mid-transition; the state
        // value itself is still consistent, so keep going.
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

/// User-facing session operations: login, register, restore and logout.
///
/// Drives the state machine from gateway outcomes and emits the
/// [`SessionEvent`]s the presentation layer subscribes to.
pub struct SessionController {
    session: Arc<Session>,
    gateway: AuthGateway,
}

impl SessionController {
    /// Creates a controller over the shared session context.
    pub const fn new(session: Arc<Session>, gateway: AuthGateway) -> Self {
        Self { session, gateway }
    }

    /// Logs in with credentials.
    ///
    /// On success the token is stored, the session becomes
    /// `Authenticated` and one `Started` event fires.
    ///
    /// # Errors
    ///
    /// [`AuthError::Rejected`] with the server's message (or the generic
    /// fallback) when the credentials are refused; transport errors
    /// otherwise. Neither changes session state.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), AuthError> {
        self.gateway.login(credentials).await?;
        self.session.activate();
        self.session.emit(SessionEvent::Started);
        info!("session started");
        Ok(())
    }

    /// Registers a new account; behaves like [`Self::login`] on success.
    ///
    /// # Errors
    ///
    /// Same as [`Self::login`].
    pub async fn register(&self, details: &RegisterDetails) -> Result<(), AuthError> {
        self.gateway.register(details).await?;
        self.session.activate();
        self.session.emit(SessionEvent::Started);
        info!("session started");
        Ok(())
    }

    /// Restores a persisted session from durable storage.
    ///
    /// Returns true and emits `Restored` when a token was found.
    pub async fn restore(&self) -> bool {
        if self.session.tokens().load_persisted().await {
            self.session.activate();
            self.session.emit(SessionEvent::Restored);
            info!("session restored from storage");
            true
        } else {
            false
        }
    }

    /// Ends the session.
    ///
    /// The remote logout call is best-effort: local cleanup (token slot
    /// emptied, state `Anonymous`, `Ended` event) happens regardless of
    /// the remote result. Returns whether the server acknowledged.
    pub async fn logout(&self) -> bool {
        let acknowledged = match self.gateway.logout().await {
            Ok(acknowledged) => acknowledged,
            Err(err) => {
                warn!(error = %err, "remote logout failed; clearing local session anyway");
                false
            }
        };

        let parked = self.session.deactivate();
        for call in parked {
            let _ = call.reply.send(Err(ApiError::SessionExpired));
        }
        self.session.tokens().clear().await;
        self.session
            .emit(SessionEvent::Ended { reason: SessionEndReason::LoggedOut });
        info!(acknowledged, "session ended");
        acknowledged
    }

    /// Current coarse phase.
    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    /// Subscribes to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.session.subscribe()
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::test_support::MemoryStorage;
    use pretty_assertions::assert_eq;

    fn session() -> Session {
        Session::new(Arc::new(MemoryStorage::default()))
    }

    #[test]
    fn new_session_is_anonymous() {
        assert_eq!(session().phase(), SessionPhase::Anonymous);
    }

    #[test]
    fn unauthorized_while_anonymous_is_final() {
        let session = session();
        let outcome = session.on_unauthorized(ApiRequest::get("users/profile"));
        assert!(matches!(outcome, UnauthorizedOutcome::Anonymous));
        assert_eq!(session.phase(), SessionPhase::Anonymous);
    }

    #[test]
    fn first_failure_leads_and_later_failures_park() {
        let session = session();
        session.activate();

        let first = session.on_unauthorized(ApiRequest::get("users/profile"));
        assert!(matches!(first, UnauthorizedOutcome::Lead(_)));
        assert_eq!(session.phase(), SessionPhase::Refreshing);

        let second = session.on_unauthorized(ApiRequest::get("orders"));
        assert!(matches!(second, UnauthorizedOutcome::Parked(_)));
        let third = session.on_unauthorized(ApiRequest::get("cart"));
        assert!(matches!(third, UnauthorizedOutcome::Parked(_)));

        // Still exactly one refresh window.
        assert_eq!(session.phase(), SessionPhase::Refreshing);
    }

    #[test]
    fn complete_refresh_returns_queue_in_arrival_order() {
        let session = session();
        session.activate();

        let _lead = session.on_unauthorized(ApiRequest::get("users/profile"));
        let _parked_a = session.on_unauthorized(ApiRequest::get("users/favorites"));
        let _parked_b = session.on_unauthorized(ApiRequest::get("orders"));

        let pending = session.complete_refresh().expect("refresh was in flight");
        let paths: Vec<&str> = pending.iter().map(|call| call.request.path()).collect();
        assert_eq!(paths, vec!["users/profile", "users/favorites", "orders"]);
        assert_eq!(session.phase(), SessionPhase::Authenticated);
    }

    #[test]
    fn complete_refresh_without_refresh_is_none() {
        let session = session();
        session.activate();
        assert!(session.complete_refresh().is_none());
        // The state is left untouched.
        assert_eq!(session.phase(), SessionPhase::Authenticated);
    }

    #[test]
    fn deactivate_hands_back_parked_calls() {
        let session = session();
        session.activate();
        let _lead = session.on_unauthorized(ApiRequest::get("users/profile"));
        let _parked = session.on_unauthorized(ApiRequest::get("orders"));

        let pending = session.deactivate();
        assert_eq!(pending.len(), 2);
        assert_eq!(session.phase(), SessionPhase::Anonymous);
    }

    #[test]
    fn events_reach_subscribers() {
        let session = session();
        let mut events = session.subscribe();
        session.emit(SessionEvent::Started);

        let received = events.try_recv().expect("event was sent");
        assert_eq!(received, SessionEvent::Started);
    }
}
