//! Session phase and event types for presentation binding.
//!
//! The phase is a coarse view of the session state machine used for
//! display; the full state (including the queue of calls parked behind an
//! in-flight refresh) lives with the coordinator in the application layer.

use serde::{Deserialize, Serialize};

/// Coarse session state, one value per client process.
///
/// Valid transitions:
/// - `Anonymous` → `Authenticated` on login/register success
/// - `Authenticated` → `Refreshing` when an authorized call is rejected
/// - `Refreshing` → `Authenticated` on refresh success
/// - `Refreshing` → `Anonymous` on refresh failure
/// - `Authenticated` → `Anonymous` on explicit logout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No session; a login is required before authorized calls succeed.
    #[default]
    Anonymous,
    /// A token is held and attached to outgoing calls.
    Authenticated,
    /// A token refresh round trip is in flight; failed calls are parked.
    Refreshing,
}

impl SessionPhase {
    /// Returns true if no session exists.
    #[must_use]
    pub const fn is_anonymous(self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// Returns true if a session is established.
    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated)
    }

    /// Returns true while a refresh round trip is in flight.
    #[must_use]
    pub const fn is_refreshing(self) -> bool {
        matches!(self, Self::Refreshing)
    }

    /// Short label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Authenticated => "authenticated",
            Self::Refreshing => "refreshing",
        }
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEndReason {
    /// The user logged out explicitly.
    LoggedOut,
    /// The refresh call was rejected or timed out; a fresh login is needed.
    Expired,
}

impl SessionEndReason {
    /// Message suitable for a user-facing notification.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::LoggedOut => "logged out",
            Self::Expired => "session expired, please log in again",
        }
    }
}

/// Observable session events for the presentation layer.
///
/// The core renders nothing; subscribers use these for redirects and
/// notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A login or registration succeeded.
    Started,
    /// The session ended, by logout or expiry.
    Ended {
        /// Why the session ended.
        reason: SessionEndReason,
    },
    /// An existing session was restored, from disk or by a successful
    /// token refresh.
    Restored,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_phase_is_anonymous() {
        let phase = SessionPhase::default();
        assert!(phase.is_anonymous());
        assert!(!phase.is_authenticated());
        assert!(!phase.is_refreshing());
    }

    #[test]
    fn phase_labels() {
        assert_eq!(SessionPhase::Anonymous.label(), "anonymous");
        assert_eq!(SessionPhase::Authenticated.label(), "authenticated");
        assert_eq!(SessionPhase::Refreshing.label(), "refreshing");
    }

    #[test]
    fn expiry_message_asks_for_fresh_login() {
        assert_eq!(
            SessionEndReason::Expired.user_message(),
            "session expired, please log in again"
        );
    }

    #[test]
    fn phase_serializes_snake_case() {
        let rendered = serde_json::to_string(&SessionPhase::Refreshing).expect("serializable");
        assert_eq!(rendered, r#""refreshing""#);
    }
}
