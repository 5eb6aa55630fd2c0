//! Scripted transport and storage doubles for the session flow tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use laced_application::{HttpTransport, TokenStorage, TokenStorageError, TransportError};
use laced_domain::{AccessToken, ApiRequest, ApiResponse};
use tokio::sync::Notify;

/// One request as the transport saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    pub path: String,
    pub query: Option<String>,
    pub bearer: Option<String>,
}

/// What the identity endpoints should do.
#[derive(Clone)]
pub enum LoginBehavior {
    /// Issue this token and start accepting it.
    Grant(String),
    /// Refuse with this status and optional `{"message": ...}` body.
    Reject {
        status: u16,
        message: Option<String>,
    },
}

/// What the refresh endpoint should do.
#[derive(Clone)]
pub enum RefreshBehavior {
    /// Issue this token; `accepted` controls whether the API will honor it
    /// afterwards (a stale grant reproduces the replay-still-401 case).
    Grant { token: String, accepted: bool },
    /// Refuse with a 401.
    Reject,
    /// Never answer; only a timeout gets the caller out.
    Hang,
}

struct State {
    /// Token the domain endpoints currently accept.
    valid_token: Option<String>,
    login: LoginBehavior,
    refresh: RefreshBehavior,
    logout_ok: bool,
    records: Vec<RequestRecord>,
    responses: Vec<(String, serde_json::Value)>,
    failures: Vec<(String, u16, String)>,
}

/// Scripted in-memory stand-in for the storefront API.
///
/// Domain paths answer 200 with a registered body when the bearer matches
/// the currently valid token, and 401 otherwise. The identity paths follow
/// their configured behaviors. Every request is recorded in order.
pub struct MockTransport {
    state: Mutex<State>,
    refresh_calls: AtomicUsize,
    refresh_gated: AtomicBool,
    gate: Notify,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State {
                valid_token: None,
                login: LoginBehavior::Grant("tok-1".to_string()),
                refresh: RefreshBehavior::Grant {
                    token: "tok-2".to_string(),
                    accepted: true,
                },
                logout_ok: true,
                records: Vec::new(),
                responses: Vec::new(),
                failures: Vec::new(),
            }),
            refresh_calls: AtomicUsize::new(0),
            refresh_gated: AtomicBool::new(false),
            gate: Notify::new(),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub fn set_login(&self, behavior: LoginBehavior) {
        self.lock().login = behavior;
    }

    pub fn set_refresh(&self, behavior: RefreshBehavior) {
        self.lock().refresh = behavior;
    }

    pub fn set_logout_ok(&self, ok: bool) {
        self.lock().logout_ok = ok;
    }

    /// Makes the API reject the token the client currently holds.
    pub fn expire_current_token(&self) {
        self.lock().valid_token = None;
    }

    /// Makes the API accept this bearer token (e.g. one restored from
    /// durable storage).
    pub fn accept_token(&self, token: &str) {
        self.lock().valid_token = Some(token.to_string());
    }

    /// Makes one domain path fail with the given status and message even
    /// for an authorized caller.
    pub fn fail(&self, path: &str, status: u16, message: &str) {
        self.lock()
            .failures
            .push((path.to_string(), status, message.to_string()));
    }

    /// Registers the success body for a domain path.
    pub fn respond(&self, path: &str, body: serde_json::Value) {
        self.lock().responses.push((path.to_string(), body));
    }

    /// Holds the refresh round trip until [`Self::release_refresh`].
    pub fn gate_refresh(&self) {
        self.refresh_gated.store(true, Ordering::SeqCst);
    }

    pub fn release_refresh(&self) {
        self.refresh_gated.store(false, Ordering::SeqCst);
        self.gate.notify_one();
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn records(&self) -> Vec<RequestRecord> {
        self.lock().records.clone()
    }

    /// Requests to the domain endpoints, in arrival order.
    pub fn domain_records(&self) -> Vec<RequestRecord> {
        self.records()
            .into_iter()
            .filter(|record| !record.path.starts_with("auth/"))
            .collect()
    }

    fn ok(body: serde_json::Value) -> ApiResponse {
        ApiResponse::new(200, body.to_string().into_bytes())
    }

    fn rejected(status: u16, message: Option<&str>) -> ApiResponse {
        let body = message.map_or_else(Vec::new, |message| {
            serde_json::json!({ "message": message }).to_string().into_bytes()
        });
        ApiResponse::new(status, body)
    }

    fn handle_login(&self) -> ApiResponse {
        let behavior = self.lock().login.clone();
        match behavior {
            LoginBehavior::Grant(token) => {
                self.lock().valid_token = Some(token.clone());
                Self::ok(serde_json::json!({ "accessToken": token }))
            }
            LoginBehavior::Reject { status, message } => {
                Self::rejected(status, message.as_deref())
            }
        }
    }

    async fn handle_refresh(&self) -> ApiResponse {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        if self.refresh_gated.load(Ordering::SeqCst) {
            self.gate.notified().await;
        }

        let behavior = self.lock().refresh.clone();
        match behavior {
            RefreshBehavior::Grant { token, accepted } => {
                if accepted {
                    self.lock().valid_token = Some(token.clone());
                }
                Self::ok(serde_json::json!({ "accessToken": token }))
            }
            RefreshBehavior::Reject => Self::rejected(401, Some("refresh denied")),
            RefreshBehavior::Hang => std::future::pending::<ApiResponse>().await,
        }
    }

    fn handle_domain(&self, record: &RequestRecord, path: &str) -> ApiResponse {
        let state = self.lock();
        let authorized = match (&state.valid_token, &record.bearer) {
            (Some(valid), Some(bearer)) => valid == bearer,
            _ => false,
        };
        if !authorized {
            return Self::rejected(401, Some("unauthorized"));
        }

        if let Some((_, status, message)) = state
            .failures
            .iter()
            .find(|(registered, _, _)| registered == path)
        {
            return Self::rejected(*status, Some(message));
        }

        let body = state
            .responses
            .iter()
            .find(|(registered, _)| registered == path)
            .map_or_else(|| serde_json::json!({}), |(_, body)| body.clone());
        Self::ok(body)
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let record = RequestRecord {
            path: request.path().to_string(),
            query: request.query().map(str::to_string),
            bearer: request.bearer().map(|token| token.as_str().to_string()),
        };
        self.lock().records.push(record.clone());

        let response = match request.path() {
            "auth/login" | "auth/register" => self.handle_login(),
            "auth/access-token" => self.handle_refresh().await,
            "auth/logout" => {
                if self.lock().logout_ok {
                    Self::ok(serde_json::json!(true))
                } else {
                    ApiResponse::new(500, Vec::new())
                }
            }
            path => self.handle_domain(&record, path),
        };
        Ok(response)
    }
}

/// In-memory durable slot, optionally pre-seeded, shared with the test so
/// it can observe what the client persisted.
#[derive(Default)]
pub struct SharedStorage {
    slot: Mutex<Option<AccessToken>>,
}

impl SharedStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_token(token: &str) -> Arc<Self> {
        Arc::new(Self {
            slot: Mutex::new(Some(AccessToken::new(token))),
        })
    }

    pub fn stored(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .as_ref()
            .map(|token| token.as_str().to_string())
    }
}

#[async_trait]
impl TokenStorage for SharedStorage {
    async fn load(&self) -> Result<Option<AccessToken>, TokenStorageError> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone())
    }

    async fn save(&self, token: &AccessToken) -> Result<(), TokenStorageError> {
        *self
            .slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStorageError> {
        *self
            .slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
        Ok(())
    }
}
