//! Session controller flows: login, register, restore, logout, events.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod support;

use std::sync::Arc;

use laced_application::{
    AuthError, ClientConfig, GENERIC_AUTH_FAILURE, HttpTransport, ShopClient, TokenStorage,
};
use laced_domain::{
    ApiRequest, Credentials, RegisterDetails, SessionEndReason, SessionEvent, SessionPhase,
};
use pretty_assertions::assert_eq;
use support::{LoginBehavior, MockTransport, SharedStorage};
use url::Url;

fn client(transport: &Arc<MockTransport>, storage: &Arc<SharedStorage>) -> ShopClient {
    let config = ClientConfig::new(Url::parse("http://shop.test/api/").expect("valid base url"));
    ShopClient::new(
        &config,
        Arc::clone(transport) as Arc<dyn HttpTransport>,
        Arc::clone(storage) as Arc<dyn TokenStorage>,
    )
}

fn credentials() -> Credentials {
    Credentials {
        email: "jess@example.com".to_string(),
        password: "secret".to_string(),
    }
}

#[tokio::test]
async fn login_stores_token_and_emits_started_once() {
    let transport = MockTransport::new();
    let storage = SharedStorage::new();
    let client = client(&transport, &storage);
    let mut events = client.subscribe();

    client.auth().login(&credentials()).await.expect("login succeeds");

    assert_eq!(client.phase(), SessionPhase::Authenticated);
    assert_eq!(storage.stored().as_deref(), Some("tok-1"));
    assert_eq!(events.recv().await.expect("event"), SessionEvent::Started);
    assert!(events.try_recv().is_err(), "exactly one event fired");
}

#[tokio::test]
async fn login_twice_keeps_the_latest_token() {
    let transport = MockTransport::new();
    let storage = SharedStorage::new();
    let client = client(&transport, &storage);

    client.auth().login(&credentials()).await.expect("first login");
    transport.set_login(LoginBehavior::Grant("tok-9".to_string()));
    client.auth().login(&credentials()).await.expect("second login");

    assert_eq!(storage.stored().as_deref(), Some("tok-9"));
}

#[tokio::test]
async fn rejected_login_surfaces_the_server_message() {
    let transport = MockTransport::new();
    let storage = SharedStorage::new();
    let client = client(&transport, &storage);
    transport.set_login(LoginBehavior::Reject {
        status: 400,
        message: Some("Invalid credentials".to_string()),
    });

    let err = client
        .auth()
        .login(&credentials())
        .await
        .expect_err("login fails");

    match err {
        AuthError::Rejected { message } => assert_eq!(message, "Invalid credentials"),
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(client.phase(), SessionPhase::Anonymous);
    assert_eq!(storage.stored(), None);
}

#[tokio::test]
async fn rejected_login_without_message_uses_the_fallback() {
    let transport = MockTransport::new();
    let storage = SharedStorage::new();
    let client = client(&transport, &storage);
    transport.set_login(LoginBehavior::Reject {
        status: 401,
        message: None,
    });

    let err = client
        .auth()
        .login(&credentials())
        .await
        .expect_err("login fails");

    match err {
        AuthError::Rejected { message } => assert_eq!(message, GENERIC_AUTH_FAILURE),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn register_behaves_like_login_on_success() {
    let transport = MockTransport::new();
    let storage = SharedStorage::new();
    let client = client(&transport, &storage);
    let mut events = client.subscribe();

    client
        .auth()
        .register(&RegisterDetails {
            name: "Jess".to_string(),
            email: "jess@example.com".to_string(),
            password: "secret".to_string(),
        })
        .await
        .expect("registration succeeds");

    assert_eq!(client.phase(), SessionPhase::Authenticated);
    assert_eq!(storage.stored().as_deref(), Some("tok-1"));
    assert_eq!(events.recv().await.expect("event"), SessionEvent::Started);
}

#[tokio::test]
async fn logout_clears_the_token_even_when_the_server_refuses() {
    let transport = MockTransport::new();
    let storage = SharedStorage::new();
    let client = client(&transport, &storage);
    client.auth().login(&credentials()).await.expect("login");
    let mut events = client.subscribe();
    transport.set_logout_ok(false);

    let acknowledged = client.auth().logout().await;

    assert!(!acknowledged);
    assert_eq!(storage.stored(), None);
    assert_eq!(client.phase(), SessionPhase::Anonymous);
    assert_eq!(
        events.recv().await.expect("event"),
        SessionEvent::Ended {
            reason: SessionEndReason::LoggedOut
        }
    );
}

#[tokio::test]
async fn logout_acknowledged_by_the_server() {
    let transport = MockTransport::new();
    let storage = SharedStorage::new();
    let client = client(&transport, &storage);
    client.auth().login(&credentials()).await.expect("login");

    assert!(client.auth().logout().await);
    assert_eq!(storage.stored(), None);
}

#[tokio::test]
async fn restore_picks_up_the_persisted_session() {
    let transport = MockTransport::new();
    let storage = SharedStorage::with_token("tok-disk");
    transport.accept_token("tok-disk");
    let client = client(&transport, &storage);
    let mut events = client.subscribe();

    assert!(client.auth().restore().await);
    assert_eq!(client.phase(), SessionPhase::Authenticated);
    assert_eq!(events.recv().await.expect("event"), SessionEvent::Restored);

    // The restored token authorizes calls directly.
    let response = client
        .calls()
        .execute(ApiRequest::get("users/profile"))
        .await
        .expect("authorized call");
    assert!(response.is_success());
    let records = transport.domain_records();
    assert_eq!(records[0].bearer.as_deref(), Some("tok-disk"));
}

#[tokio::test]
async fn restore_with_empty_storage_stays_anonymous() {
    let transport = MockTransport::new();
    let storage = SharedStorage::new();
    let client = client(&transport, &storage);

    assert!(!client.auth().restore().await);
    assert_eq!(client.phase(), SessionPhase::Anonymous);
}
