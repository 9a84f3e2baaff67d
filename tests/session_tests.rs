//! Integration tests for session bootstrap and the auth lifecycle

mod common;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use common::{envelope, error_envelope, harness, sign_in, teacher_profile};
use lms_client::prelude::Role;

#[tokio::test]
async fn login_stores_tokens_and_profile() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({
            "email": "dana@example.com",
            "password": "secret",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "accessToken": "access-1",
            "refreshToken": "refresh-1",
        }))))
        .expect(1)
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(teacher_profile())))
        .expect(1)
        .mount(&h.server)
        .await;

    let profile = h
        .client
        .auth()
        .login("dana@example.com", "secret")
        .await
        .unwrap();

    assert_eq!(profile.full_name, "Dana Klein");
    assert!(h.client.auth().is_authenticated());
    assert!(h.client.auth().has_role(Role::Teacher));
    assert!(!h.client.auth().has_role(Role::Admin));
    assert_eq!(h.client.tokens().access_token().as_deref(), Some("access-1"));
    assert_eq!(
        h.client.tokens().refresh_token().as_deref(),
        Some("refresh-1")
    );
}

#[tokio::test]
async fn initialize_resumes_a_stored_session() {
    let h = harness().await;
    h.client.tokens().set_refresh(Some("stored-refresh"));

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({ "refreshToken": "stored-refresh" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "accessToken": "access-2",
            "refreshToken": "refresh-2",
        }))))
        .expect(1)
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(teacher_profile())))
        .expect(1)
        .mount(&h.server)
        .await;

    h.client.auth().initialize().await;

    assert!(h.client.auth().is_authenticated());
    assert_eq!(
        h.client.auth().user().map(|user| user.full_name),
        Some("Dana Klein".to_string())
    );

    // Idempotent: a second call performs no further network requests
    // (the expect(1) counters above verify this when the server drops).
    h.client.auth().initialize().await;
}

#[tokio::test]
async fn initialize_without_refresh_token_stays_offline() {
    let h = harness().await;

    h.client.auth().initialize().await;

    assert!(!h.client.auth().is_authenticated());
    let requests = h.server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "expected no network calls");
}

#[tokio::test]
async fn initialize_tears_down_on_refresh_failure() {
    let h = harness().await;
    h.client.tokens().set_refresh(Some("stored-refresh"));

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(error_envelope("Database down", None)),
        )
        .mount(&h.server)
        .await;

    // Best-effort revocation during the resulting logout
    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(null))))
        .mount(&h.server)
        .await;

    h.client.auth().initialize().await;

    assert!(!h.client.auth().is_authenticated());
    assert_eq!(h.client.tokens().refresh_token(), None);
    assert_eq!(h.navigator.pushes(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn logout_clears_state_even_when_revocation_fails() {
    let h = harness().await;
    sign_in(&h, teacher_profile()).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&h.server)
        .await;

    h.client.auth().logout().await;

    assert!(!h.client.auth().is_authenticated());
    assert_eq!(h.client.tokens().access_token(), None);
    assert_eq!(h.client.tokens().refresh_token(), None);
    assert_eq!(h.navigator.pushes(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn logout_skips_revocation_without_a_refresh_token() {
    let h = harness().await;

    h.client.auth().logout().await;

    let requests = h.server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "expected no revocation call");
    assert_eq!(h.navigator.pushes(), vec!["/login".to_string()]);
}
