#![allow(dead_code)]

//! Shared fixtures for the integration tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lms_client::notify::Notifier;
use lms_client::router::Navigator;
use lms_client::LmsClient;

/// Navigator that records every push and tracks the current path
#[derive(Debug)]
pub struct RecordingNavigator {
    current: Mutex<String>,
    pushes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            current: Mutex::new("/".to_string()),
            pushes: Mutex::new(Vec::new()),
        })
    }

    pub fn pushes(&self) -> Vec<String> {
        self.pushes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn push(&self, path: &str) {
        *self.current.lock().unwrap() = path.to_string();
        self.pushes.lock().unwrap().push(path.to_string());
    }

    fn current_path(&self) -> String {
        self.current.lock().unwrap().clone()
    }
}

/// Notifier that records every surfaced message
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn success(&self, _message: &str) {}
}

/// Wrap a payload in the standard success envelope
pub fn envelope(data: Value) -> Value {
    json!({
        "success": true,
        "data": data,
        "error": null,
        "timestamp": "2026-01-01T00:00:00Z",
        "requestId": "00000000-0000-0000-0000-000000000000",
    })
}

/// Build a failure envelope carrying an error message
pub fn error_envelope(message: &str, code: Option<&str>) -> Value {
    json!({
        "success": false,
        "data": null,
        "error": { "message": message, "code": code },
        "timestamp": "2026-01-01T00:00:00Z",
        "requestId": "00000000-0000-0000-0000-000000000000",
    })
}

pub struct TestHarness {
    pub server: MockServer,
    pub client: LmsClient,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
}

/// Spin up a mock server and a client pointed at it
pub async fn harness() -> TestHarness {
    let server = MockServer::start().await;
    let navigator = RecordingNavigator::new();
    let notifier = RecordingNotifier::new();
    let client = LmsClient::new(&server.uri(), navigator.clone(), notifier.clone()).unwrap();

    TestHarness {
        server,
        client,
        navigator,
        notifier,
    }
}

pub fn teacher_profile() -> Value {
    json!({
        "id": "u-17",
        "fullName": "Dana Klein",
        "email": "dana@example.com",
        "roles": ["TEACHER"],
    })
}

pub fn student_profile() -> Value {
    json!({
        "id": "u-42",
        "fullName": "Omar Haddad",
        "email": "omar@example.com",
        "roles": ["STUDENT"],
    })
}

/// Mount login + profile mocks and sign the harness client in
pub async fn sign_in(harness: &TestHarness, profile: Value) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "accessToken": "access-1",
            "refreshToken": "refresh-1",
        }))))
        .mount(&harness.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(profile)))
        .mount(&harness.server)
        .await;

    // The first guard check bootstraps the session via a silent refresh;
    // mount the refresh endpoint so that bootstrap succeeds after sign-in.
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "accessToken": "access-1",
            "refreshToken": "refresh-1",
        }))))
        .mount(&harness.server)
        .await;

    harness
        .client
        .auth()
        .login("user@example.com", "secret")
        .await
        .unwrap();
}
