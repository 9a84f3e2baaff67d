//! Authenticated request pipeline
//!
//! Every API call goes through [`HttpClient`]: the request stage attaches
//! a correlation id and the bearer header, the response stage unwraps the
//! response envelope or classifies the failure. A 401 triggers a single
//! transparent refresh; requests that hit 401 while a refresh is already
//! in flight join a FIFO queue and are released together with the same
//! outcome.

use std::sync::{Arc, Mutex};

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::oneshot;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::session::SessionHandle;
use crate::auth::types::TokenPair;
use crate::config::{ClientOptions, LmsConfig};
use crate::error::{Error, Result};
use crate::notify::Notifier;
use crate::pagination::{Page, PageCompat};
use crate::router::{routes, Navigator};
use crate::token::TokenStore;

pub(crate) const REFRESH_PATH: &str = "/api/auth/refresh";

const REQUEST_ID_HEADER: &str = "X-Request-Id";
const ENVELOPE_FALLBACK: &str = "Request failed";
const GENERIC_ERROR: &str = "Unexpected server error occurred.";
const SESSION_EXPIRED: &str = "Session expired. Please login again.";
const AUTH_FAILED: &str = "Authentication failed. Please login again.";

/// Uniform response wrapper every endpoint returns
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
    pub timestamp: String,
    pub request_id: String,
}

/// Error details carried by a failed envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<Value>,
}

/// Envelope parsed leniently out of a non-2xx body, keeping whatever
/// error message the server managed to embed
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

/// A rebuildable description of one API call; the pipeline constructs a
/// fresh transport request from it on every (re)submission.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub(crate) fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub(crate) fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub(crate) fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub(crate) fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub(crate) fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub(crate) fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub(crate) fn query_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub(crate) fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Outcome of one transit through the wire, classified for the
/// retry state machine in [`HttpClient::run`]
enum Dispatch {
    Data(Value),
    ApiFailure {
        message: String,
        code: Option<String>,
    },
    HttpFailure {
        status: StatusCode,
        message: Option<String>,
    },
    Transport(reqwest::Error),
    Decode(serde_json::Error),
}

enum RefreshWait {
    Token(String),
    LeaderFailed,
    FollowerFailed,
}

#[derive(Default)]
struct RefreshState {
    in_flight: bool,
    queue: Vec<oneshot::Sender<Option<String>>>,
}

/// HTTP client wrapping every outbound API call
pub struct HttpClient {
    origin: String,
    client: Client,
    /// Separate transport for the refresh call itself: no auth header,
    /// no retry machinery to recurse into
    bare: Client,
    options: ClientOptions,
    tokens: Arc<TokenStore>,
    session: Arc<SessionHandle>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    refresh: Mutex<RefreshState>,
}

impl HttpClient {
    pub(crate) fn new(
        config: &LmsConfig,
        options: ClientOptions,
        tokens: Arc<TokenStore>,
        session: Arc<SessionHandle>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(options.request_timeout)
            .build()?;
        let bare = Client::builder()
            .timeout(options.request_timeout)
            .build()?;

        Ok(Self {
            origin: config.origin(),
            client,
            bare,
            options,
            tokens,
            session,
            navigator,
            notifier,
            refresh: Mutex::new(RefreshState::default()),
        })
    }

    /// Execute a request and deserialize the unwrapped `data` payload
    pub(crate) async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let data = self.run(request).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Execute a request whose payload is empty or irrelevant
    pub(crate) async fn execute_unit(&self, request: ApiRequest) -> Result<()> {
        self.run(request).await.map(|_| ())
    }

    /// Execute a list request, normalizing legacy list shapes into the
    /// canonical [`Page`]
    pub(crate) async fn execute_page<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        page: u32,
        size: u32,
    ) -> Result<Page<T>> {
        let compat: PageCompat<T> = self.execute(request).await?;
        Ok(compat.normalize(page, size))
    }

    /// Drive one logical request to a terminal outcome.
    ///
    /// `retried` is the per-request one-shot flag: a second 401 on the
    /// same logical request is terminal, never another refresh.
    async fn run(&self, request: ApiRequest) -> Result<Value> {
        let mut retried = false;
        loop {
            match self.dispatch(&request).await {
                Dispatch::Data(value) => return Ok(value),
                Dispatch::ApiFailure { message, code } => {
                    self.notifier.error(&message);
                    return Err(Error::Api { message, code });
                }
                Dispatch::HttpFailure { status, message }
                    if status == StatusCode::UNAUTHORIZED =>
                {
                    let message = message.unwrap_or_else(|| status_message(status));

                    if request.path.starts_with(REFRESH_PATH) {
                        // The refresh endpoint rejecting its own
                        // credentials is unrecoverable.
                        self.force_logout().await;
                        self.notifier.error(SESSION_EXPIRED);
                        return Err(Error::Unauthorized(message));
                    }

                    if retried || !self.options.auto_refresh_token {
                        self.notifier.error(&message);
                        return Err(Error::Unauthorized(message));
                    }

                    retried = true;
                    match self.refresh_or_wait().await {
                        RefreshWait::Token(_) => continue,
                        RefreshWait::LeaderFailed => {
                            self.force_logout().await;
                            self.notifier.error(AUTH_FAILED);
                            return Err(Error::Unauthorized(message));
                        }
                        // Queued requests fail uniformly and quietly;
                        // the request that ran the refresh notifies.
                        RefreshWait::FollowerFailed => {
                            return Err(Error::Unauthorized(message));
                        }
                    }
                }
                Dispatch::HttpFailure { status, message }
                    if status == StatusCode::FORBIDDEN =>
                {
                    self.navigator.push(routes::FORBIDDEN).await;
                    let message = message.unwrap_or_else(|| status_message(status));
                    self.notifier.error(&message);
                    return Err(Error::Forbidden(message));
                }
                Dispatch::HttpFailure { status, message } => {
                    let message = message.unwrap_or_else(|| status_message(status));
                    self.notifier.error(&message);
                    return Err(Error::Status { status, message });
                }
                Dispatch::Transport(err) => {
                    self.notifier.error(&err.to_string());
                    return Err(Error::Http(err));
                }
                Dispatch::Decode(err) => {
                    self.notifier.error(GENERIC_ERROR);
                    return Err(Error::Json(err));
                }
            }
        }
    }

    /// One transit: attach headers, send, classify the response
    async fn dispatch(&self, request: &ApiRequest) -> Dispatch {
        let url = format!("{}{}", self.origin, request.path);
        let request_id = Uuid::new_v4();

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(REQUEST_ID_HEADER, request_id.to_string());

        if let Some(token) = self.tokens.access_token() {
            builder = builder.bearer_auth(token);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(%request_id, method = %request.method, path = %request.path, "dispatching request");

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => return Dispatch::Transport(err),
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => return Dispatch::Transport(err),
        };

        if status.is_success() {
            match serde_json::from_slice::<ApiResponse<Value>>(&bytes) {
                Ok(envelope) if envelope.success => {
                    Dispatch::Data(envelope.data.unwrap_or(Value::Null))
                }
                Ok(envelope) => {
                    let (message, code) = envelope
                        .error
                        .map(|err| (err.message, err.code))
                        .unwrap_or_else(|| (ENVELOPE_FALLBACK.to_string(), None));
                    Dispatch::ApiFailure { message, code }
                }
                Err(err) => Dispatch::Decode(err),
            }
        } else {
            Dispatch::HttpFailure {
                status,
                message: extract_error_message(&bytes),
            }
        }
    }

    /// Join the single in-flight refresh, starting one if none is running.
    ///
    /// The in-flight flag and the queue live under one lock, never held
    /// across an await: a request either becomes the leader (flag was
    /// clear) or enqueues a continuation. The leader clears the flag and
    /// takes the queue in the same critical section, then releases every
    /// waiter with the shared outcome in enqueue order.
    async fn refresh_or_wait(&self) -> RefreshWait {
        let waiter = {
            let mut state = self.refresh.lock().unwrap();
            if state.in_flight {
                let (tx, rx) = oneshot::channel();
                state.queue.push(tx);
                Some(rx)
            } else {
                state.in_flight = true;
                None
            }
        };

        match waiter {
            Some(rx) => {
                debug!("queued behind an in-flight token refresh");
                match rx.await {
                    Ok(Some(token)) => RefreshWait::Token(token),
                    _ => RefreshWait::FollowerFailed,
                }
            }
            None => {
                debug!("starting token refresh");
                let token = self.refresh_access_token().await;

                let waiters = {
                    let mut state = self.refresh.lock().unwrap();
                    state.in_flight = false;
                    std::mem::take(&mut state.queue)
                };
                if !waiters.is_empty() {
                    debug!(waiters = waiters.len(), "draining refresh queue");
                }
                for waiter in waiters {
                    let _ = waiter.send(token.clone());
                }

                match token {
                    Some(token) => RefreshWait::Token(token),
                    None => RefreshWait::LeaderFailed,
                }
            }
        }
    }

    /// Obtain a new token pair with the stored refresh token.
    ///
    /// Runs on the bare transport so nothing here can re-enter the 401
    /// handling above. Returns `None` on any failure rather than erroring.
    async fn refresh_access_token(&self) -> Option<String> {
        let refresh_token = self.tokens.refresh_token()?;
        let url = format!("{}{}", self.origin, REFRESH_PATH);

        let response = self
            .bare
            .post(&url)
            .json(&json!({ "refreshToken": refresh_token }))
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "token refresh rejected");
            return None;
        }

        let envelope = response.json::<ApiResponse<TokenPair>>().await.ok()?;
        if !envelope.success {
            return None;
        }
        let pair = envelope.data?;

        self.tokens.set_access(Some(pair.access_token.clone()));
        self.tokens.set_refresh(Some(&pair.refresh_token));
        Some(pair.access_token)
    }

    /// Unrecoverable session: drop tokens, null the session, land on login
    async fn force_logout(&self) {
        warn!("clearing session after unrecoverable authentication failure");
        self.tokens.clear();
        self.session.reset();
        if self.navigator.current_path() != routes::LOGIN {
            self.navigator.push(routes::LOGIN).await;
        }
    }
}

fn status_message(status: StatusCode) -> String {
    format!("Request failed with status code {}", status.as_u16())
}

fn extract_error_message(bytes: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorEnvelope>(bytes)
        .ok()
        .and_then(|envelope| envelope.error)
        .map(|err| err.message)
}
