//! LMS Rust Client Library
//!
//! A Rust client for a learning-management-system REST API: session
//! management with transparent access-token refresh, role-based screen
//! guarding, and typed clients for courses, lessons, exams, enrollment,
//! attendance, progress, video telemetry and certificates.
//!
//! Every response travels in a uniform envelope which the request
//! pipeline unwraps; callers only ever see the payload. A 401 is
//! recovered transparently by refreshing the access token, with
//! concurrent requests coalescing onto a single refresh.

pub mod attendance;
pub mod auth;
pub mod certificate;
pub mod config;
pub mod courses;
pub mod enrollment;
pub mod error;
pub mod exam;
pub mod guard;
pub mod http;
pub mod lessons;
pub mod notify;
pub mod pagination;
pub mod progress;
pub mod router;
pub mod token;
pub mod users;
pub mod video;

use std::sync::Arc;

use crate::attendance::AttendanceClient;
use crate::auth::session::SessionHandle;
use crate::auth::Auth;
use crate::certificate::CertificateClient;
use crate::config::{ClientOptions, LmsConfig};
use crate::courses::CoursesClient;
use crate::enrollment::EnrollmentClient;
use crate::error::Result;
use crate::exam::ExamClient;
use crate::guard::SessionGuard;
use crate::http::HttpClient;
use crate::lessons::LessonsClient;
use crate::notify::Notifier;
use crate::progress::ProgressClient;
use crate::router::Navigator;
use crate::token::{MemoryTokenStorage, TokenStore, TokenStorage};
use crate::users::UsersClient;
use crate::video::VideoClient;

/// The main entry point for the LMS Rust client
pub struct LmsClient {
    http: Arc<HttpClient>,
    tokens: Arc<TokenStore>,
    auth: Arc<Auth>,
    navigator: Arc<dyn Navigator>,
}

impl LmsClient {
    /// Create a new client with default options and in-memory token
    /// storage.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use lms_client::LmsClient;
    /// use lms_client::notify::NoopNotifier;
    /// use lms_client::router::NoopNavigator;
    ///
    /// let client = LmsClient::new(
    ///     "https://lms.example.com",
    ///     Arc::new(NoopNavigator),
    ///     Arc::new(NoopNotifier),
    /// ).unwrap();
    /// ```
    pub fn new(
        base_url: &str,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        Self::new_with_options(
            LmsConfig::new(base_url)?,
            ClientOptions::default(),
            Box::new(MemoryTokenStorage::new()),
            navigator,
            notifier,
        )
    }

    /// Create a new client with custom options and a durable token
    /// storage slot (see [`token::FileTokenStorage`])
    pub fn new_with_options(
        config: LmsConfig,
        options: ClientOptions,
        storage: Box<dyn TokenStorage>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let tokens = Arc::new(TokenStore::new(storage));
        let session = Arc::new(SessionHandle::new());

        let http = Arc::new(HttpClient::new(
            &config,
            options,
            tokens.clone(),
            session.clone(),
            navigator.clone(),
            notifier,
        )?);

        let auth = Arc::new(Auth::new(
            http.clone(),
            tokens.clone(),
            session,
            navigator.clone(),
        ));

        Ok(Self {
            http,
            tokens,
            auth,
            navigator,
        })
    }

    /// The authentication and session client
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// The token store backing this client
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Create a route guard bound to this client's session
    pub fn guard(&self) -> SessionGuard {
        SessionGuard::new(self.auth.clone(), self.navigator.clone())
    }

    pub fn courses(&self) -> CoursesClient {
        CoursesClient::new(self.http.clone())
    }

    pub fn lessons(&self) -> LessonsClient {
        LessonsClient::new(self.http.clone())
    }

    pub fn exam(&self) -> ExamClient {
        ExamClient::new(self.http.clone())
    }

    pub fn enrollment(&self) -> EnrollmentClient {
        EnrollmentClient::new(self.http.clone())
    }

    pub fn attendance(&self) -> AttendanceClient {
        AttendanceClient::new(self.http.clone())
    }

    pub fn progress(&self) -> ProgressClient {
        ProgressClient::new(self.http.clone())
    }

    pub fn video(&self) -> VideoClient {
        VideoClient::new(self.http.clone())
    }

    pub fn certificate(&self) -> CertificateClient {
        CertificateClient::new(self.http.clone())
    }

    pub fn users(&self) -> UsersClient {
        UsersClient::new(self.http.clone())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::types::{Role, TokenPair, UserProfile};
    pub use crate::config::{ClientOptions, LmsConfig};
    pub use crate::error::Error;
    pub use crate::guard::{GuardDecision, RouteTarget};
    pub use crate::pagination::Page;
    pub use crate::LmsClient;
}
