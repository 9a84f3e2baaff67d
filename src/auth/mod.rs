//! Authentication and session lifecycle for the LMS client

pub(crate) mod session;
pub mod types;

use std::sync::Arc;

use serde_json::json;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::error::Result;
use crate::http::{ApiRequest, HttpClient, REFRESH_PATH};
use crate::router::{routes, Navigator};
use crate::token::TokenStore;

pub use session::SessionHandle;
pub use types::{Role, TokenPair, UserProfile};

const LOGIN_PATH: &str = "/api/auth/login";
const LOGOUT_PATH: &str = "/api/auth/logout";
const ME_PATH: &str = "/api/auth/me";

/// Client for authentication and the current session
pub struct Auth {
    http: Arc<HttpClient>,
    tokens: Arc<TokenStore>,
    session: Arc<SessionHandle>,
    navigator: Arc<dyn Navigator>,
    init: OnceCell<()>,
}

impl Auth {
    pub(crate) fn new(
        http: Arc<HttpClient>,
        tokens: Arc<TokenStore>,
        session: Arc<SessionHandle>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            http,
            tokens,
            session,
            navigator,
            init: OnceCell::new(),
        }
    }

    /// Whether an access token is present and a profile has been loaded
    pub fn is_authenticated(&self) -> bool {
        self.tokens.access_token().is_some() && self.session.user().is_some()
    }

    /// The signed-in user's profile, if loaded
    pub fn user(&self) -> Option<UserProfile> {
        self.session.user()
    }

    /// Whether the signed-in user holds the given role
    pub fn has_role(&self, role: Role) -> bool {
        self.session.has_role(role)
    }

    /// Sign in with email and password, then load the profile
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile> {
        let pair: TokenPair = self
            .http
            .execute(ApiRequest::post(LOGIN_PATH).json(json!({
                "email": email,
                "password": password,
            })))
            .await?;

        self.store_pair(&pair);
        let profile = self.fetch_me().await?;
        Ok(profile)
    }

    /// Exchange the stored refresh token for a new pair.
    ///
    /// Returns `false` without a network call when no refresh token is
    /// stored.
    pub async fn refresh(&self) -> Result<bool> {
        let Some(refresh_token) = self.tokens.refresh_token() else {
            return Ok(false);
        };

        let pair: TokenPair = self
            .http
            .execute(ApiRequest::post(REFRESH_PATH).json(json!({
                "refreshToken": refresh_token,
            })))
            .await?;

        self.store_pair(&pair);
        Ok(true)
    }

    /// Load the signed-in user's profile into the session
    pub async fn fetch_me(&self) -> Result<UserProfile> {
        let profile: UserProfile = self.http.execute(ApiRequest::get(ME_PATH)).await?;
        self.session.set_user(Some(profile.clone()));
        Ok(profile)
    }

    /// Sign out: revoke the refresh token server-side when possible,
    /// drop all session state, land on the login screen.
    pub async fn logout(&self) {
        if let Some(refresh_token) = self.tokens.refresh_token() {
            // Revocation is best-effort; a dead server must not keep the
            // user signed in locally.
            let revoke = self
                .http
                .execute_unit(ApiRequest::post(LOGOUT_PATH).json(json!({
                    "refreshToken": refresh_token,
                })))
                .await;
            if let Err(err) = revoke {
                debug!(%err, "ignoring logout revocation failure");
            }
        }

        self.tokens.clear();
        self.session.set_user(None);
        if self.navigator.current_path() != routes::LOGIN {
            self.navigator.push(routes::LOGIN).await;
        }
    }

    /// Bootstrap the session once per client lifetime.
    ///
    /// Concurrent callers coalesce onto the same initialization; later
    /// calls are no-ops. If a refresh token is stored, attempts a silent
    /// refresh and profile fetch; on failure the session is torn down.
    pub async fn initialize(&self) {
        self.init
            .get_or_init(|| async {
                self.session.mark_initialized();

                if self.tokens.refresh_token().is_none() {
                    debug!("no stored refresh token; starting unauthenticated");
                    return;
                }

                match self.refresh().await {
                    Ok(true) => {
                        if let Err(err) = self.fetch_me().await {
                            warn!(%err, "profile fetch failed during session bootstrap");
                            self.logout().await;
                        }
                    }
                    Ok(false) => {}
                    Err(err) => {
                        warn!(%err, "silent refresh failed during session bootstrap");
                        self.logout().await;
                    }
                }
            })
            .await;
    }

    fn store_pair(&self, pair: &TokenPair) {
        self.tokens.set_access(Some(pair.access_token.clone()));
        self.tokens.set_refresh(Some(&pair.refresh_token));
    }
}
