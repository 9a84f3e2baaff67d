//! Route-level authorization
//!
//! [`SessionGuard`] decides, per navigation, whether the current user may
//! view a target screen. The first check of a client lifetime also
//! bootstraps the session (silent refresh + profile fetch) so a stored
//! refresh token survives an app restart without re-login.

use std::sync::Arc;

use crate::auth::types::Role;
use crate::auth::Auth;
use crate::router::{dashboard_for, routes, Navigator};

/// Authorization requirements a screen declares
#[derive(Debug, Clone, Default)]
pub struct RouteMeta {
    /// Whether the screen needs a signed-in user at all
    pub requires_auth: bool,
    /// Roles that may view the screen; empty means any signed-in user.
    /// Matching is any-of: holding one listed role is enough.
    pub roles: Vec<Role>,
}

/// A navigation target: the destination path plus its requirements
#[derive(Debug, Clone)]
pub struct RouteTarget {
    pub path: String,
    pub meta: RouteMeta,
}

impl RouteTarget {
    /// A public screen with no requirements
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            meta: RouteMeta::default(),
        }
    }

    /// Require a signed-in user
    pub fn requires_auth(mut self) -> Self {
        self.meta.requires_auth = true;
        self
    }

    /// Require one of the given roles (implies `requires_auth`)
    pub fn with_roles(mut self, roles: &[Role]) -> Self {
        self.meta.requires_auth = true;
        self.meta.roles = roles.to_vec();
        self
    }
}

/// Verdict for one navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

/// Per-navigation authorization checks
pub struct SessionGuard {
    auth: Arc<Auth>,
    navigator: Arc<dyn Navigator>,
}

impl SessionGuard {
    pub(crate) fn new(auth: Arc<Auth>, navigator: Arc<dyn Navigator>) -> Self {
        Self { auth, navigator }
    }

    /// Decide whether the navigation may proceed.
    ///
    /// Ensures session initialization has run (a no-op after the first
    /// navigation), then applies the checks in order: authentication,
    /// roles, and the login-while-authenticated redirect.
    pub async fn check(&self, to: &RouteTarget) -> GuardDecision {
        self.auth.initialize().await;

        if to.meta.requires_auth && !self.auth.is_authenticated() {
            return GuardDecision::Redirect(routes::LOGIN);
        }

        if !to.meta.roles.is_empty()
            && !to.meta.roles.iter().any(|role| self.auth.has_role(*role))
        {
            return GuardDecision::Redirect(routes::FORBIDDEN);
        }

        if to.path == routes::LOGIN && self.auth.is_authenticated() {
            let primary = self.auth.user().and_then(|user| user.primary_role());
            return GuardDecision::Redirect(dashboard_for(primary));
        }

        GuardDecision::Allow
    }

    /// Check the navigation and perform the redirect when one is due
    pub async fn resolve(&self, to: &RouteTarget) -> GuardDecision {
        let decision = self.check(to).await;
        if let GuardDecision::Redirect(path) = &decision {
            self.navigator.push(path).await;
        }
        decision
    }
}
