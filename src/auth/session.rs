//! Shared session state
//!
//! The request pipeline needs to null the session on a forced logout, and
//! the auth client needs to populate it after login. Both hold the same
//! [`SessionHandle`] rather than each other, so there is no dependency
//! cycle between the pipeline and the auth layer.

use std::sync::RwLock;

use super::types::{Role, UserProfile};

#[derive(Debug, Default)]
struct SessionState {
    initialized: bool,
    user: Option<UserProfile>,
}

/// Mutable session state shared between the pipeline and the auth client
#[derive(Debug, Default)]
pub struct SessionHandle {
    state: RwLock<SessionState>,
}

impl SessionHandle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether `initialize` has already run for this client lifetime
    pub fn initialized(&self) -> bool {
        self.state.read().unwrap().initialized
    }

    pub(crate) fn mark_initialized(&self) {
        self.state.write().unwrap().initialized = true;
    }

    /// The loaded profile of the signed-in user, if any
    pub fn user(&self) -> Option<UserProfile> {
        self.state.read().unwrap().user.clone()
    }

    pub(crate) fn set_user(&self, user: Option<UserProfile>) {
        self.state.write().unwrap().user = user;
    }

    /// Whether the user holds the given role
    pub fn has_role(&self, role: Role) -> bool {
        self.state
            .read()
            .unwrap()
            .user
            .as_ref()
            .map(|user| user.roles.contains(&role))
            .unwrap_or(false)
    }

    /// Null the user; initialization state is kept so `initialize`
    /// remains a no-op after a forced logout.
    pub(crate) fn reset(&self) {
        self.state.write().unwrap().user = None;
    }
}
