//! Navigation surface consumed by the auth layer
//!
//! The client moves the user between screens (login, forbidden, the
//! role dashboards) but owns no routing itself; embedders inject a
//! [`Navigator`] wired to whatever screen stack they use.

use async_trait::async_trait;

use crate::auth::types::Role;

/// Well-known application routes
pub mod routes {
    pub const LOGIN: &str = "/login";
    pub const FORBIDDEN: &str = "/forbidden";
    pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";
    pub const TEACHER_DASHBOARD: &str = "/teacher/dashboard";
    pub const STUDENT_DASHBOARD: &str = "/student/dashboard";
}

/// The dashboard route for a user's primary (first declared) role.
///
/// `None` maps to the forbidden screen: an authenticated user without any
/// role has nowhere meaningful to land.
pub fn dashboard_for(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Admin) => routes::ADMIN_DASHBOARD,
        Some(Role::Teacher) => routes::TEACHER_DASHBOARD,
        Some(Role::Student) => routes::STUDENT_DASHBOARD,
        None => routes::FORBIDDEN,
    }
}

/// Capability for redirecting the user to another screen
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Navigate to the given path
    async fn push(&self, path: &str);

    /// The path currently on screen
    fn current_path(&self) -> String;
}

/// Navigator that goes nowhere; useful for headless embedders and tests
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

#[async_trait]
impl Navigator for NoopNavigator {
    async fn push(&self, _path: &str) {}

    fn current_path(&self) -> String {
        "/".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_mapping_is_fixed() {
        assert_eq!(dashboard_for(Some(Role::Admin)), "/admin/dashboard");
        assert_eq!(dashboard_for(Some(Role::Teacher)), "/teacher/dashboard");
        assert_eq!(dashboard_for(Some(Role::Student)), "/student/dashboard");
        assert_eq!(dashboard_for(None), "/forbidden");
    }
}
