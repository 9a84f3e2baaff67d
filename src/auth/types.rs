//! Wire types for authentication and the current user

use serde::{Deserialize, Serialize};

/// Roles a user can hold; role checks are any-of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

/// Access/refresh token pair issued by login and refresh
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Profile of the signed-in user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub roles: Vec<Role>,
}

impl UserProfile {
    /// The first declared role, used to pick a dashboard
    pub fn primary_role(&self) -> Option<Role> {
        self.roles.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_use_screaming_case_on_the_wire() {
        let role: Role = serde_json::from_str("\"TEACHER\"").unwrap();
        assert_eq!(role, Role::Teacher);
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
    }
}
