//! Admin user management

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::types::Role;
use crate::error::Result;
use crate::http::{ApiRequest, HttpClient};
use crate::pagination::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserStatus {
    Active,
    Blocked,
    Deleted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListItem {
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub status: UserStatus,
    pub roles: Vec<Role>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub roles: Vec<Role>,
}

/// Client for administering user accounts
pub struct UsersClient {
    http: Arc<HttpClient>,
}

impl UsersClient {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn list(
        &self,
        page: u32,
        size: u32,
        search: Option<&str>,
    ) -> Result<Page<UserListItem>> {
        let request = ApiRequest::get("/api/admin/users")
            .query("page", page)
            .query("size", size)
            .query_opt("search", search);
        self.http.execute_page(request, page, size).await
    }

    pub async fn get(&self, id: &str) -> Result<UserListItem> {
        self.http
            .execute(ApiRequest::get(format!("/api/admin/users/{id}")))
            .await
    }

    pub async fn create(&self, payload: &CreateUserRequest) -> Result<UserListItem> {
        self.http
            .execute(ApiRequest::post("/api/admin/users").json(serde_json::to_value(payload)?))
            .await
    }

    pub async fn update(&self, id: &str, payload: &UpdateUserRequest) -> Result<UserListItem> {
        self.http
            .execute(
                ApiRequest::put(format!("/api/admin/users/{id}"))
                    .json(serde_json::to_value(payload)?),
            )
            .await
    }

    /// Block, unblock or soft-delete an account
    pub async fn update_status(&self, id: &str, status: UserStatus) -> Result<UserListItem> {
        self.http
            .execute(
                ApiRequest::patch(format!("/api/admin/users/{id}/status"))
                    .json(json!({ "status": status })),
            )
            .await
    }
}
