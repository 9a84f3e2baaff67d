//! Course catalogue and course-structure operations

mod types;

use std::sync::Arc;

use serde_json::json;

use crate::error::Result;
use crate::http::{ApiRequest, HttpClient};
use crate::pagination::Page;

pub use types::*;

/// Client for course CRUD and course modules
pub struct CoursesClient {
    http: Arc<HttpClient>,
}

impl CoursesClient {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// List courses with paging, optional search and status filter
    pub async fn list(
        &self,
        page: u32,
        size: u32,
        search: Option<&str>,
        status: Option<CourseStatus>,
    ) -> Result<Page<CourseListItem>> {
        let request = ApiRequest::get("/api/courses")
            .query("page", page)
            .query("size", size)
            .query_opt("search", search)
            .query_opt("status", status.map(|status| status.as_str()));
        self.http.execute_page(request, page, size).await
    }

    pub async fn get(&self, id: i64) -> Result<CourseDetail> {
        self.http
            .execute(ApiRequest::get(format!("/api/courses/{id}")))
            .await
    }

    pub async fn create(&self, payload: &CreateCourseRequest) -> Result<CourseDetail> {
        self.http
            .execute(ApiRequest::post("/api/courses").json(serde_json::to_value(payload)?))
            .await
    }

    pub async fn update(&self, id: i64, payload: &UpdateCourseRequest) -> Result<CourseDetail> {
        self.http
            .execute(
                ApiRequest::put(format!("/api/courses/{id}")).json(serde_json::to_value(payload)?),
            )
            .await
    }

    /// Move a course through its publication lifecycle
    pub async fn update_status(&self, id: i64, status: CourseStatus) -> Result<CourseDetail> {
        self.http
            .execute(
                ApiRequest::patch(format!("/api/courses/{id}/status"))
                    .json(json!({ "status": status })),
            )
            .await
    }

    pub async fn list_modules(&self, course_id: i64) -> Result<Vec<CourseModule>> {
        self.http
            .execute(ApiRequest::get(format!("/api/courses/{course_id}/modules")))
            .await
    }

    pub async fn create_module(&self, course_id: i64, title: &str) -> Result<CourseModule> {
        self.http
            .execute(
                ApiRequest::post(format!("/api/courses/{course_id}/modules"))
                    .json(json!({ "title": title })),
            )
            .await
    }

    pub async fn update_module(&self, module_id: i64, title: &str) -> Result<CourseModule> {
        self.http
            .execute(
                ApiRequest::put(format!("/api/modules/{module_id}"))
                    .json(json!({ "title": title })),
            )
            .await
    }

    pub async fn delete_module(&self, module_id: i64) -> Result<()> {
        self.http
            .execute_unit(ApiRequest::delete(format!("/api/modules/{module_id}")))
            .await
    }

    /// Persist a new ordering for a course's modules
    pub async fn reorder_modules(&self, course_id: i64, module_ids_in_order: &[i64]) -> Result<()> {
        self.http
            .execute_unit(
                ApiRequest::post(format!("/api/courses/{course_id}/modules/reorder"))
                    .json(json!({ "moduleIdsInOrder": module_ids_in_order })),
            )
            .await
    }
}
