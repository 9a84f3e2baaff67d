//! Lesson operations within a course module

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crate::courses::{Lesson, LessonType};
use crate::error::Result;
use crate::http::{ApiRequest, HttpClient};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLessonRequest {
    pub title: String,
    pub lesson_type: LessonType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_at: Option<String>,
}

pub type UpdateLessonRequest = CreateLessonRequest;

/// Client for lesson CRUD and ordering
pub struct LessonsClient {
    http: Arc<HttpClient>,
}

impl LessonsClient {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn list(&self, module_id: i64) -> Result<Vec<Lesson>> {
        self.http
            .execute(ApiRequest::get(format!("/api/modules/{module_id}/lessons")))
            .await
    }

    pub async fn create(&self, module_id: i64, payload: &CreateLessonRequest) -> Result<Lesson> {
        self.http
            .execute(
                ApiRequest::post(format!("/api/modules/{module_id}/lessons"))
                    .json(serde_json::to_value(payload)?),
            )
            .await
    }

    pub async fn update(&self, lesson_id: i64, payload: &UpdateLessonRequest) -> Result<Lesson> {
        self.http
            .execute(
                ApiRequest::put(format!("/api/lessons/{lesson_id}"))
                    .json(serde_json::to_value(payload)?),
            )
            .await
    }

    pub async fn delete(&self, lesson_id: i64) -> Result<()> {
        self.http
            .execute_unit(ApiRequest::delete(format!("/api/lessons/{lesson_id}")))
            .await
    }

    /// Persist a new ordering for a module's lessons
    pub async fn reorder(&self, module_id: i64, lesson_ids_in_order: &[i64]) -> Result<()> {
        self.http
            .execute_unit(
                ApiRequest::post(format!("/api/modules/{module_id}/lessons/reorder"))
                    .json(json!({ "lessonIdsInOrder": lesson_ids_in_order })),
            )
            .await
    }
}
