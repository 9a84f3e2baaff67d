//! Course progress and completion rules

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::http::{ApiRequest, HttpClient};
use crate::pagination::PageCompat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressStatus {
    InProgress,
    Completed,
}

/// Thresholds a student must clear for a course to count as completed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRules {
    pub min_attendance_pct: f64,
    pub min_video_pct: f64,
    pub min_test_score_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCourseProgress {
    pub attendance_pct: f64,
    pub video_completion_pct: f64,
    pub best_test_score_pct: f64,
    pub status: ProgressStatus,
    #[serde(default)]
    pub completed_at: Option<String>,
    pub rules: CompletionRules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherStudentProgressRow {
    pub student_id: i64,
    pub full_name: String,
    pub attendance_pct: f64,
    pub video_completion_pct: f64,
    pub best_test_score_pct: f64,
    pub status: ProgressStatus,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherCourseProgressResponse {
    pub course_id: i64,
    pub students: Vec<TeacherStudentProgressRow>,
    pub page: u32,
    pub size: u32,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecalcProgressResponse {
    pub total: u32,
    pub updated_completed: u32,
    pub updated_in_progress: u32,
}

/// Response shapes the teacher-progress endpoint is known to emit; the
/// full response is the contract, the page shapes are the legacy shim
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TeacherProgressCompat {
    Full(TeacherCourseProgressResponse),
    Rows(PageCompat<TeacherStudentProgressRow>),
}

/// Client for progress tracking and completion administration
pub struct ProgressClient {
    http: Arc<HttpClient>,
}

impl ProgressClient {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn student_course_progress(&self, course_id: i64) -> Result<StudentCourseProgress> {
        self.http
            .execute(ApiRequest::get(format!(
                "/api/student/courses/{course_id}/progress"
            )))
            .await
    }

    pub async fn teacher_course_progress(
        &self,
        course_id: i64,
        page: u32,
        size: u32,
        search: Option<&str>,
    ) -> Result<TeacherCourseProgressResponse> {
        let compat: TeacherProgressCompat = self
            .http
            .execute(
                ApiRequest::get(format!("/api/teacher/courses/{course_id}/progress"))
                    .query("page", page)
                    .query("size", size)
                    .query_opt("search", search),
            )
            .await?;

        Ok(match compat {
            TeacherProgressCompat::Full(response) => response,
            TeacherProgressCompat::Rows(rows) => {
                let rows = rows.normalize(page, size);
                TeacherCourseProgressResponse {
                    course_id,
                    students: rows.items,
                    page: rows.page,
                    size: rows.size,
                    total: rows.total,
                }
            }
        })
    }

    pub async fn admin_completion_rules(&self, course_id: i64) -> Result<CompletionRules> {
        self.http
            .execute(ApiRequest::get(format!(
                "/api/admin/courses/{course_id}/completion-rules"
            )))
            .await
    }

    pub async fn admin_update_completion_rules(
        &self,
        course_id: i64,
        rules: &CompletionRules,
    ) -> Result<CompletionRules> {
        self.http
            .execute(
                ApiRequest::put(format!("/api/admin/courses/{course_id}/completion-rules"))
                    .json(serde_json::to_value(rules)?),
            )
            .await
    }

    /// Re-evaluate every enrolled student against the completion rules
    pub async fn admin_recalculate(&self, course_id: i64) -> Result<RecalcProgressResponse> {
        self.http
            .execute(ApiRequest::post(format!(
                "/api/admin/courses/{course_id}/recalculate-progress"
            )))
            .await
    }
}
