//! Enrollment management and the student course catalogue

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::courses::{CourseStatus, LessonType};
use crate::error::Result;
use crate::http::{ApiRequest, HttpClient};
use crate::pagination::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EnrollmentStatus {
    Active,
    Paused,
    Removed,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Paused => "PAUSED",
            Self::Removed => "REMOVED",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentStudent {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentListItem {
    pub enrollment_id: i64,
    pub course_id: i64,
    pub enrollment_status: EnrollmentStatus,
    pub enrolled_at: String,
    pub student: EnrollmentStudent,
}

/// Outcome of enrolling a batch of students at once
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEnrollResult {
    pub total: u32,
    pub created: u32,
    pub reactivated: u32,
    pub skipped: u32,
    pub failed: u32,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCourseListItem {
    pub course_id: i64,
    pub title: String,
    #[serde(default)]
    pub cover_url: Option<String>,
    pub status: CourseStatus,
    pub enrolled_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCourseLesson {
    pub id: i64,
    pub title: String,
    pub lesson_type: LessonType,
    pub sort_order: i32,
    #[serde(default)]
    pub available_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCourseModule {
    pub id: i64,
    pub title: String,
    pub sort_order: i32,
    pub lessons: Vec<StudentCourseLesson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCourseDetail {
    pub course_id: i64,
    pub title: String,
    #[serde(default)]
    pub cover_url: Option<String>,
    pub status: CourseStatus,
    pub modules: Vec<StudentCourseModule>,
}

/// Client for enrollment administration and the student's own courses
pub struct EnrollmentClient {
    http: Arc<HttpClient>,
}

impl EnrollmentClient {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn admin_list(
        &self,
        course_id: i64,
        page: u32,
        size: u32,
        search: Option<&str>,
    ) -> Result<Page<EnrollmentListItem>> {
        let request = ApiRequest::get(format!("/api/admin/courses/{course_id}/enrollments"))
            .query("page", page)
            .query("size", size)
            .query_opt("search", search);
        self.http.execute_page(request, page, size).await
    }

    /// Enroll a batch of students into a course in one call
    pub async fn admin_bulk_enroll(
        &self,
        course_id: i64,
        student_ids: &[i64],
    ) -> Result<BulkEnrollResult> {
        self.http
            .execute(
                ApiRequest::post(format!("/api/admin/courses/{course_id}/enrollments"))
                    .json(json!({ "studentIds": student_ids })),
            )
            .await
    }

    pub async fn admin_update_status(
        &self,
        enrollment_id: i64,
        status: EnrollmentStatus,
    ) -> Result<()> {
        self.http
            .execute_unit(
                ApiRequest::patch(format!("/api/admin/enrollments/{enrollment_id}/status"))
                    .json(json!({ "status": status })),
            )
            .await
    }

    pub async fn admin_remove(&self, enrollment_id: i64) -> Result<()> {
        self.http
            .execute_unit(ApiRequest::delete(format!(
                "/api/admin/enrollments/{enrollment_id}"
            )))
            .await
    }

    pub async fn teacher_list_students(
        &self,
        course_id: i64,
        page: u32,
        size: u32,
        search: Option<&str>,
    ) -> Result<Page<EnrollmentListItem>> {
        let request = ApiRequest::get(format!("/api/teacher/courses/{course_id}/students"))
            .query("page", page)
            .query("size", size)
            .query_opt("search", search);
        self.http.execute_page(request, page, size).await
    }

    pub async fn student_my_courses(
        &self,
        page: u32,
        size: u32,
    ) -> Result<Page<StudentCourseListItem>> {
        let request = ApiRequest::get("/api/student/courses")
            .query("page", page)
            .query("size", size);
        self.http.execute_page(request, page, size).await
    }

    pub async fn student_course_detail(&self, course_id: i64) -> Result<StudentCourseDetail> {
        self.http
            .execute(ApiRequest::get(format!("/api/student/courses/{course_id}")))
            .await
    }
}
