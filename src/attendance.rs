//! Attendance views and recalculation operations

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::http::{ApiRequest, HttpClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MeetingAttendanceStatus {
    Present,
    Late,
    Absent,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherAttendanceRow {
    pub student_id: i64,
    pub full_name: String,
    pub attendance_pct: f64,
    #[serde(default)]
    pub last_meeting_status: Option<MeetingAttendanceStatus>,
    #[serde(default)]
    pub last_meeting_duration_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingsSummary {
    #[serde(default)]
    pub total_meetings: Option<u32>,
    #[serde(default)]
    pub average_attendance_pct: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherAttendanceResponse {
    pub course_id: i64,
    #[serde(default)]
    pub meetings_summary: Option<MeetingsSummary>,
    pub students: Vec<TeacherAttendanceRow>,
    pub page: u32,
    pub size: u32,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentMeetingAttendanceItem {
    pub meeting_id: i64,
    pub lesson_title: String,
    pub status: MeetingAttendanceStatus,
    pub duration_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAttendanceResponse {
    pub course_id: i64,
    pub attendance_pct: f64,
    pub meetings: Vec<StudentMeetingAttendanceItem>,
}

/// Client for attendance data
pub struct AttendanceClient {
    http: Arc<HttpClient>,
}

impl AttendanceClient {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn teacher_course_attendance(
        &self,
        course_id: i64,
        page: u32,
        size: u32,
        search: Option<&str>,
    ) -> Result<TeacherAttendanceResponse> {
        self.http
            .execute(
                ApiRequest::get(format!("/api/teacher/courses/{course_id}/attendance"))
                    .query("page", page)
                    .query("size", size)
                    .query_opt("search", search),
            )
            .await
    }

    pub async fn student_course_attendance(
        &self,
        course_id: i64,
    ) -> Result<StudentAttendanceResponse> {
        self.http
            .execute(ApiRequest::get(format!(
                "/api/student/courses/{course_id}/attendance"
            )))
            .await
    }

    /// Rebuild attendance figures for one meeting
    pub async fn admin_recalculate_meeting(&self, meeting_id: i64) -> Result<()> {
        self.http
            .execute_unit(ApiRequest::post(format!(
                "/api/admin/zoom/meetings/{meeting_id}/recalculate-attendance"
            )))
            .await
    }

    /// Rebuild attendance figures for a whole course
    pub async fn admin_recalculate_course(&self, course_id: i64) -> Result<()> {
        self.http
            .execute_unit(ApiRequest::post(format!(
                "/api/admin/courses/{course_id}/recalculate-attendance"
            )))
            .await
    }
}
