//! Lesson video playback and watch-progress telemetry
//!
//! The telemetry payload is a passive data-collection contract: the
//! client reports what the player observed (watched seconds, tab
//! visibility, seek attempts) and the server decides what counts.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::http::{ApiRequest, HttpClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VideoStatus {
    Ready,
    Pending,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonVideoResponse {
    pub status: VideoStatus,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub expires_in_seconds: Option<u64>,
    #[serde(default)]
    pub checksum_sha256: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSessionResponse {
    pub session_id: String,
    pub lesson_id: i64,
    pub server_time: String,
    pub required_completion_pct: f64,
}

/// One watch-progress report, sent periodically while the player runs
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoProgressEvent {
    pub session_id: String,
    pub current_second: u64,
    pub watched_delta_seconds: u64,
    pub total_seconds: u64,
    pub event_time: String,
    pub tab_visible: bool,
    pub tab_switch_count_delta: u32,
    pub seek_attempt_delta: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoProgressResponse {
    pub accepted: bool,
    pub completion_pct: f64,
    pub can_unlock_quiz: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoProgressSnapshot {
    pub watched_seconds: u64,
    pub total_seconds: u64,
    pub completion_pct: f64,
    #[serde(default)]
    pub suspicious_flags: Option<Value>,
    #[serde(default)]
    pub last_event_at: Option<String>,
}

/// Client for lesson video delivery and telemetry
pub struct VideoClient {
    http: Arc<HttpClient>,
}

impl VideoClient {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn lesson_video(&self, lesson_id: i64) -> Result<LessonVideoResponse> {
        self.http
            .execute(ApiRequest::get(format!(
                "/api/student/lessons/{lesson_id}/video"
            )))
            .await
    }

    /// Open a watch session; progress events must carry its id
    pub async fn create_session(&self, lesson_id: i64) -> Result<VideoSessionResponse> {
        self.http
            .execute(ApiRequest::post(format!(
                "/api/student/lessons/{lesson_id}/video/session"
            )))
            .await
    }

    pub async fn send_progress(
        &self,
        lesson_id: i64,
        event: &VideoProgressEvent,
    ) -> Result<VideoProgressResponse> {
        self.http
            .execute(
                ApiRequest::post(format!("/api/student/lessons/{lesson_id}/video/progress"))
                    .json(serde_json::to_value(event)?),
            )
            .await
    }

    pub async fn progress_snapshot(&self, lesson_id: i64) -> Result<VideoProgressSnapshot> {
        self.http
            .execute(ApiRequest::get(format!(
                "/api/student/lessons/{lesson_id}/video/progress"
            )))
            .await
    }
}
