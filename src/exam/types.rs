//! Wire types for the question bank, quizzes and student attempts

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAdmin {
    pub id: i64,
    pub text: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    pub created_at: String,
    /// Only present for the roles allowed to see the answer key
    #[serde(default)]
    pub correct_index: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

pub type UpdateQuestionRequest = CreateQuestionRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAdmin {
    pub id: i64,
    pub course_id: i64,
    #[serde(default)]
    pub lesson_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub time_limit_sec: Option<u32>,
    pub max_attempts: u32,
    pub pass_score_pct: u32,
    pub is_active: bool,
    #[serde(default)]
    pub question_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    pub course_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_id: Option<i64>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit_sec: Option<u32>,
    pub max_attempts: u32,
    pub pass_score_pct: u32,
    pub is_active: bool,
}

pub type UpdateQuizRequest = CreateQuizRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentQuizListItem {
    pub quiz_id: i64,
    pub title: String,
    #[serde(default)]
    pub lesson_id: Option<i64>,
    pub pass_score_pct: u32,
    pub max_attempts: u32,
    pub attempts_used: u32,
    pub can_start: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptQuestion {
    pub question_id: i64,
    pub text: String,
    pub options: Vec<String>,
}

/// An in-progress attempt as handed to the student: questions only,
/// never the answer key
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentQuizAttempt {
    pub attempt_id: i64,
    pub quiz_id: i64,
    #[serde(default)]
    pub time_limit_sec: Option<u32>,
    pub questions: Vec<AttemptQuestion>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptAnswer {
    pub question_id: i64,
    /// `None` marks the question as skipped
    pub selected_index: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentQuizResult {
    pub attempt_id: i64,
    pub quiz_id: i64,
    pub total_questions: u32,
    pub correct_count: u32,
    pub score_pct: u32,
    pub passed: bool,
    pub finished_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptHistoryItem {
    pub attempt_no: u32,
    pub score_pct: u32,
    pub passed: bool,
    pub started_at: String,
    #[serde(default)]
    pub finished_at: Option<String>,
    pub status: String,
}
