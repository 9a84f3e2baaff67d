//! Exams: question bank and quiz administration, student attempts

mod types;

use std::sync::Arc;

use serde_json::json;

use crate::error::Result;
use crate::http::{ApiRequest, HttpClient};
use crate::pagination::Page;

pub use types::*;

/// Client for exam administration and taking quizzes
pub struct ExamClient {
    http: Arc<HttpClient>,
}

impl ExamClient {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    // Question bank (admin/teacher)

    pub async fn list_questions(
        &self,
        page: u32,
        size: u32,
        search: Option<&str>,
    ) -> Result<Page<QuestionAdmin>> {
        let request = ApiRequest::get("/api/exam/questions")
            .query("page", page)
            .query("size", size)
            .query_opt("search", search);
        self.http.execute_page(request, page, size).await
    }

    pub async fn create_question(&self, payload: &CreateQuestionRequest) -> Result<QuestionAdmin> {
        self.http
            .execute(ApiRequest::post("/api/exam/questions").json(serde_json::to_value(payload)?))
            .await
    }

    pub async fn update_question(
        &self,
        id: i64,
        payload: &UpdateQuestionRequest,
    ) -> Result<QuestionAdmin> {
        self.http
            .execute(
                ApiRequest::put(format!("/api/exam/questions/{id}"))
                    .json(serde_json::to_value(payload)?),
            )
            .await
    }

    pub async fn delete_question(&self, id: i64) -> Result<()> {
        self.http
            .execute_unit(ApiRequest::delete(format!("/api/exam/questions/{id}")))
            .await
    }

    // Quizzes (admin/teacher)

    pub async fn list_quizzes(
        &self,
        course_id: i64,
        page: u32,
        size: u32,
    ) -> Result<Page<QuizAdmin>> {
        let request = ApiRequest::get("/api/exam/quizzes")
            .query("courseId", course_id)
            .query("page", page)
            .query("size", size);
        self.http.execute_page(request, page, size).await
    }

    pub async fn create_quiz(&self, payload: &CreateQuizRequest) -> Result<QuizAdmin> {
        self.http
            .execute(ApiRequest::post("/api/exam/quizzes").json(serde_json::to_value(payload)?))
            .await
    }

    pub async fn update_quiz(&self, id: i64, payload: &UpdateQuizRequest) -> Result<QuizAdmin> {
        self.http
            .execute(
                ApiRequest::put(format!("/api/exam/quizzes/{id}"))
                    .json(serde_json::to_value(payload)?),
            )
            .await
    }

    pub async fn delete_quiz(&self, id: i64) -> Result<()> {
        self.http
            .execute_unit(ApiRequest::delete(format!("/api/exam/quizzes/{id}")))
            .await
    }

    pub async fn attach_questions(&self, quiz_id: i64, question_ids: &[i64]) -> Result<()> {
        self.http
            .execute_unit(
                ApiRequest::post(format!("/api/exam/quizzes/{quiz_id}/questions"))
                    .json(json!({ "questionIds": question_ids })),
            )
            .await
    }

    pub async fn reorder_quiz_questions(
        &self,
        quiz_id: i64,
        question_ids_in_order: &[i64],
    ) -> Result<()> {
        self.http
            .execute_unit(
                ApiRequest::post(format!("/api/exam/quizzes/{quiz_id}/questions/reorder"))
                    .json(json!({ "questionIdsInOrder": question_ids_in_order })),
            )
            .await
    }

    // Student side

    pub async fn list_student_quizzes(&self, course_id: i64) -> Result<Vec<StudentQuizListItem>> {
        self.http
            .execute(ApiRequest::get(format!(
                "/api/student/courses/{course_id}/quizzes"
            )))
            .await
    }

    pub async fn start_quiz(&self, quiz_id: i64) -> Result<StudentQuizAttempt> {
        self.http
            .execute(ApiRequest::post(format!(
                "/api/student/quizzes/{quiz_id}/start"
            )))
            .await
    }

    pub async fn submit_attempt(
        &self,
        attempt_id: i64,
        answers: &[AttemptAnswer],
    ) -> Result<StudentQuizResult> {
        self.http
            .execute(
                ApiRequest::post(format!("/api/student/attempts/{attempt_id}/submit"))
                    .json(json!({ "answers": answers })),
            )
            .await
    }

    pub async fn list_attempt_history(&self, quiz_id: i64) -> Result<Vec<AttemptHistoryItem>> {
        self.http
            .execute(ApiRequest::get(format!(
                "/api/student/quizzes/{quiz_id}/attempts"
            )))
            .await
    }
}
