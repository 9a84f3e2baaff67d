//! Integration tests for the typed domain clients

mod common;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use common::{envelope, harness};
use lms_client::courses::{CourseStatus, CreateCourseRequest};
use lms_client::exam::AttemptAnswer;
use lms_client::users::UserStatus;
use lms_client::video::VideoProgressEvent;

#[tokio::test]
async fn course_list_normalizes_spring_pages() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .and(query_param("page", "0"))
        .and(query_param("size", "20"))
        .and(query_param("status", "ACTIVE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "content": [{
                "id": 1,
                "title": "Algebra",
                "status": "ACTIVE",
                "createdBy": "u-1",
                "createdAt": "2026-01-01T00:00:00Z",
            }],
            "totalElements": 57,
            "number": 0,
            "size": 20,
        }))))
        .mount(&h.server)
        .await;

    let page = h
        .client
        .courses()
        .list(0, 20, None, Some(CourseStatus::Active))
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title, "Algebra");
    assert_eq!(page.total, 57);
    assert_eq!(page.size, 20);
}

#[tokio::test]
async fn course_list_accepts_bare_arrays() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([{
            "id": 2,
            "title": "Geometry",
            "status": "DRAFT",
            "createdBy": "u-1",
            "createdAt": "2026-01-01T00:00:00Z",
        }]))))
        .mount(&h.server)
        .await;

    let page = h.client.courses().list(3, 10, None, None).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total, 1);
    // Bare arrays carry no paging info; the request's is echoed back
    assert_eq!(page.page, 3);
    assert_eq!(page.size, 10);
}

#[tokio::test]
async fn course_create_sends_camel_case_payload() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/api/courses"))
        .and(body_partial_json(json!({
            "title": "Physics",
            "coverUrl": "https://cdn.example.com/physics.png",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": 9,
            "title": "Physics",
            "coverUrl": "https://cdn.example.com/physics.png",
            "status": "DRAFT",
            "modules": [],
        }))))
        .expect(1)
        .mount(&h.server)
        .await;

    let created = h
        .client
        .courses()
        .create(&CreateCourseRequest {
            title: "Physics".to_string(),
            description: None,
            cover_url: Some("https://cdn.example.com/physics.png".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(created.id, 9);
    assert_eq!(created.status, CourseStatus::Draft);
}

#[tokio::test]
async fn quiz_attempt_round_trip() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/api/student/quizzes/5/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "attemptId": 31,
            "quizId": 5,
            "timeLimitSec": 600,
            "questions": [
                { "questionId": 11, "text": "2 + 2?", "options": ["3", "4"] },
            ],
        }))))
        .mount(&h.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/student/attempts/31/submit"))
        .and(body_partial_json(json!({
            "answers": [{ "questionId": 11, "selectedIndex": 1 }],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "attemptId": 31,
            "quizId": 5,
            "totalQuestions": 1,
            "correctCount": 1,
            "scorePct": 100,
            "passed": true,
            "finishedAt": "2026-01-01T00:10:00Z",
        }))))
        .mount(&h.server)
        .await;

    let exam = h.client.exam();
    let attempt = exam.start_quiz(5).await.unwrap();
    assert_eq!(attempt.attempt_id, 31);
    assert_eq!(attempt.questions.len(), 1);

    let result = exam
        .submit_attempt(
            31,
            &[AttemptAnswer {
                question_id: 11,
                selected_index: Some(1),
            }],
        )
        .await
        .unwrap();

    assert!(result.passed);
    assert_eq!(result.score_pct, 100);
}

#[tokio::test]
async fn video_progress_event_uses_the_wire_names() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/api/student/lessons/77/video/progress"))
        .and(body_partial_json(json!({
            "sessionId": "vs-1",
            "watchedDeltaSeconds": 15,
            "tabVisible": false,
            "tabSwitchCountDelta": 2,
            "seekAttemptDelta": 1,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "accepted": true,
            "completionPct": 42.5,
            "canUnlockQuiz": false,
        }))))
        .expect(1)
        .mount(&h.server)
        .await;

    let response = h
        .client
        .video()
        .send_progress(
            77,
            &VideoProgressEvent {
                session_id: "vs-1".to_string(),
                current_second: 615,
                watched_delta_seconds: 15,
                total_seconds: 1800,
                event_time: "2026-01-01T00:00:15Z".to_string(),
                tab_visible: false,
                tab_switch_count_delta: 2,
                seek_attempt_delta: 1,
            },
        )
        .await
        .unwrap();

    assert!(response.accepted);
    assert!(!response.can_unlock_quiz);
}

#[tokio::test]
async fn user_status_update_hits_the_status_endpoint() {
    let h = harness().await;

    Mock::given(method("PATCH"))
        .and(path("/api/admin/users/u-3/status"))
        .and(body_partial_json(json!({ "status": "BLOCKED" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": "u-3",
            "fullName": "Blocked User",
            "email": "blocked@example.com",
            "status": "BLOCKED",
            "roles": ["STUDENT"],
            "createdAt": "2025-11-05T00:00:00Z",
        }))))
        .mount(&h.server)
        .await;

    let user = h
        .client
        .users()
        .update_status("u-3", UserStatus::Blocked)
        .await
        .unwrap();

    assert_eq!(user.status, UserStatus::Blocked);
}

#[tokio::test]
async fn teacher_progress_accepts_both_response_shapes() {
    let h = harness().await;

    // Legacy endpoints page the rows without the course wrapper
    Mock::given(method("GET"))
        .and(path("/api/teacher/courses/4/progress"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "content": [{
                "studentId": 8,
                "fullName": "Omar Haddad",
                "attendancePct": 80.0,
                "videoCompletionPct": 55.0,
                "bestTestScorePct": 90.0,
                "status": "IN_PROGRESS",
            }],
            "totalElements": 1,
            "number": 0,
            "size": 20,
        }))))
        .mount(&h.server)
        .await;

    let response = h
        .client
        .progress()
        .teacher_course_progress(4, 0, 20, None)
        .await
        .unwrap();

    assert_eq!(response.course_id, 4);
    assert_eq!(response.students.len(), 1);
    assert_eq!(response.total, 1);
}
