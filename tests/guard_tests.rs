//! Integration tests for route-level authorization

mod common;

use common::{harness, sign_in, student_profile, teacher_profile};
use lms_client::guard::{GuardDecision, RouteTarget};
use lms_client::prelude::Role;

#[tokio::test]
async fn public_routes_are_always_allowed() {
    let h = harness().await;

    let decision = h.client.guard().check(&RouteTarget::new("/verify")).await;
    assert_eq!(decision, GuardDecision::Allow);
}

#[tokio::test]
async fn protected_route_redirects_unauthenticated_users_to_login() {
    let h = harness().await;

    let target = RouteTarget::new("/student/dashboard").requires_auth();
    let decision = h.client.guard().check(&target).await;
    assert_eq!(decision, GuardDecision::Redirect("/login"));
}

#[tokio::test]
async fn missing_role_redirects_to_forbidden() {
    let h = harness().await;
    sign_in(&h, student_profile()).await;

    let target = RouteTarget::new("/admin/users").with_roles(&[Role::Admin]);
    let decision = h.client.guard().check(&target).await;
    assert_eq!(decision, GuardDecision::Redirect("/forbidden"));
}

#[tokio::test]
async fn any_listed_role_is_enough() {
    let h = harness().await;
    sign_in(&h, teacher_profile()).await;

    let target =
        RouteTarget::new("/teacher/courses").with_roles(&[Role::Admin, Role::Teacher]);
    let decision = h.client.guard().check(&target).await;
    assert_eq!(decision, GuardDecision::Allow);
}

#[tokio::test]
async fn login_screen_redirects_authenticated_users_to_their_dashboard() {
    let h = harness().await;
    sign_in(&h, teacher_profile()).await;

    let decision = h.client.guard().check(&RouteTarget::new("/login")).await;
    assert_eq!(decision, GuardDecision::Redirect("/teacher/dashboard"));
}

#[tokio::test]
async fn resolve_performs_the_redirect() {
    let h = harness().await;

    let target = RouteTarget::new("/admin/dashboard").with_roles(&[Role::Admin]);
    let decision = h.client.guard().resolve(&target).await;

    assert_eq!(decision, GuardDecision::Redirect("/login"));
    assert_eq!(h.navigator.pushes(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn first_check_bootstraps_the_session() {
    let h = harness().await;
    h.client.tokens().set_refresh(Some("stored-refresh"));

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(json!({
            "accessToken": "access-9",
            "refreshToken": "refresh-9",
        }))))
        .expect(1)
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(common::envelope(teacher_profile())),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let target = RouteTarget::new("/teacher/dashboard").with_roles(&[Role::Teacher]);
    let decision = h.client.guard().check(&target).await;

    assert_eq!(decision, GuardDecision::Allow);
    assert!(h.client.auth().is_authenticated());
}
