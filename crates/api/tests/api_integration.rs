//! API integration tests.
//!
//! These tests verify the router wiring: routes exist, unauthenticated
//! requests are rejected, and unknown paths 404.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use std::sync::Arc;
use tower::ServiceExt;
use wedplan_api::{middleware::AppState, router as api_router};
use wedplan_core::{
    AccountService, CalendarService, CommunityService, DailyLogService, GroupService,
    NoticeService, ScheduleService, VendorService,
};
use wedplan_db::repositories::{
    DailyLogRepository, GroupRepository, NoticeRepository, PostRepository, ProfileRepository,
    TaskRepository, UserRepository, VendorRepository,
};

/// Create a mock database connection.
fn create_mock_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

/// Create test app state with mock database.
fn create_test_state() -> AppState {
    let db = Arc::new(create_mock_db());

    let user_repo = UserRepository::new(Arc::clone(&db));
    let group_repo = GroupRepository::new(Arc::clone(&db));
    let profile_repo = ProfileRepository::new(Arc::clone(&db));
    let task_repo = TaskRepository::new(Arc::clone(&db));
    let log_repo = DailyLogRepository::new(Arc::clone(&db));
    let vendor_repo = VendorRepository::new(Arc::clone(&db));
    let post_repo = PostRepository::new(Arc::clone(&db));
    let notice_repo = NoticeRepository::new(Arc::clone(&db));

    let schedule_service = ScheduleService::new(task_repo.clone());

    AppState {
        account_service: AccountService::new(user_repo),
        group_service: GroupService::new(group_repo, profile_repo, schedule_service.clone()),
        schedule_service,
        calendar_service: CalendarService::new(task_repo, log_repo.clone()),
        daily_log_service: DailyLogService::new(log_repo),
        vendor_service: VendorService::new(vendor_repo, Vec::new(), 24),
        community_service: CommunityService::new(post_repo),
        notice_service: NoticeService::new(notice_repo),
    }
}

/// Create the test router. No auth middleware is attached, so every
/// request arrives anonymous.
fn create_test_router() -> Router {
    let state = create_test_state();
    api_router().with_state(state)
}

#[tokio::test]
async fn test_dashboard_requires_auth() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/dashboard")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_schedule_requires_auth() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/schedule?year=2025&month=9")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_community_requires_auth() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/community?sort=likes")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_endpoint_returns_404() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nonexistent/endpoint")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_post_detail_rejects_non_numeric_id() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/community/posts/not-a-number")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Path extraction fails before the handler runs.
    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::NOT_FOUND
            || response.status() == StatusCode::UNAUTHORIZED
    );
}
