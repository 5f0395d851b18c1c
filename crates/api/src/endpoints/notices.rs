//! Notice endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use wedplan_common::AppResult;
use wedplan_db::entities::{notice, notice_comment, user};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Create notice router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notices))
        .route("/", post(create_notice))
        .route("/{id}", get(notice_detail))
        .route("/{id}/comments", post(comment_on_notice))
}

/// Notice response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NoticeResponse {
    fn from_pair((notice, author): (notice::Model, Option<user::Model>)) -> Self {
        Self {
            id: notice.id,
            title: notice.title,
            content: notice.content,
            author_name: author.map(|u| u.display_name.unwrap_or(u.username)),
            created_at: notice.created_at.into(),
        }
    }
}

/// Notice comment response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeCommentResponse {
    pub id: i64,
    pub author_name: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl NoticeCommentResponse {
    fn from_pair((comment, author): (notice_comment::Model, Option<user::Model>)) -> Self {
        Self {
            id: comment.id,
            author_name: author.map(|u| u.display_name.unwrap_or(u.username)),
            content: comment.content,
            created_at: comment.created_at.into(),
        }
    }
}

/// List notices, newest first.
async fn list_notices(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<NoticeResponse>>> {
    let notices = state.notice_service.list().await?;

    Ok(ApiResponse::ok(
        notices.into_iter().map(NoticeResponse::from_pair).collect(),
    ))
}

/// Create-notice request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoticeRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
}

/// Create a notice (admin only).
async fn create_notice(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateNoticeRequest>,
) -> AppResult<ApiResponse<NoticeResponse>> {
    req.validate()?;

    let notice = state
        .notice_service
        .create(&user, req.title, req.content)
        .await?;

    Ok(ApiResponse::ok(NoticeResponse::from_pair((
        notice,
        Some(user),
    ))))
}

/// Notice detail response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeDetailResponse {
    pub notice: NoticeResponse,
    pub comments: Vec<NoticeCommentResponse>,
}

/// One notice with its comments.
async fn notice_detail(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(notice_id): Path<i64>,
) -> AppResult<ApiResponse<NoticeDetailResponse>> {
    let (notice, comments) = state.notice_service.get(notice_id).await?;

    Ok(ApiResponse::ok(NoticeDetailResponse {
        notice: NoticeResponse::from_pair((notice, None)),
        comments: comments
            .into_iter()
            .map(NoticeCommentResponse::from_pair)
            .collect(),
    }))
}

/// Comment request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NoticeCommentRequest {
    #[validate(length(min = 1))]
    pub content: String,
}

/// Comment on a notice (open to all authenticated users).
async fn comment_on_notice(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(notice_id): Path<i64>,
    Json(req): Json<NoticeCommentRequest>,
) -> AppResult<ApiResponse<NoticeCommentResponse>> {
    req.validate()?;

    let comment = state
        .notice_service
        .comment(user.id, notice_id, req.content)
        .await?;

    Ok(ApiResponse::ok(NoticeCommentResponse::from_pair((
        comment,
        Some(user),
    ))))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_response_serialization() {
        let notice = notice::Model {
            id: 1,
            author_id: 1,
            title: "서버 점검 안내".to_string(),
            content: "일요일 새벽 점검이 있습니다.".to_string(),
            created_at: Utc::now().into(),
        };
        let admin = user::Model {
            id: 1,
            username: "admin".to_string(),
            display_name: None,
            api_token: "t".to_string(),
            is_admin: true,
            created_at: Utc::now().into(),
        };

        let json =
            serde_json::to_string(&NoticeResponse::from_pair((notice, Some(admin)))).unwrap();
        assert!(json.contains("\"authorName\":\"admin\""));
        assert!(json.contains("서버 점검 안내"));
    }
}
