//! Community board endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use wedplan_common::AppResult;
use wedplan_db::entities::post::PostCategory;
use wedplan_db::entities::{post, post_comment, user};
use wedplan_db::repositories::PostSort;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Create community router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(community_main))
        .route("/posts", post(create_post))
        .route("/posts/{id}", get(post_detail))
        .route("/posts/{id}", put(edit_post))
        .route("/posts/{id}", delete(delete_post))
        .route("/posts/{id}/recommend", post(recommend_post))
        .route("/posts/{id}/comments", post(comment_on_post))
}

/// Post author as displayed on the board.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: i64,
    pub name: String,
}

impl AuthorResponse {
    fn from_user(author: Option<user::Model>) -> Option<Self> {
        author.map(|u| Self {
            id: u.id,
            name: u.display_name.unwrap_or(u.username),
        })
    }
}

/// Post response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i64,
    pub author: Option<AuthorResponse>,
    pub category: PostCategory,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub view_count: i64,
    pub recommendation_count: i64,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
}

impl PostResponse {
    fn from_pair((post, author): (post::Model, Option<user::Model>)) -> Self {
        Self {
            id: post.id,
            author: AuthorResponse::from_user(author),
            category: post.category,
            title: post.title,
            content: post.content,
            image_url: post.image_url,
            view_count: post.view_count,
            recommendation_count: post.recommendation_count,
            comment_count: post.comment_count,
            created_at: post.created_at.into(),
        }
    }
}

/// Comment response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i64,
    pub author: Option<AuthorResponse>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl CommentResponse {
    fn from_pair((comment, author): (post_comment::Model, Option<user::Model>)) -> Self {
        Self {
            id: comment.id,
            author: AuthorResponse::from_user(author),
            content: comment.content,
            created_at: comment.created_at.into(),
        }
    }
}

/// Community listing query.
#[derive(Debug, Deserialize)]
pub struct CommunityQuery {
    /// Free-text search across title, content and author name.
    pub q: Option<String>,
    /// Category filter; unknown values are ignored.
    pub category: Option<String>,
    /// "date" (default), "likes" or "views".
    pub sort: Option<String>,
    /// 1-based page number.
    pub page: Option<u64>,
}

/// Community listing response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityListResponse {
    pub posts: Vec<PostResponse>,
    pub total: u64,
    pub pages: u64,
    pub page: u64,
    /// Top posts by likes then views; empty when a search or category
    /// filter is active.
    pub top_posts: Vec<PostResponse>,
}

/// List posts with search, filter, sort and pagination.
async fn community_main(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<CommunityQuery>,
) -> AppResult<ApiResponse<CommunityListResponse>> {
    let category = query.category.as_deref().and_then(parse_category);
    let sort = parse_sort(query.sort.as_deref());

    let listing = state
        .community_service
        .list(query.q.as_deref(), category, sort, query.page.unwrap_or(1))
        .await?;

    Ok(ApiResponse::ok(CommunityListResponse {
        posts: listing
            .page
            .posts
            .into_iter()
            .map(PostResponse::from_pair)
            .collect(),
        total: listing.page.total,
        pages: listing.page.pages,
        page: listing.page.page,
        top_posts: listing
            .top_posts
            .into_iter()
            .map(PostResponse::from_pair)
            .collect(),
    }))
}

/// Create/edit post request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub category: PostCategory,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    pub image_url: Option<String>,
}

/// Create a post.
async fn create_post(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<PostRequest>,
) -> AppResult<ApiResponse<PostResponse>> {
    req.validate()?;

    let post = state
        .community_service
        .create_post(user.id, req.category, req.title, req.content, req.image_url)
        .await?;

    Ok(ApiResponse::ok(PostResponse::from_pair((
        post,
        Some(user),
    ))))
}

/// Post detail response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

/// Post detail; every call counts one view.
async fn post_detail(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> AppResult<ApiResponse<PostDetailResponse>> {
    let detail = state.community_service.detail(post_id).await?;

    Ok(ApiResponse::ok(PostDetailResponse {
        post: PostResponse::from_pair((detail.post, detail.author)),
        comments: detail
            .comments
            .into_iter()
            .map(CommentResponse::from_pair)
            .collect(),
    }))
}

/// Edit a post (author only).
async fn edit_post(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Json(req): Json<PostRequest>,
) -> AppResult<ApiResponse<PostResponse>> {
    req.validate()?;

    let post = state
        .community_service
        .edit_post(
            user.id,
            post_id,
            req.category,
            req.title,
            req.content,
            req.image_url,
        )
        .await?;

    Ok(ApiResponse::ok(PostResponse::from_pair((
        post,
        Some(user),
    ))))
}

/// Delete a post (author only).
async fn delete_post(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    state.community_service.delete_post(user.id, post_id).await?;

    Ok(ApiResponse::ok(()))
}

/// Recommend-toggle response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    /// Whether the caller now recommends the post.
    pub recommended: bool,
}

/// Toggle the caller's recommendation.
async fn recommend_post(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> AppResult<ApiResponse<RecommendResponse>> {
    let recommended = state
        .community_service
        .toggle_recommend(user.id, post_id)
        .await?;

    Ok(ApiResponse::ok(RecommendResponse { recommended }))
}

/// Comment request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    #[validate(length(min = 1))]
    pub content: String,
}

/// Comment on a post.
async fn comment_on_post(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Json(req): Json<CommentRequest>,
) -> AppResult<ApiResponse<CommentResponse>> {
    req.validate()?;

    let comment = state
        .community_service
        .comment(user.id, post_id, req.content)
        .await?;

    Ok(ApiResponse::ok(CommentResponse::from_pair((
        comment,
        Some(user),
    ))))
}

/// Parse a category query value; unknown values mean "no filter".
fn parse_category(value: &str) -> Option<PostCategory> {
    match value.to_uppercase().as_str() {
        "GENERAL" => Some(PostCategory::General),
        "QUESTION" => Some(PostCategory::Question),
        "REVIEW" => Some(PostCategory::Review),
        "TIP" => Some(PostCategory::Tip),
        _ => None,
    }
}

/// Parse a sort query value; anything unknown is the newest-first default.
fn parse_sort(value: Option<&str>) -> PostSort {
    match value {
        Some("likes") => PostSort::MostLiked,
        Some("views") => PostSort::MostViewed,
        _ => PostSort::Newest,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("REVIEW"), Some(PostCategory::Review));
        assert_eq!(parse_category("review"), Some(PostCategory::Review));
        assert_eq!(parse_category("nonsense"), None);
    }

    #[test]
    fn test_parse_sort_defaults_to_newest() {
        assert_eq!(parse_sort(Some("likes")), PostSort::MostLiked);
        assert_eq!(parse_sort(Some("views")), PostSort::MostViewed);
        assert_eq!(parse_sort(Some("date")), PostSort::Newest);
        assert_eq!(parse_sort(None), PostSort::Newest);
    }

    #[test]
    fn test_post_response_uses_display_name_over_username() {
        let author = user::Model {
            id: 1,
            username: "alice".to_string(),
            display_name: Some("앨리스".to_string()),
            api_token: "t".to_string(),
            is_admin: false,
            created_at: Utc::now().into(),
        };
        let post = post::Model {
            id: 1,
            author_id: 1,
            category: PostCategory::General,
            title: "t".to_string(),
            content: "c".to_string(),
            image_url: None,
            view_count: 0,
            recommendation_count: 0,
            comment_count: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        };

        let response = PostResponse::from_pair((post, Some(author)));
        assert_eq!(response.author.unwrap().name, "앨리스");
    }
}
