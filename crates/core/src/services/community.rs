//! Community board service.
//!
//! Post CRUD with author-only edit/delete, atomic view counting, the
//! recommend toggle, and the searched/sorted/paginated listing with its
//! top-3 highlight.

use chrono::Utc;
use sea_orm::Set;
use tracing::info;
use wedplan_common::{AppError, AppResult};
use wedplan_db::entities::post::PostCategory;
use wedplan_db::entities::{post, post_comment, user};
use wedplan_db::repositories::{PostListPage, PostRepository, PostSort};

/// Posts per listing page.
const PAGE_SIZE: u64 = 10;

/// Size of the top-recommended highlight list.
const TOP_POSTS: u64 = 3;

/// One rendered community listing.
#[derive(Debug, Clone)]
pub struct CommunityListing {
    /// The requested page of posts with authors.
    pub page: PostListPage,
    /// Top posts by likes then views; empty whenever a search or category
    /// filter is active.
    pub top_posts: Vec<(post::Model, Option<user::Model>)>,
}

/// A post detail page: the post (view already counted), its author and
/// comments.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: post::Model,
    pub author: Option<user::Model>,
    pub comments: Vec<(post_comment::Model, Option<user::Model>)>,
}

/// Community service for board business logic.
#[derive(Clone)]
pub struct CommunityService {
    post_repo: PostRepository,
}

impl CommunityService {
    /// Create a new community service.
    #[must_use]
    pub const fn new(post_repo: PostRepository) -> Self {
        Self { post_repo }
    }

    /// List posts with search, category filter, sort and pagination.
    ///
    /// The top-3 highlight only renders on the unfiltered board, matching
    /// the "cleaner results while searching" behavior.
    pub async fn list(
        &self,
        search: Option<&str>,
        category: Option<PostCategory>,
        sort: PostSort,
        page: u64,
    ) -> AppResult<CommunityListing> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());

        let listing = self
            .post_repo
            .list(search, category, sort, page, PAGE_SIZE)
            .await?;

        let top_posts = if search.is_none() && category.is_none() {
            self.post_repo.top_recommended(TOP_POSTS).await?
        } else {
            Vec::new()
        };

        Ok(CommunityListing {
            page: listing,
            top_posts,
        })
    }

    /// Create a new post.
    pub async fn create_post(
        &self,
        author_id: i64,
        category: PostCategory,
        title: String,
        content: String,
        image_url: Option<String>,
    ) -> AppResult<post::Model> {
        let post = self
            .post_repo
            .create(post::ActiveModel {
                author_id: Set(author_id),
                category: Set(category),
                title: Set(title),
                content: Set(content),
                image_url: Set(image_url),
                created_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .await?;

        info!(post_id = post.id, author_id, "Created post");
        Ok(post)
    }

    /// Post detail; each call counts one view.
    ///
    /// The view counter is bumped with an atomic in-place update before the
    /// row is read, so N concurrent viewers add exactly N.
    pub async fn detail(&self, post_id: i64) -> AppResult<PostDetail> {
        self.post_repo.increment_view_count(post_id).await?;

        let (post, author) = self.post_repo.get_with_author(post_id).await?;
        let comments = self.post_repo.find_comments(post_id).await?;

        Ok(PostDetail {
            post,
            author,
            comments,
        })
    }

    /// Edit a post. Only the author may edit; anyone else is denied.
    pub async fn edit_post(
        &self,
        user_id: i64,
        post_id: i64,
        category: PostCategory,
        title: String,
        content: String,
        image_url: Option<String>,
    ) -> AppResult<post::Model> {
        let post = self.post_repo.get_by_id(post_id).await?;
        if post.author_id != user_id {
            return Err(AppError::Forbidden(
                "Only the author may edit this post".to_string(),
            ));
        }

        let mut active: post::ActiveModel = post.into();
        active.category = Set(category);
        active.title = Set(title);
        active.content = Set(content);
        active.image_url = Set(image_url);
        active.updated_at = Set(Some(Utc::now().into()));

        self.post_repo.update(active).await
    }

    /// Delete a post. Only the author may delete; anyone else is denied.
    pub async fn delete_post(&self, user_id: i64, post_id: i64) -> AppResult<()> {
        let post = self.post_repo.get_by_id(post_id).await?;
        if post.author_id != user_id {
            return Err(AppError::Forbidden(
                "Only the author may delete this post".to_string(),
            ));
        }

        self.post_repo.delete(post_id).await?;
        info!(post_id, user_id, "Deleted post");
        Ok(())
    }

    /// Toggle the caller's recommendation of a post.
    ///
    /// Returns `true` when the post is now recommended, `false` when the
    /// second press removed the like. Two applications always restore the
    /// original count.
    pub async fn toggle_recommend(&self, user_id: i64, post_id: i64) -> AppResult<bool> {
        // Confirm the post exists before touching the join table.
        self.post_repo.get_by_id(post_id).await?;

        if self.post_repo.has_recommended(post_id, user_id).await? {
            self.post_repo.remove_recommendation(post_id, user_id).await?;
            return Ok(false);
        }

        self.post_repo
            .add_recommendation(wedplan_db::entities::post_recommendation::ActiveModel {
                post_id: Set(post_id),
                user_id: Set(user_id),
                created_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .await?;

        Ok(true)
    }

    /// Comment on a post.
    pub async fn comment(
        &self,
        author_id: i64,
        post_id: i64,
        content: String,
    ) -> AppResult<post_comment::Model> {
        // The parent must exist; comments on deleted posts 404.
        self.post_repo.get_by_id(post_id).await?;

        self.post_repo
            .create_comment(post_comment::ActiveModel {
                post_id: Set(post_id),
                author_id: Set(author_id),
                content: Set(content),
                created_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn test_post(id: i64, author_id: i64) -> post::Model {
        post::Model {
            id,
            author_id,
            category: PostCategory::General,
            title: "title".to_string(),
            content: "content".to_string(),
            image_url: None,
            view_count: 0,
            recommendation_count: 0,
            comment_count: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_edit_post_denied_for_non_author() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_post(1, 10)]])
                .into_connection(),
        );

        let service = CommunityService::new(PostRepository::new(db));
        let result = service
            .edit_post(
                99,
                1,
                PostCategory::General,
                "t".to_string(),
                "c".to_string(),
                None,
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_post_denied_for_non_author() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_post(1, 10)]])
                .into_connection(),
        );

        let service = CommunityService::new(PostRepository::new(db));
        let result = service.delete_post(99, 1).await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_toggle_recommend_adds_then_removes() {
        let post = test_post(1, 10);
        let recommendation = wedplan_db::entities::post_recommendation::Model {
            id: 1,
            post_id: 1,
            user_id: 5,
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // first toggle: post exists, not yet recommended, insert + counter
                .append_query_results([[post.clone()]])
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(0))
                }]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                .append_query_results([[recommendation]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                // second toggle: post exists, already recommended, delete + counter
                .append_query_results([[post]])
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(1))
                }]])
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                ])
                .into_connection(),
        );

        let service = CommunityService::new(PostRepository::new(db));

        assert!(service.toggle_recommend(5, 1).await.unwrap());
        assert!(!service.toggle_recommend(5, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_comment_requires_existing_post() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );

        let service = CommunityService::new(PostRepository::new(db));
        let result = service.comment(5, 404, "hello".to_string()).await;

        assert!(matches!(result, Err(AppError::PostNotFound(404))));
    }
}
