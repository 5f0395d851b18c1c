//! Community post repository.

use std::sync::Arc;

use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use wedplan_common::{AppError, AppResult};

use crate::entities::post::PostCategory;
use crate::entities::{
    Post, PostComment, PostRecommendation, User, post, post_comment, post_recommendation, user,
};

/// Sort order for post listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSort {
    /// Newest first.
    #[default]
    Newest,
    /// Most recommendations first, newest breaking ties.
    MostLiked,
    /// Most views first, newest breaking ties.
    MostViewed,
}

/// One page of a post listing.
#[derive(Debug, Clone)]
pub struct PostListPage {
    /// Posts with their authors.
    pub posts: Vec<(post::Model, Option<user::Model>)>,
    /// Total matching posts.
    pub total: u64,
    /// Total pages at the requested page size.
    pub pages: u64,
    /// The fetched page, 1-based.
    pub page: u64,
}

/// Repository for community post operations.
#[derive(Clone)]
pub struct PostRepository {
    db: Arc<DatabaseConnection>,
}

impl PostRepository {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find post by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<post::Model>> {
        Post::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get post by ID, returning error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<post::Model> {
        self.find_by_id(id).await?.ok_or(AppError::PostNotFound(id))
    }

    /// Get post by ID together with its author.
    pub async fn get_with_author(
        &self,
        id: i64,
    ) -> AppResult<(post::Model, Option<user::Model>)> {
        Post::find_by_id(id)
            .find_also_related(User)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or(AppError::PostNotFound(id))
    }

    /// Create a new post.
    pub async fn create(&self, model: post::ActiveModel) -> AppResult<post::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a post.
    pub async fn update(&self, model: post::ActiveModel) -> AppResult<post::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a post permanently.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        Post::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    /// Increment a post's view count atomically (no read-modify-write; lost
    /// updates under concurrent viewers would undercount).
    pub async fn increment_view_count(&self, id: i64) -> AppResult<()> {
        Post::update_many()
            .col_expr(
                post::Column::ViewCount,
                Expr::col(post::Column::ViewCount).add(1),
            )
            .filter(post::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    /// List posts with search, category filter, sort and pagination.
    ///
    /// Search is a case-insensitive substring match across title, content
    /// and author name. `page` is 1-based.
    pub async fn list(
        &self,
        search: Option<&str>,
        category: Option<PostCategory>,
        sort: PostSort,
        page: u64,
        per_page: u64,
    ) -> AppResult<PostListPage> {
        let mut query = Post::find().find_also_related(User);

        if let Some(category) = category {
            query = query.filter(post::Column::Category.eq(category));
        }

        if let Some(search) = search {
            let pattern = format!(
                "%{}%",
                search
                    .to_lowercase()
                    .replace('%', "\\%")
                    .replace('_', "\\_")
            );
            query = query.filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col((post::Entity, post::Column::Title))))
                            .like(&pattern),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col((post::Entity, post::Column::Content))))
                            .like(&pattern),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col((user::Entity, user::Column::Username))))
                            .like(&pattern),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col((
                            user::Entity,
                            user::Column::DisplayName,
                        ))))
                        .like(&pattern),
                    ),
            );
        }

        query = match sort {
            PostSort::Newest => query.order_by(post::Column::CreatedAt, Order::Desc),
            PostSort::MostLiked => query
                .order_by(post::Column::RecommendationCount, Order::Desc)
                .order_by(post::Column::CreatedAt, Order::Desc),
            PostSort::MostViewed => query
                .order_by(post::Column::ViewCount, Order::Desc)
                .order_by(post::Column::CreatedAt, Order::Desc),
        };

        let paginator = query.paginate(self.db.as_ref(), per_page);
        let counts = paginator
            .num_items_and_pages()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let page = page.max(1);
        let posts = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(PostListPage {
            posts,
            total: counts.number_of_items,
            pages: counts.number_of_pages,
            page,
        })
    }

    /// Top posts by recommendations, views breaking ties.
    pub async fn top_recommended(
        &self,
        limit: u64,
    ) -> AppResult<Vec<(post::Model, Option<user::Model>)>> {
        Post::find()
            .find_also_related(User)
            .order_by(post::Column::RecommendationCount, Order::Desc)
            .order_by(post::Column::ViewCount, Order::Desc)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ==================== Recommendation Operations ====================

    /// Whether a user has recommended a post.
    pub async fn has_recommended(&self, post_id: i64, user_id: i64) -> AppResult<bool> {
        let count = PostRecommendation::find()
            .filter(post_recommendation::Column::PostId.eq(post_id))
            .filter(post_recommendation::Column::UserId.eq(user_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    /// Add a recommendation and bump the denormalized counter.
    pub async fn add_recommendation(
        &self,
        model: post_recommendation::ActiveModel,
    ) -> AppResult<post_recommendation::Model> {
        let post_id = model.post_id.clone().unwrap();

        let created = model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Post::update_many()
            .col_expr(
                post::Column::RecommendationCount,
                Expr::col(post::Column::RecommendationCount).add(1),
            )
            .filter(post::Column::Id.eq(post_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(created)
    }

    /// Remove a recommendation and drop the denormalized counter.
    pub async fn remove_recommendation(&self, post_id: i64, user_id: i64) -> AppResult<()> {
        let deleted = PostRecommendation::delete_many()
            .filter(post_recommendation::Column::PostId.eq(post_id))
            .filter(post_recommendation::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if deleted.rows_affected > 0 {
            Post::update_many()
                .col_expr(
                    post::Column::RecommendationCount,
                    Expr::cust("GREATEST(recommendation_count - 1, 0)"),
                )
                .filter(post::Column::Id.eq(post_id))
                .exec(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }

        Ok(())
    }

    // ==================== Comment Operations ====================

    /// Create a comment and bump the denormalized counter.
    pub async fn create_comment(
        &self,
        model: post_comment::ActiveModel,
    ) -> AppResult<post_comment::Model> {
        let post_id = model.post_id.clone().unwrap();

        let created = model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Post::update_many()
            .col_expr(
                post::Column::CommentCount,
                Expr::col(post::Column::CommentCount).add(1),
            )
            .filter(post::Column::Id.eq(post_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(created)
    }

    /// Comments on a post, oldest first, with authors.
    pub async fn find_comments(
        &self,
        post_id: i64,
    ) -> AppResult<Vec<(post_comment::Model, Option<user::Model>)>> {
        PostComment::find()
            .filter(post_comment::Column::PostId.eq(post_id))
            .find_also_related(User)
            .order_by(post_comment::Column::CreatedAt, Order::Asc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_post(id: i64, author_id: i64, title: &str) -> post::Model {
        post::Model {
            id,
            author_id,
            category: PostCategory::General,
            title: title.to_string(),
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
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.get_by_id(9).await;

        assert!(matches!(result, Err(AppError::PostNotFound(9))));
    }

    #[tokio::test]
    async fn test_increment_view_count_issues_single_update() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        repo.increment_view_count(1).await.unwrap();
    }

    #[tokio::test]
    async fn test_has_recommended_false() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(0))
                }]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        assert!(!repo.has_recommended(1, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_recommendation_skips_counter_when_absent() {
        // Delete matches no row; the counter update must not run (the mock
        // would panic on an unexpected second exec).
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        repo.remove_recommendation(1, 1).await.unwrap();
    }

    #[tokio::test]
    async fn test_top_recommended_returns_rows() {
        let p1 = create_test_post(1, 1, "first");
        let p2 = create_test_post(2, 1, "second");
        let author = user::Model {
            id: 1,
            username: "alice".to_string(),
            display_name: None,
            api_token: "t".to_string(),
            is_admin: false,
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![
                    (p1, Some(author.clone())),
                    (p2, Some(author)),
                ]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.top_recommended(3).await.unwrap();

        assert_eq!(result.len(), 2);
    }
}
