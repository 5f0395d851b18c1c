//! Notice service.
//!
//! Administrator announcements: admins author them, everyone reads and
//! comments.

use chrono::Utc;
use sea_orm::Set;
use tracing::info;
use wedplan_common::{AppError, AppResult};
use wedplan_db::entities::{notice, notice_comment, user};
use wedplan_db::repositories::NoticeRepository;

/// Notices shown on the community board.
const NOTICE_LIMIT: u64 = 20;

/// Notice service.
#[derive(Clone)]
pub struct NoticeService {
    notice_repo: NoticeRepository,
}

impl NoticeService {
    /// Create a new notice service.
    #[must_use]
    pub const fn new(notice_repo: NoticeRepository) -> Self {
        Self { notice_repo }
    }

    /// Recent notices with their authors, newest first.
    pub async fn list(&self) -> AppResult<Vec<(notice::Model, Option<user::Model>)>> {
        self.notice_repo.find_all(NOTICE_LIMIT).await
    }

    /// One notice with its comments.
    pub async fn get(
        &self,
        notice_id: i64,
    ) -> AppResult<(
        notice::Model,
        Vec<(notice_comment::Model, Option<user::Model>)>,
    )> {
        let notice = self.notice_repo.get_by_id(notice_id).await?;
        let comments = self.notice_repo.find_comments(notice_id).await?;
        Ok((notice, comments))
    }

    /// Create a notice. Admin-only.
    pub async fn create(
        &self,
        author: &user::Model,
        title: String,
        content: String,
    ) -> AppResult<notice::Model> {
        if !author.is_admin {
            return Err(AppError::Forbidden(
                "Only admins can create notices".to_string(),
            ));
        }

        let notice = self
            .notice_repo
            .create(notice::ActiveModel {
                author_id: Set(author.id),
                title: Set(title),
                content: Set(content),
                created_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .await?;

        info!(notice_id = notice.id, author_id = author.id, "Created notice");
        Ok(notice)
    }

    /// Comment on a notice. Open to every authenticated user.
    pub async fn comment(
        &self,
        author_id: i64,
        notice_id: i64,
        content: String,
    ) -> AppResult<notice_comment::Model> {
        self.notice_repo.get_by_id(notice_id).await?;

        self.notice_repo
            .create_comment(notice_comment::ActiveModel {
                notice_id: Set(notice_id),
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

    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_user(id: i64, is_admin: bool) -> user::Model {
        user::Model {
            id,
            username: format!("user{id}"),
            display_name: None,
            api_token: format!("token-{id}"),
            is_admin,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_create_denied_for_regular_user() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = NoticeService::new(NoticeRepository::new(db));
        let result = service
            .create(&test_user(1, false), "t".to_string(), "c".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_comment_requires_existing_notice() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<notice::Model>::new()])
                .into_connection(),
        );

        let service = NoticeService::new(NoticeRepository::new(db));
        let result = service.comment(1, 404, "hello".to_string()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
