//! Notice repository.

use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter,
    QueryOrder, QuerySelect,
};
use wedplan_common::{AppError, AppResult};

use crate::entities::{Notice, NoticeComment, User, notice, notice_comment, user};

/// Repository for notice operations.
#[derive(Clone)]
pub struct NoticeRepository {
    db: Arc<DatabaseConnection>,
}

impl NoticeRepository {
    /// Create a new notice repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find notice by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<notice::Model>> {
        Notice::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get notice by ID, returning error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<notice::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Notice not found: {id}")))
    }

    /// All notices, newest first, with their authors.
    pub async fn find_all(
        &self,
        limit: u64,
    ) -> AppResult<Vec<(notice::Model, Option<user::Model>)>> {
        Notice::find()
            .find_also_related(User)
            .order_by(notice::Column::CreatedAt, Order::Desc)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new notice.
    pub async fn create(&self, model: notice::ActiveModel) -> AppResult<notice::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a comment on a notice.
    pub async fn create_comment(
        &self,
        model: notice_comment::ActiveModel,
    ) -> AppResult<notice_comment::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Comments on a notice, oldest first, with authors.
    pub async fn find_comments(
        &self,
        notice_id: i64,
    ) -> AppResult<Vec<(notice_comment::Model, Option<user::Model>)>> {
        NoticeComment::find()
            .filter(notice_comment::Column::NoticeId.eq(notice_id))
            .find_also_related(User)
            .order_by(notice_comment::Column::CreatedAt, Order::Asc)
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
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<notice::Model>::new()])
                .into_connection(),
        );

        let repo = NoticeRepository::new(db);
        let result = repo.get_by_id(3).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_find_all_with_authors() {
        let notice = notice::Model {
            id: 1,
            author_id: 1,
            title: "Maintenance".to_string(),
            content: "Scheduled downtime".to_string(),
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

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![(notice, Some(admin))]])
                .into_connection(),
        );

        let repo = NoticeRepository::new(db);
        let result = repo.find_all(20).await.unwrap();

        assert_eq!(result.len(), 1);
        assert!(result[0].1.as_ref().unwrap().is_admin);
    }
}
