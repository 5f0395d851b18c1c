//! Wedding group repository.

use std::sync::Arc;

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use wedplan_common::{AppError, AppResult};

use crate::entities::{WeddingGroup, wedding_group};

/// Repository for wedding group operations.
#[derive(Clone)]
pub struct GroupRepository {
    db: Arc<DatabaseConnection>,
}

impl GroupRepository {
    /// Create a new group repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find group by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<wedding_group::Model>> {
        WeddingGroup::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get group by ID, returning error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<wedding_group::Model> {
        self.find_by_id(id).await?.ok_or(AppError::GroupNotFound)
    }

    /// Find group by invite code.
    pub async fn find_by_invite_code(
        &self,
        code: &str,
    ) -> AppResult<Option<wedding_group::Model>> {
        WeddingGroup::find()
            .filter(wedding_group::Column::InviteCode.eq(code))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check whether an invite code is already taken.
    pub async fn invite_code_exists(&self, code: &str) -> AppResult<bool> {
        let count = WeddingGroup::find()
            .filter(wedding_group::Column::InviteCode.eq(code))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    /// Create a new group.
    pub async fn create(
        &self,
        model: wedding_group::ActiveModel,
    ) -> AppResult<wedding_group::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a group's wedding date.
    pub async fn update_wedding_date(
        &self,
        id: i64,
        date: NaiveDate,
    ) -> AppResult<wedding_group::Model> {
        let group = self.get_by_id(id).await?;
        let mut active: wedding_group::ActiveModel = group.into();
        active.wedding_date = Set(Some(date));

        active
            .update(self.db.as_ref())
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

    fn create_test_group(id: i64, invite_code: &str) -> wedding_group::Model {
        wedding_group::Model {
            id,
            wedding_date: NaiveDate::from_ymd_opt(2025, 12, 25),
            invite_code: invite_code.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_invite_code() {
        let group = create_test_group(1, "AB2CD3");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[group]])
                .into_connection(),
        );

        let repo = GroupRepository::new(db);
        let result = repo.find_by_invite_code("AB2CD3").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<wedding_group::Model>::new()])
                .into_connection(),
        );

        let repo = GroupRepository::new(db);
        let result = repo.get_by_id(42).await;

        assert!(matches!(result, Err(AppError::GroupNotFound)));
    }

    #[tokio::test]
    async fn test_invite_code_exists() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(1))
                }]])
                .into_connection(),
        );

        let repo = GroupRepository::new(db);
        assert!(repo.invite_code_exists("AB2CD3").await.unwrap());
    }
}
