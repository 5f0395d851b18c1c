//! Wedding profile repository.

use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use wedplan_common::{AppError, AppResult};

use crate::entities::{WeddingProfile, wedding_profile};

/// Repository for wedding profile operations.
#[derive(Clone)]
pub struct ProfileRepository {
    db: Arc<DatabaseConnection>,
}

impl ProfileRepository {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the profile belonging to a user, if any.
    pub async fn find_by_user_id(&self, user_id: i64) -> AppResult<Option<wedding_profile::Model>> {
        WeddingProfile::find()
            .filter(wedding_profile::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the profile belonging to a user, returning error if absent.
    pub async fn get_by_user_id(&self, user_id: i64) -> AppResult<wedding_profile::Model> {
        self.find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Profile not found for user: {user_id}")))
    }

    /// Create a new profile.
    pub async fn create(
        &self,
        model: wedding_profile::ActiveModel,
    ) -> AppResult<wedding_profile::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Attach a profile to a group.
    pub async fn set_group(
        &self,
        profile: wedding_profile::Model,
        group_id: i64,
    ) -> AppResult<wedding_profile::Model> {
        let mut active: wedding_profile::ActiveModel = profile.into();
        active.group_id = Set(Some(group_id));

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

    fn create_test_profile(id: i64, user_id: i64, group_id: Option<i64>) -> wedding_profile::Model {
        wedding_profile::Model {
            id,
            user_id,
            group_id,
            region_sido: None,
            region_sigungu: None,
            style: None,
            budget_min: None,
            budget_max: None,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_user_id() {
        let profile = create_test_profile(1, 10, Some(5));

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[profile]])
                .into_connection(),
        );

        let repo = ProfileRepository::new(db);
        let result = repo.find_by_user_id(10).await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().group_id, Some(5));
    }

    #[tokio::test]
    async fn test_get_by_user_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<wedding_profile::Model>::new()])
                .into_connection(),
        );

        let repo = ProfileRepository::new(db);
        let result = repo.get_by_user_id(10).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
