//! Account service.
//!
//! Thin seam over the authentication collaborator: resolves bearer tokens
//! to users and maintains the display name shown on the dashboard and the
//! community board. Signup/login/session flows live outside this service.

use tracing::debug;
use wedplan_common::{AppError, AppResult};
use wedplan_db::entities::user;
use wedplan_db::repositories::UserRepository;

/// Account service.
#[derive(Clone)]
pub struct AccountService {
    user_repo: UserRepository,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    /// Resolve an API token to a user.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        self.user_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    /// Update the caller's display name. Empty input is ignored.
    pub async fn update_display_name(
        &self,
        user_id: i64,
        name: &str,
    ) -> AppResult<Option<user::Model>> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            debug!(user_id, "Ignoring empty display name");
            return Ok(None);
        }

        let user = self
            .user_repo
            .update_display_name(user_id, trimmed.to_string())
            .await?;
        Ok(Some(user))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_authenticate_unknown_token() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let service = AccountService::new(UserRepository::new(db));
        let result = service.authenticate_by_token("bogus").await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_update_display_name_ignores_empty() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = AccountService::new(UserRepository::new(db));
        let result = service.update_display_name(1, "   ").await.unwrap();

        assert!(result.is_none());
    }
}
