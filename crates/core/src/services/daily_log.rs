//! Daily log service.

use chrono::NaiveDate;
use tracing::debug;
use wedplan_common::AppResult;
use wedplan_db::entities::daily_log;
use wedplan_db::repositories::DailyLogRepository;

/// Daily log service with get-or-create-on-write semantics.
#[derive(Clone)]
pub struct DailyLogService {
    log_repo: DailyLogRepository,
}

impl DailyLogService {
    /// Create a new daily log service.
    #[must_use]
    pub const fn new(log_repo: DailyLogRepository) -> Self {
        Self { log_repo }
    }

    /// Save the journal entry for one day.
    ///
    /// First save creates the row; later saves for the same day update it
    /// in place. Empty content is allowed (a cleared memo).
    pub async fn save(
        &self,
        group_id: i64,
        date: NaiveDate,
        content: String,
    ) -> AppResult<daily_log::Model> {
        debug!(group_id, date = %date, "Saving daily log");
        self.log_repo.upsert(group_id, date, content).await
    }

    /// Fetch the journal entry for one day, if any.
    pub async fn get(
        &self,
        group_id: i64,
        date: NaiveDate,
    ) -> AppResult<Option<daily_log::Model>> {
        self.log_repo.find_by_date(group_id, date).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_save_twice_keeps_latest_content() {
        let date = day(2025, 9, 25);
        let first = daily_log::Model {
            id: 1,
            group_id: 1,
            date,
            content: "first".to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        };
        let second = daily_log::Model {
            content: "second".to_string(),
            updated_at: Some(Utc::now().into()),
            ..first.clone()
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // first save: miss then insert
                .append_query_results([Vec::<daily_log::Model>::new()])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                .append_query_results([[first.clone()]])
                // second save: hit then update
                .append_query_results([[first]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                .append_query_results([[second]])
                .into_connection(),
        );

        let service = DailyLogService::new(DailyLogRepository::new(db));

        let created = service.save(1, date, "first".to_string()).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.content, "first");

        let updated = service.save(1, date, "second".to_string()).await.unwrap();
        assert_eq!(updated.id, 1, "no second row for the same day");
        assert_eq!(updated.content, "second");
    }

    #[tokio::test]
    async fn test_save_allows_empty_content() {
        let date = day(2025, 9, 25);
        let cleared = daily_log::Model {
            id: 1,
            group_id: 1,
            date,
            content: String::new(),
            created_at: Utc::now().into(),
            updated_at: None,
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<daily_log::Model>::new()])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                .append_query_results([[cleared]])
                .into_connection(),
        );

        let service = DailyLogService::new(DailyLogRepository::new(db));
        let saved = service.save(1, date, String::new()).await.unwrap();

        assert_eq!(saved.content, "");
    }
}
