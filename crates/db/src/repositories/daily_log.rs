//! Daily log repository.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use wedplan_common::{AppError, AppResult};

use crate::entities::{DailyLog, daily_log};

/// Repository for daily log operations.
///
/// Logs are unique per `(group, date)`: writes are get-or-create-on-write,
/// never a second row for the same day.
#[derive(Clone)]
pub struct DailyLogRepository {
    db: Arc<DatabaseConnection>,
}

impl DailyLogRepository {
    /// Create a new daily log repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the log for one day.
    pub async fn find_by_date(
        &self,
        group_id: i64,
        date: NaiveDate,
    ) -> AppResult<Option<daily_log::Model>> {
        DailyLog::find()
            .filter(daily_log::Column::GroupId.eq(group_id))
            .filter(daily_log::Column::Date.eq(date))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update the log for one day.
    pub async fn upsert(
        &self,
        group_id: i64,
        date: NaiveDate,
        content: String,
    ) -> AppResult<daily_log::Model> {
        if let Some(existing) = self.find_by_date(group_id, date).await? {
            let mut active: daily_log::ActiveModel = existing.into();
            active.content = Set(content);
            active.updated_at = Set(Some(Utc::now().into()));

            return active
                .update(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()));
        }

        let model = daily_log::ActiveModel {
            group_id: Set(group_id),
            date: Set(date),
            content: Set(content),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Logs within a date range as a `date -> content` map (month batch
    /// fetch for calendar annotation).
    pub async fn find_in_range(
        &self,
        group_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<HashMap<NaiveDate, String>> {
        let logs = DailyLog::find()
            .filter(daily_log::Column::GroupId.eq(group_id))
            .filter(daily_log::Column::Date.gte(start))
            .filter(daily_log::Column::Date.lte(end))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(logs.into_iter().map(|l| (l.date, l.content)).collect())
    }

    /// Upcoming logs on or after a day, earliest first.
    pub async fn find_upcoming(
        &self,
        group_id: i64,
        from: NaiveDate,
        limit: u64,
    ) -> AppResult<Vec<daily_log::Model>> {
        DailyLog::find()
            .filter(daily_log::Column::GroupId.eq(group_id))
            .filter(daily_log::Column::Date.gte(from))
            .order_by(daily_log::Column::Date, Order::Asc)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_log(id: i64, group_id: i64, date: NaiveDate, content: &str) -> daily_log::Model {
        daily_log::Model {
            id,
            group_id,
            date,
            content: content.to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_updates_existing_row() {
        let existing = create_test_log(1, 1, day(2025, 9, 25), "old");
        let updated = create_test_log(1, 1, day(2025, 9, 25), "new");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // find_by_date hit
                .append_query_results([[existing]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                // row returned after update
                .append_query_results([[updated]])
                .into_connection(),
        );

        let repo = DailyLogRepository::new(db);
        let result = repo
            .upsert(1, day(2025, 9, 25), "new".to_string())
            .await
            .unwrap();

        assert_eq!(result.id, 1);
        assert_eq!(result.content, "new");
    }

    #[tokio::test]
    async fn test_find_in_range_builds_date_map() {
        let l1 = create_test_log(1, 1, day(2025, 9, 1), "first");
        let l2 = create_test_log(2, 1, day(2025, 9, 14), "second");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[l1, l2]])
                .into_connection(),
        );

        let repo = DailyLogRepository::new(db);
        let map = repo
            .find_in_range(1, day(2025, 9, 1), day(2025, 9, 30))
            .await
            .unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&day(2025, 9, 14)).map(String::as_str), Some("second"));
    }
}
