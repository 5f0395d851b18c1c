//! Schedule task repository.

use std::sync::Arc;

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use wedplan_common::{AppError, AppResult};

use crate::entities::{ScheduleTask, schedule_task};

/// Repository for schedule task operations.
///
/// Every mutating lookup is scoped by `group_id`: task ids arrive from the
/// client and must never reach across groups.
#[derive(Clone)]
pub struct TaskRepository {
    db: Arc<DatabaseConnection>,
}

impl TaskRepository {
    /// Create a new task repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a single task.
    pub async fn create(&self, model: schedule_task::ActiveModel) -> AppResult<schedule_task::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Bulk-insert tasks in one statement (template seeding).
    pub async fn insert_many(&self, models: Vec<schedule_task::ActiveModel>) -> AppResult<()> {
        if models.is_empty() {
            return Ok(());
        }

        ScheduleTask::insert_many(models)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    /// Find a task by id, scoped to a group.
    pub async fn find_by_id_and_group(
        &self,
        task_id: i64,
        group_id: i64,
    ) -> AppResult<Option<schedule_task::Model>> {
        ScheduleTask::find_by_id(task_id)
            .filter(schedule_task::Column::GroupId.eq(group_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a task by id, scoped to a group; error when absent.
    pub async fn get_by_id_and_group(
        &self,
        task_id: i64,
        group_id: i64,
    ) -> AppResult<schedule_task::Model> {
        self.find_by_id_and_group(task_id, group_id)
            .await?
            .ok_or(AppError::TaskNotFound(task_id))
    }

    /// All tasks of a group in checklist order: `(d_day_offset ASC, id ASC)`.
    /// Offsets left null sort last under PostgreSQL's default ordering.
    pub async fn find_by_group(&self, group_id: i64) -> AppResult<Vec<schedule_task::Model>> {
        ScheduleTask::find()
            .filter(schedule_task::Column::GroupId.eq(group_id))
            .order_by(schedule_task::Column::DDayOffset, Order::Asc)
            .order_by(schedule_task::Column::Id, Order::Asc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Backlog view: tasks still unscheduled or not yet done.
    pub async fn find_open(&self, group_id: i64) -> AppResult<Vec<schedule_task::Model>> {
        use sea_orm::Condition;

        ScheduleTask::find()
            .filter(schedule_task::Column::GroupId.eq(group_id))
            .filter(
                Condition::any()
                    .add(schedule_task::Column::Date.is_null())
                    .add(schedule_task::Column::IsDone.eq(false)),
            )
            .order_by(schedule_task::Column::Date, Order::Asc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Tasks scheduled within a date range (month batch fetch).
    pub async fn find_in_range(
        &self,
        group_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<schedule_task::Model>> {
        ScheduleTask::find()
            .filter(schedule_task::Column::GroupId.eq(group_id))
            .filter(schedule_task::Column::Date.gte(start))
            .filter(schedule_task::Column::Date.lte(end))
            .order_by(schedule_task::Column::Date, Order::Asc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Upcoming tasks on or after a day, earliest first.
    pub async fn find_upcoming(
        &self,
        group_id: i64,
        from: NaiveDate,
        limit: u64,
    ) -> AppResult<Vec<schedule_task::Model>> {
        ScheduleTask::find()
            .filter(schedule_task::Column::GroupId.eq(group_id))
            .filter(schedule_task::Column::Date.gte(from))
            .order_by(schedule_task::Column::Date, Order::Asc)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count tasks in a group.
    pub async fn count_by_group(&self, group_id: i64) -> AppResult<u64> {
        ScheduleTask::find()
            .filter(schedule_task::Column::GroupId.eq(group_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Schedule (or reschedule) a task onto a concrete day.
    pub async fn set_date(
        &self,
        task: schedule_task::Model,
        date: NaiveDate,
    ) -> AppResult<schedule_task::Model> {
        let mut active: schedule_task::ActiveModel = task.into();
        active.date = Set(Some(date));

        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Flip a task's completion state.
    pub async fn toggle_done(&self, task: schedule_task::Model) -> AppResult<schedule_task::Model> {
        let is_done = task.is_done;
        let mut active: schedule_task::ActiveModel = task.into();
        active.is_done = Set(!is_done);

        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a task's estimated budget.
    pub async fn set_budget(
        &self,
        task: schedule_task::Model,
        budget: i64,
    ) -> AppResult<schedule_task::Model> {
        let mut active: schedule_task::ActiveModel = task.into();
        active.estimated_budget = Set(budget);

        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete tasks by id, scoped to a group.
    ///
    /// One `DELETE ... WHERE id IN (...) AND group_id = ?` statement, so the
    /// batch is atomic; ids belonging to other groups are simply not matched.
    /// Returns the number of rows removed.
    pub async fn delete_by_ids(&self, group_id: i64, ids: &[i64]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = ScheduleTask::delete_many()
            .filter(schedule_task::Column::Id.is_in(ids.iter().copied()))
            .filter(schedule_task::Column::GroupId.eq(group_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::schedule_task::TaskCategory;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_task(id: i64, group_id: i64, offset: Option<i32>) -> schedule_task::Model {
        schedule_task::Model {
            id,
            group_id,
            date: None,
            expected_date: None,
            title: format!("Task {id}"),
            description: String::new(),
            category: TaskCategory::Other,
            difficulty: 1,
            d_day_offset: offset,
            estimated_budget: 0,
            is_done: false,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_and_group_scopes_ownership() {
        // Query for a task of another group matches nothing.
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<schedule_task::Model>::new()])
                .into_connection(),
        );

        let repo = TaskRepository::new(db);
        let result = repo.find_by_id_and_group(3, 99).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_and_group_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<schedule_task::Model>::new()])
                .into_connection(),
        );

        let repo = TaskRepository::new(db);
        let result = repo.get_by_id_and_group(7, 1).await;

        assert!(matches!(result, Err(AppError::TaskNotFound(7))));
    }

    #[tokio::test]
    async fn test_find_by_group_returns_checklist_order() {
        let t1 = create_test_task(1, 1, Some(-300));
        let t2 = create_test_task(2, 1, Some(-100));
        let t3 = create_test_task(3, 1, None);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[t1, t2, t3]])
                .into_connection(),
        );

        let repo = TaskRepository::new(db);
        let result = repo.find_by_group(1).await.unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].d_day_offset, Some(-300));
    }

    #[tokio::test]
    async fn test_delete_by_ids_empty_is_noop() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = TaskRepository::new(db);
        let deleted = repo.delete_by_ids(1, &[]).await.unwrap();

        assert_eq!(deleted, 0);
    }

    #[tokio::test]
    async fn test_delete_by_ids_reports_rows_affected() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 3,
                }])
                .into_connection(),
        );

        let repo = TaskRepository::new(db);
        let deleted = repo.delete_by_ids(1, &[3, 7, 9]).await.unwrap();

        assert_eq!(deleted, 3);
    }
}
