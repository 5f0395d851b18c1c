//! Schedule/calendar endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use wedplan_common::AppResult;
use wedplan_core::{CalendarCell, DdayAction, MonthView};
use wedplan_db::entities::schedule_task;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Create schedule router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(month_view))
        .route("/tasks/{id}/date", post(assign_task_date))
        .route("/logs", post(save_log))
}

/// Task response shared by the schedule and checklist endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: schedule_task::TaskCategory,
    pub difficulty: i16,
    pub date: Option<NaiveDate>,
    pub expected_date: Option<NaiveDate>,
    pub d_day_offset: Option<i32>,
    pub estimated_budget: i64,
    pub is_done: bool,
}

impl From<schedule_task::Model> for TaskResponse {
    fn from(task: schedule_task::Model) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            category: task.category,
            difficulty: task.difficulty,
            date: task.date,
            expected_date: task.expected_date,
            d_day_offset: task.d_day_offset,
            estimated_budget: task.estimated_budget,
            is_done: task.is_done,
        }
    }
}

/// One calendar cell.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCellResponse {
    pub day: u32,
    pub is_empty: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_wedding_day: bool,
    pub has_log: bool,
    pub log_content: String,
    pub tasks: Vec<TaskResponse>,
    pub date: Option<NaiveDate>,
}

impl From<CalendarCell> for CalendarCellResponse {
    fn from(cell: CalendarCell) -> Self {
        Self {
            day: cell.day,
            is_empty: cell.is_empty,
            is_today: cell.is_today,
            is_selected: cell.is_selected,
            is_wedding_day: cell.is_wedding_day,
            has_log: cell.has_log,
            log_content: cell.log_content,
            tasks: cell.tasks.into_iter().map(TaskResponse::from).collect(),
            date: cell.date,
        }
    }
}

/// Month view response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthViewResponse {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<CalendarCellResponse>>,
    pub selected_date: NaiveDate,
    pub d_day: Option<i64>,
    pub actions: [DdayAction; 3],
    pub unscheduled_tasks: Vec<TaskResponse>,
    pub prev_year: i32,
    pub prev_month: u32,
    pub next_year: i32,
    pub next_month: u32,
}

impl From<MonthView> for MonthViewResponse {
    fn from(view: MonthView) -> Self {
        Self {
            year: view.year,
            month: view.month,
            weeks: view
                .weeks
                .into_iter()
                .map(|week| week.into_iter().map(CalendarCellResponse::from).collect())
                .collect(),
            selected_date: view.selected_date,
            d_day: view.d_day,
            actions: view.actions,
            unscheduled_tasks: view
                .unscheduled_tasks
                .into_iter()
                .map(TaskResponse::from)
                .collect(),
            prev_year: view.prev_year,
            prev_month: view.prev_month,
            next_year: view.next_year,
            next_month: view.next_month,
        }
    }
}

/// Month view query.
///
/// `month` is deliberately a plain integer: the month-nav links emit 0 and
/// 13, which wrap into the neighbouring year.
#[derive(Debug, Deserialize)]
pub struct MonthViewQuery {
    pub year: Option<i32>,
    pub month: Option<i32>,
    /// Selected date, ISO `YYYY-MM-DD`; invalid values fall back to today.
    pub date: Option<String>,
}

/// Render the calendar month view.
async fn month_view(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<MonthViewQuery>,
) -> AppResult<ApiResponse<MonthViewResponse>> {
    let (_, group) = state.group_service.profile_and_group(user.id).await?;

    let today = Utc::now().date_naive();
    let view = state
        .calendar_service
        .month_view(&group, query.year, query.month, query.date.as_deref(), today)
        .await?;

    Ok(ApiResponse::ok(MonthViewResponse::from(view)))
}

/// Assign-task-date request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignDateRequest {
    /// ISO `YYYY-MM-DD`; an unparseable value is a silent no-op.
    pub date: String,
}

/// Schedule a task onto a concrete day.
async fn assign_task_date(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    Json(req): Json<AssignDateRequest>,
) -> AppResult<ApiResponse<Option<TaskResponse>>> {
    let (_, group) = state.group_service.profile_and_group(user.id).await?;

    let Ok(date) = NaiveDate::parse_from_str(req.date.trim(), "%Y-%m-%d") else {
        debug!(task_id, input = %req.date, "Ignoring unparseable task date");
        return Ok(ApiResponse::ok(None));
    };

    let task = state
        .schedule_service
        .assign_date(group.id, task_id, date)
        .await?;

    Ok(ApiResponse::ok(Some(TaskResponse::from(task))))
}

/// Save-daily-log request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveLogRequest {
    /// ISO `YYYY-MM-DD`; invalid or missing falls back to today.
    pub date: Option<String>,
    pub content: String,
}

/// Daily log response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLogResponse {
    pub date: NaiveDate,
    pub content: String,
}

/// Save the journal entry for a day (upsert).
async fn save_log(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SaveLogRequest>,
) -> AppResult<ApiResponse<DailyLogResponse>> {
    let (_, group) = state.group_service.profile_and_group(user.id).await?;

    let today = Utc::now().date_naive();
    let date = req
        .date
        .as_deref()
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        .unwrap_or(today);

    let log = state
        .daily_log_service
        .save(group.id, date, req.content)
        .await?;

    Ok(ApiResponse::ok(DailyLogResponse {
        date: log.date,
        content: log.content,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use wedplan_db::entities::schedule_task::TaskCategory;

    #[test]
    fn test_task_response_serialization() {
        let task = schedule_task::Model {
            id: 1,
            group_id: 1,
            date: None,
            expected_date: None,
            title: "웨딩홀 투어 및 계약".to_string(),
            description: String::new(),
            category: TaskCategory::Venue,
            difficulty: 3,
            d_day_offset: Some(-300),
            estimated_budget: 0,
            is_done: false,
            created_at: Utc::now().into(),
        };

        let json = serde_json::to_string(&TaskResponse::from(task)).unwrap();
        assert!(json.contains("\"dDayOffset\":-300"));
        assert!(json.contains("\"isDone\":false"));
        assert!(json.contains("\"category\":\"VENUE\""));
    }
}
