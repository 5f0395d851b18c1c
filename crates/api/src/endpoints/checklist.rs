//! Checklist endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use validator::Validate;
use wedplan_common::AppResult;

use super::schedule::TaskResponse;
use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Create checklist router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(checklist))
        .route("/tasks", post(create_task))
        .route("/tasks/delete", post(bulk_delete_tasks))
        .route("/tasks/{id}/toggle", post(toggle_task))
        .route("/tasks/{id}/budget", post(update_task_budget))
}

/// Checklist response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistResponse {
    pub tasks: Vec<TaskResponse>,
    pub total_budget: i64,
}

/// Full checklist in display order.
async fn checklist(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<ChecklistResponse>> {
    let (_, group) = state.group_service.profile_and_group(user.id).await?;

    let view = state.schedule_service.checklist(group.id).await?;

    Ok(ApiResponse::ok(ChecklistResponse {
        tasks: view.tasks.into_iter().map(TaskResponse::from).collect(),
        total_budget: view.total_budget,
    }))
}

/// Create-task request.
///
/// `budget` and `daysLeft` arrive as raw form text; non-numeric values are
/// ignored rather than rejected (the task is still created).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Raw budget input, e.g. "1,500,000".
    pub budget: Option<String>,
    /// "Days remaining before the wedding" as entered, e.g. "100" for D-100.
    pub days_left: Option<String>,
}

/// Add a task to the checklist.
async fn create_task(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> AppResult<ApiResponse<TaskResponse>> {
    req.validate()?;

    let (_, group) = state.group_service.profile_and_group(user.id).await?;

    let task = state
        .schedule_service
        .add_task(
            group.id,
            group.wedding_date,
            req.title,
            req.description,
            req.budget.as_deref(),
            req.days_left.as_deref(),
        )
        .await?;

    Ok(ApiResponse::ok(TaskResponse::from(task)))
}

/// Bulk-delete request: a JSON array of task ids, the one canonical wire
/// format. Anything that fails to deserialize rejects the whole request;
/// the batch is never partially applied.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteRequest {
    pub task_ids: Vec<i64>,
}

/// Bulk-delete response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteResponse {
    pub deleted: u64,
}

/// Delete a batch of tasks.
async fn bulk_delete_tasks(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<BulkDeleteRequest>,
) -> AppResult<ApiResponse<BulkDeleteResponse>> {
    let (_, group) = state.group_service.profile_and_group(user.id).await?;

    let deleted = state
        .schedule_service
        .bulk_delete(group.id, &req.task_ids)
        .await?;

    Ok(ApiResponse::ok(BulkDeleteResponse { deleted }))
}

/// Flip a task's completion state.
async fn toggle_task(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> AppResult<ApiResponse<TaskResponse>> {
    let (_, group) = state.group_service.profile_and_group(user.id).await?;

    let task = state.schedule_service.toggle_done(group.id, task_id).await?;

    Ok(ApiResponse::ok(TaskResponse::from(task)))
}

/// Update-budget request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBudgetRequest {
    /// Raw budget input; thousands separators are tolerated.
    pub value: String,
}

/// Update a task's estimated budget.
async fn update_task_budget(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    Json(req): Json<UpdateBudgetRequest>,
) -> AppResult<ApiResponse<Option<TaskResponse>>> {
    let (_, group) = state.group_service.profile_and_group(user.id).await?;

    let task = state
        .schedule_service
        .update_budget(group.id, task_id, &req.value)
        .await?;

    Ok(ApiResponse::ok(task.map(TaskResponse::from)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_delete_request_rejects_malformed_ids() {
        // The canonical wire format is a JSON integer array; anything else
        // must fail to parse so the batch is rejected whole.
        assert!(serde_json::from_str::<BulkDeleteRequest>(r#"{"taskIds":[3,7,9]}"#).is_ok());
        assert!(serde_json::from_str::<BulkDeleteRequest>(r#"{"taskIds":"3,7,9"}"#).is_err());
        assert!(serde_json::from_str::<BulkDeleteRequest>(r#"{"taskIds":[3,"x",9]}"#).is_err());
    }

    #[test]
    fn test_create_task_request_validation() {
        let ok = CreateTaskRequest {
            title: "부케 주문".to_string(),
            description: String::new(),
            budget: Some("150,000".to_string()),
            days_left: Some("20".to_string()),
        };
        assert!(ok.validate().is_ok());

        let empty_title = CreateTaskRequest {
            title: String::new(),
            description: String::new(),
            budget: None,
            days_left: None,
        };
        assert!(empty_title.validate().is_err());
    }
}
