//! Dashboard endpoints.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use wedplan_common::AppResult;
use wedplan_core::{GroupService, VendorSelectionStatus};
use wedplan_db::entities::daily_log;

use super::onboarding::GroupResponse;
use super::schedule::TaskResponse;
use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Create dashboard router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/wedding-date", post(update_wedding_date))
        .route("/display-name", post(update_display_name))
}

/// Upcoming daily log entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingLogResponse {
    pub date: NaiveDate,
    pub content: String,
}

impl From<daily_log::Model> for UpcomingLogResponse {
    fn from(log: daily_log::Model) -> Self {
        Self {
            date: log.date,
            content: log.content,
        }
    }
}

/// Dashboard response: D-Day, group card, vendor status and the two
/// upcoming lists (tasks and memos, kept separate).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub group: GroupResponse,
    pub d_day: Option<i64>,
    pub vendor_status: VendorSelectionStatus,
    pub upcoming_tasks: Vec<TaskResponse>,
    pub upcoming_logs: Vec<UpcomingLogResponse>,
}

/// Render the dashboard.
async fn dashboard(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<DashboardResponse>> {
    let (profile, group) = state.group_service.profile_and_group(user.id).await?;

    let today = Utc::now().date_naive();
    let d_day = GroupService::d_day(&group, today);

    let vendor_status = state.vendor_service.selection_status(profile.id).await?;
    let upcoming = state.calendar_service.upcoming(group.id, today).await?;

    Ok(ApiResponse::ok(DashboardResponse {
        group: GroupResponse::from(group),
        d_day,
        vendor_status,
        upcoming_tasks: upcoming
            .tasks
            .into_iter()
            .map(TaskResponse::from)
            .collect(),
        upcoming_logs: upcoming
            .logs
            .into_iter()
            .map(UpcomingLogResponse::from)
            .collect(),
    }))
}

/// Update-wedding-date request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWeddingDateRequest {
    /// ISO `YYYY-MM-DD`; an unparseable value is silently ignored.
    pub wedding_date: String,
}

/// Update the group's wedding date.
async fn update_wedding_date(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateWeddingDateRequest>,
) -> AppResult<ApiResponse<Option<GroupResponse>>> {
    let (_, group) = state.group_service.profile_and_group(user.id).await?;

    let updated = state
        .group_service
        .update_wedding_date(group.id, &req.wedding_date)
        .await?;

    Ok(ApiResponse::ok(updated.map(GroupResponse::from)))
}

/// Update-display-name request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDisplayNameRequest {
    pub display_name: String,
}

/// Display-name response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayNameResponse {
    pub display_name: Option<String>,
}

/// Update the caller's display name. Empty input is ignored.
async fn update_display_name(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateDisplayNameRequest>,
) -> AppResult<ApiResponse<DisplayNameResponse>> {
    let updated = state
        .account_service
        .update_display_name(user.id, &req.display_name)
        .await?;

    Ok(ApiResponse::ok(DisplayNameResponse {
        display_name: updated.and_then(|u| u.display_name).or(user.display_name),
    }))
}
