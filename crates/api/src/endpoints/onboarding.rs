//! Onboarding endpoints: create a wedding group or join one by invite code.

use axum::{Json, Router, extract::State, routing::post};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;
use wedplan_common::AppResult;
use wedplan_db::entities::{wedding_group, wedding_profile};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Create onboarding router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(onboard))
        .route("/join", post(join))
}

/// Group response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    pub id: i64,
    pub wedding_date: Option<NaiveDate>,
    pub invite_code: String,
}

impl From<wedding_group::Model> for GroupResponse {
    fn from(group: wedding_group::Model) -> Self {
        Self {
            id: group.id,
            wedding_date: group.wedding_date,
            invite_code: group.invite_code,
        }
    }
}

/// Profile response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: i64,
    pub group_id: Option<i64>,
    pub region_sido: Option<String>,
    pub region_sigungu: Option<String>,
}

impl From<wedding_profile::Model> for ProfileResponse {
    fn from(profile: wedding_profile::Model) -> Self {
        Self {
            id: profile.id,
            group_id: profile.group_id,
            region_sido: profile.region_sido,
            region_sigungu: profile.region_sigungu,
        }
    }
}

/// Onboarding response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingResponse {
    pub profile: ProfileResponse,
    pub group: GroupResponse,
}

/// Onboarding request. The wedding date is optional; couples can decide
/// later from the dashboard.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OnboardRequest {
    pub wedding_date: Option<NaiveDate>,
    #[validate(length(max = 50))]
    pub region_sido: Option<String>,
    #[validate(length(max = 50))]
    pub region_sigungu: Option<String>,
}

/// Create a new wedding group for the caller and seed its checklist.
async fn onboard(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<OnboardRequest>,
) -> AppResult<ApiResponse<OnboardingResponse>> {
    req.validate()?;

    let (profile, group) = state
        .group_service
        .onboard(user.id, req.wedding_date, req.region_sido, req.region_sigungu)
        .await?;

    Ok(ApiResponse::ok(OnboardingResponse {
        profile: ProfileResponse::from(profile),
        group: GroupResponse::from(group),
    }))
}

/// Join request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    #[validate(length(min = 6, max = 6))]
    pub invite_code: String,
}

/// Join an existing group by invite code.
async fn join(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<JoinRequest>,
) -> AppResult<ApiResponse<OnboardingResponse>> {
    req.validate()?;

    let (profile, group) = state.group_service.join(user.id, &req.invite_code).await?;

    Ok(ApiResponse::ok(OnboardingResponse {
        profile: ProfileResponse::from(profile),
        group: GroupResponse::from(group),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_join_request_validates_code_length() {
        let ok = JoinRequest {
            invite_code: "AB2CD3".to_string(),
        };
        assert!(ok.validate().is_ok());

        let short = JoinRequest {
            invite_code: "AB2".to_string(),
        };
        assert!(short.validate().is_err());
    }

    #[test]
    fn test_group_response_serialization() {
        let group = wedding_group::Model {
            id: 1,
            wedding_date: NaiveDate::from_ymd_opt(2025, 12, 25),
            invite_code: "AB2CD3".to_string(),
            created_at: chrono::Utc::now().into(),
        };

        let json = serde_json::to_string(&GroupResponse::from(group)).unwrap();
        assert!(json.contains("\"inviteCode\":\"AB2CD3\""));
        assert!(json.contains("\"weddingDate\":\"2025-12-25\""));
    }
}
