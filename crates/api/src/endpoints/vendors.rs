//! Vendor directory endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use wedplan_common::AppResult;
use wedplan_db::entities::vendor_selection::SelectionStatus;
use wedplan_db::entities::{raw_review, vendor, vendor_category, vendor_selection};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Create vendor router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vendors))
        .route("/{id}", get(vendor_detail))
        .route("/{id}/selection", post(select_vendor))
}

/// Vendor response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorResponse {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub region_sido: String,
    pub region_sigungu: String,
    pub address: String,
    pub image_url: Option<String>,
    pub avg_rating: f64,
    pub review_count: i32,
    pub summary_positive: String,
    pub summary_negative: String,
}

impl From<vendor::Model> for VendorResponse {
    fn from(vendor: vendor::Model) -> Self {
        Self {
            id: vendor.id,
            name: vendor.name,
            category_id: vendor.category_id,
            region_sido: vendor.region_sido,
            region_sigungu: vendor.region_sigungu,
            address: vendor.address,
            image_url: vendor.image_url,
            avg_rating: vendor.avg_rating,
            review_count: vendor.review_count,
            summary_positive: vendor.summary_positive,
            summary_negative: vendor.summary_negative,
        }
    }
}

/// Category response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<vendor_category::Model> for CategoryResponse {
    fn from(category: vendor_category::Model) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
        }
    }
}

/// Selection response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    pub vendor_id: i64,
    pub status: SelectionStatus,
}

impl From<vendor_selection::Model> for SelectionResponse {
    fn from(selection: vendor_selection::Model) -> Self {
        Self {
            vendor_id: selection.vendor_id,
            status: selection.status,
        }
    }
}

/// Review snippet response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub source: String,
    pub author_name: String,
    pub content: String,
    pub rating: Option<f64>,
    pub written_at: Option<NaiveDate>,
}

impl From<raw_review::Model> for ReviewResponse {
    fn from(review: raw_review::Model) -> Self {
        Self {
            source: review.source,
            author_name: review.author_name,
            content: review.content,
            rating: review.rating,
            written_at: review.written_at,
        }
    }
}

/// Vendor list query.
#[derive(Debug, Deserialize)]
pub struct ListVendorsQuery {
    /// Category slug, exact match.
    pub category: Option<String>,
    /// Region substring, matched against sido/sigungu/address.
    pub region: Option<String>,
}

/// Vendor list response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorListResponse {
    pub vendors: Vec<VendorResponse>,
    pub categories: Vec<CategoryResponse>,
}

/// List vendors with optional filters.
///
/// With both filters present a stale `(category, region)` pair triggers the
/// external place-search sync before the DB read.
async fn list_vendors(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListVendorsQuery>,
) -> AppResult<ApiResponse<VendorListResponse>> {
    let vendors = state
        .vendor_service
        .list(query.category.as_deref(), query.region.as_deref(), Utc::now())
        .await?;
    let categories = state.vendor_service.categories().await?;

    Ok(ApiResponse::ok(VendorListResponse {
        vendors: vendors.into_iter().map(VendorResponse::from).collect(),
        categories: categories.into_iter().map(CategoryResponse::from).collect(),
    }))
}

/// Vendor detail response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorDetailResponse {
    pub vendor: VendorResponse,
    pub selection: Option<SelectionResponse>,
    pub reviews: Vec<ReviewResponse>,
}

/// Vendor detail with the caller's selection state.
async fn vendor_detail(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(vendor_id): Path<i64>,
) -> AppResult<ApiResponse<VendorDetailResponse>> {
    // Selection state only renders for users who finished onboarding.
    let profile_id = state
        .group_service
        .profile_and_group(user.id)
        .await
        .ok()
        .map(|(profile, _)| profile.id);

    let detail = state.vendor_service.detail(vendor_id, profile_id).await?;

    Ok(ApiResponse::ok(VendorDetailResponse {
        vendor: VendorResponse::from(detail.vendor),
        selection: detail.selection.map(SelectionResponse::from),
        reviews: detail.reviews.into_iter().map(ReviewResponse::from).collect(),
    }))
}

/// Select-vendor request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectVendorRequest {
    pub status: SelectionStatus,
}

/// Shortlist or finalize a vendor for the caller's profile.
async fn select_vendor(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(vendor_id): Path<i64>,
    Json(req): Json<SelectVendorRequest>,
) -> AppResult<ApiResponse<SelectionResponse>> {
    let (profile, _) = state.group_service.profile_and_group(user.id).await?;

    let selection = state
        .vendor_service
        .select(profile.id, vendor_id, req.status)
        .await?;

    Ok(ApiResponse::ok(SelectionResponse::from(selection)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_select_vendor_request_parses_statuses() {
        let req: SelectVendorRequest =
            serde_json::from_str(r#"{"status":"candidate"}"#).unwrap();
        assert_eq!(req.status, SelectionStatus::Candidate);

        let req: SelectVendorRequest = serde_json::from_str(r#"{"status":"final"}"#).unwrap();
        assert_eq!(req.status, SelectionStatus::Final);

        assert!(serde_json::from_str::<SelectVendorRequest>(r#"{"status":"maybe"}"#).is_err());
    }

    #[test]
    fn test_selection_response_serialization() {
        let selection = vendor_selection::Model {
            id: 1,
            profile_id: 1,
            vendor_id: 2,
            status: SelectionStatus::Final,
            created_at: Utc::now().into(),
            updated_at: None,
        };

        let json = serde_json::to_string(&SelectionResponse::from(selection)).unwrap();
        assert!(json.contains("\"status\":\"final\""));
    }
}
