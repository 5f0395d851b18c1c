//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use wedplan_core::{
    AccountService, CalendarService, CommunityService, DailyLogService, GroupService,
    NoticeService, ScheduleService, VendorService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
    pub group_service: GroupService,
    pub schedule_service: ScheduleService,
    pub calendar_service: CalendarService,
    pub daily_log_service: DailyLogService,
    pub vendor_service: VendorService,
    pub community_service: CommunityService,
    pub notice_service: NoticeService,
}

/// Authentication middleware.
///
/// Resolves a `Bearer` token to a user row and stashes it in request
/// extensions; endpoints pull it back out with the `AuthUser` extractor.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(user) = state.account_service.authenticate_by_token(token).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
