//! API endpoints.

mod checklist;
mod community;
mod dashboard;
mod notices;
mod onboarding;
mod schedule;
mod vendors;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/onboarding", onboarding::router())
        .nest("/dashboard", dashboard::router())
        .nest("/schedule", schedule::router())
        .nest("/checklist", checklist::router())
        .nest("/vendors", vendors::router())
        .nest("/community", community::router())
        .nest("/notices", notices::router())
}
