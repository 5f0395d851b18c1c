//! HTTP API layer for wedplan.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: dashboard, schedule/calendar, checklist, vendors,
//!   community board, notices
//! - **Extractors**: authenticated-user extraction from request extensions
//! - **Middleware**: bearer-token authentication, shared [`middleware::AppState`]
//! - **Response**: the JSON envelope shared by every endpoint
//!
//! Built on Axum 0.8 with Tower middleware stack.

// Allow dead_code for API compatibility fields in request structs
#![allow(dead_code)]

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
