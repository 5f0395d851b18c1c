//! Core business logic for wedplan.

pub mod services;

pub use services::*;
