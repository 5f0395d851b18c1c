//! Common utilities and shared types for wedplan.
//!
//! This crate provides foundational components used across all wedplan crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **Invite codes**: Group invite-code generation via [`InviteCodeGenerator`]
//! - **Place search**: External place-search provider clients for the vendor
//!   directory sync
//!
//! # Example
//!
//! ```no_run
//! use wedplan_common::{Config, InviteCodeGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let codes = InviteCodeGenerator::new();
//!     let code = codes.generate();
//!     println!("Invite code: {code}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod invite;
pub mod places;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use invite::InviteCodeGenerator;
pub use places::{
    GooglePlacesClient, NaverLocalClient, PlaceResult, PlaceReview, PlaceSearchConfig,
    PlaceSearchProvider,
};
