//! Vendor sync flag entity - memoizes external place-search calls.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sync flag for a `(category_slug, region)` filter pair.
///
/// Present and fresh means the pair was synced from the external provider
/// within the TTL window and the call can be skipped. This is a best-effort
/// flag, not a correctness cache: concurrent requests may both miss it and
/// sync twice, which the place-id upsert makes harmless.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vendor_sync_flag")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub category_slug: String,

    pub region: String,

    /// When the pair was last synced from the provider.
    pub synced_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
