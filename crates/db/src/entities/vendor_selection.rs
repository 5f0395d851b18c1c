//! Vendor selection entity - a profile's shortlist/decision state per vendor.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Selection status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum SelectionStatus {
    /// Shortlisted.
    #[sea_orm(string_value = "candidate")]
    Candidate,
    /// Committed choice for the category.
    #[sea_orm(string_value = "final")]
    Final,
}

impl Default for SelectionStatus {
    fn default() -> Self {
        Self::Candidate
    }
}

/// Vendor selection entity. Unique per `(profile_id, vendor_id)`; selecting
/// again overwrites the status.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vendor_selection")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(indexed)]
    pub profile_id: i64,

    #[sea_orm(indexed)]
    pub vendor_id: i64,

    pub status: SelectionStatus,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::wedding_profile::Entity",
        from = "Column::ProfileId",
        to = "super::wedding_profile::Column::Id",
        on_delete = "Cascade"
    )]
    Profile,
    #[sea_orm(
        belongs_to = "super::vendor::Entity",
        from = "Column::VendorId",
        to = "super::vendor::Column::Id",
        on_delete = "Cascade"
    )]
    Vendor,
}

impl Related<super::wedding_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl Related<super::vendor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
