//! Vendor category entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vendor category (venue, studio, dress, makeup, ...).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vendor_category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Display name, e.g. "예식장".
    pub name: String,

    /// URL-safe identifier, unique, e.g. "venue".
    #[sea_orm(unique)]
    pub slug: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::vendor::Entity")]
    Vendors,
}

impl Related<super::vendor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
