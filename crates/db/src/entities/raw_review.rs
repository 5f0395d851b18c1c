//! Raw review entity - review snippets crawled from place-search providers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Raw review entity.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "raw_review")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(indexed)]
    pub vendor_id: i64,

    /// Provider the review came from ("naver" or "google").
    pub source: String,

    #[sea_orm(default_value = "")]
    pub author_name: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    #[sea_orm(nullable)]
    pub rating: Option<f64>,

    #[sea_orm(nullable)]
    pub written_at: Option<Date>,

    pub crawled_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vendor::Entity",
        from = "Column::VendorId",
        to = "super::vendor::Column::Id",
        on_delete = "Cascade"
    )]
    Vendor,
}

impl Related<super::vendor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
