//! Vendor entity - a wedding service business.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vendor entity.
///
/// Rows come from two sources: seeded/admin data and the external
/// place-search sync. Synced rows carry a `google_place_id`, which is the
/// upsert key for refreshing ratings.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vendor")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: String,

    #[sea_orm(indexed)]
    pub category_id: i64,

    /// Province/city part of the region.
    pub region_sido: String,

    /// District part of the region.
    pub region_sigungu: String,

    #[sea_orm(default_value = "")]
    pub address: String,

    #[sea_orm(nullable)]
    pub image_url: Option<String>,

    /// External identity key from Naver, when known.
    #[sea_orm(nullable)]
    pub naver_place_id: Option<String>,

    /// External identity key from Google, when known. Sync upserts key on
    /// this column.
    #[sea_orm(nullable, indexed)]
    pub google_place_id: Option<String>,

    #[sea_orm(default_value = 0.0)]
    pub avg_rating: f64,

    #[sea_orm(default_value = 0)]
    pub review_count: i32,

    /// Free-text positive review summary.
    #[sea_orm(column_type = "Text", default_value = "")]
    pub summary_positive: String,

    /// Free-text negative review summary.
    #[sea_orm(column_type = "Text", default_value = "")]
    pub summary_negative: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vendor_category::Entity",
        from = "Column::CategoryId",
        to = "super::vendor_category::Column::Id",
        on_delete = "Cascade"
    )]
    Category,
    #[sea_orm(has_many = "super::vendor_selection::Entity")]
    Selections,
    #[sea_orm(has_many = "super::raw_review::Entity")]
    Reviews,
}

impl Related<super::vendor_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::vendor_selection::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Selections.def()
    }
}

impl Related<super::raw_review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
