//! Daily log entity - one journal entry per group and day.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Daily log entity. Unique per `(group_id, date)`; writes go through
/// upsert, never a second row for the same day.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(indexed)]
    pub group_id: i64,

    pub date: Date,

    /// Journal text; empty string is allowed.
    #[sea_orm(column_type = "Text", default_value = "")]
    pub content: String,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::wedding_group::Entity",
        from = "Column::GroupId",
        to = "super::wedding_group::Column::Id",
        on_delete = "Cascade"
    )]
    Group,
}

impl Related<super::wedding_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
