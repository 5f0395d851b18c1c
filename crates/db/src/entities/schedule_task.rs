//! Schedule task entity - one checklist item owned by a wedding group.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Planning category of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskCategory {
    /// Meeting of the families.
    #[sea_orm(string_value = "MEETING")]
    Meeting,
    /// Wedding venue.
    #[sea_orm(string_value = "VENUE")]
    Venue,
    /// Studio / dress / makeup package.
    #[sea_orm(string_value = "SDM")]
    Sdm,
    /// Formal wear and hanbok.
    #[sea_orm(string_value = "ATTIRE")]
    Attire,
    /// Invitations.
    #[sea_orm(string_value = "INVITATION")]
    Invitation,
    /// Honeymoon.
    #[sea_orm(string_value = "HONEYMOON")]
    Honeymoon,
    /// Home furnishing.
    #[sea_orm(string_value = "FURNISHING")]
    Furnishing,
    /// Contracts and payments.
    #[sea_orm(string_value = "CONTRACT")]
    Contract,
    /// Everything else.
    #[sea_orm(string_value = "OTHER")]
    Other,
}

impl Default for TaskCategory {
    fn default() -> Self {
        Self::Other
    }
}

/// Schedule task entity.
///
/// `d_day_offset` counts days relative to the wedding date (negative =
/// before). `date` is independent: it stays null until the task is
/// scheduled onto a concrete day.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "schedule_task")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(indexed)]
    pub group_id: i64,

    /// Concrete scheduled day, null while unscheduled.
    #[sea_orm(nullable, indexed)]
    pub date: Option<Date>,

    /// Optional target day, distinct from the scheduled day.
    #[sea_orm(nullable)]
    pub expected_date: Option<Date>,

    pub title: String,

    #[sea_orm(column_type = "Text", default_value = "")]
    pub description: String,

    pub category: TaskCategory,

    /// 1 (low) to 3 (high).
    #[sea_orm(default_value = 1)]
    pub difficulty: i16,

    /// Days relative to the wedding date; -100 means D-100.
    #[sea_orm(nullable)]
    pub d_day_offset: Option<i32>,

    /// Estimated budget in currency units.
    #[sea_orm(default_value = 0)]
    pub estimated_budget: i64,

    #[sea_orm(default_value = false)]
    pub is_done: bool,

    pub created_at: DateTimeWithTimeZone,
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
