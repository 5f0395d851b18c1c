//! Wedding group entity - the shared household unit that owns planning data.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Wedding group entity.
///
/// Created once at onboarding; both partners join the same group via its
/// invite code. Schedule tasks and daily logs are owned by the group, not
/// by individual profiles. `wedding_date` here is the single source of
/// truth for the wedding date.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wedding_group")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Planned wedding date, if already decided.
    #[sea_orm(nullable)]
    pub wedding_date: Option<Date>,

    /// 6-character uppercase-alphanumeric invite code, unique.
    #[sea_orm(unique)]
    pub invite_code: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::wedding_profile::Entity")]
    Profiles,
    #[sea_orm(has_many = "super::schedule_task::Entity")]
    Tasks,
    #[sea_orm(has_many = "super::daily_log::Entity")]
    Logs,
}

impl Related<super::wedding_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profiles.def()
    }
}

impl Related<super::schedule_task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tasks.def()
    }
}

impl Related<super::daily_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Logs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
