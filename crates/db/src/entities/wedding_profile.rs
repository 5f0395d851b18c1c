//! Wedding profile entity - per-user planning preferences.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Wedding profile entity.
///
/// One per user. Links the user to their wedding group; `group_id` is null
/// between account creation and onboarding/joining.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wedding_profile")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(unique)]
    pub user_id: i64,

    /// Owning wedding group, set at onboarding or when joining by code.
    #[sea_orm(nullable, indexed)]
    pub group_id: Option<i64>,

    /// Preferred ceremony region (province/city level).
    #[sea_orm(nullable)]
    pub region_sido: Option<String>,

    /// Preferred ceremony region (district level).
    #[sea_orm(nullable)]
    pub region_sigungu: Option<String>,

    /// Preferred ceremony style, free text.
    #[sea_orm(nullable)]
    pub style: Option<String>,

    #[sea_orm(nullable)]
    pub budget_min: Option<i64>,

    #[sea_orm(nullable)]
    pub budget_max: Option<i64>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::wedding_group::Entity",
        from = "Column::GroupId",
        to = "super::wedding_group::Column::Id",
        on_delete = "SetNull"
    )]
    Group,
    #[sea_orm(has_many = "super::vendor_selection::Entity")]
    VendorSelections,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::wedding_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl Related<super::vendor_selection::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VendorSelections.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
