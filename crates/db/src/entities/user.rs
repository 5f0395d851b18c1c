//! User entity.
//!
//! Accounts are provisioned by the authentication collaborator; this table
//! only carries what the planner itself needs (identity, display name,
//! admin flag and the opaque API token the collaborator issues).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User entity.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Login name, unique.
    #[sea_orm(unique)]
    pub username: String,

    /// Display name shown in the community board.
    #[sea_orm(nullable)]
    pub display_name: Option<String>,

    /// Opaque bearer token issued by the authentication collaborator.
    #[sea_orm(unique)]
    pub api_token: String,

    /// Whether the user may author notices.
    #[sea_orm(default_value = false)]
    pub is_admin: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::wedding_profile::Entity")]
    Profile,
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
}

impl Related<super::wedding_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
