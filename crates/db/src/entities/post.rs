//! Community post entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Board category of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostCategory {
    /// Free talk.
    #[sea_orm(string_value = "GENERAL")]
    General,
    /// Questions to the community.
    #[sea_orm(string_value = "QUESTION")]
    Question,
    /// Vendor/venue reviews.
    #[sea_orm(string_value = "REVIEW")]
    Review,
    /// Planning tips.
    #[sea_orm(string_value = "TIP")]
    Tip,
}

impl Default for PostCategory {
    fn default() -> Self {
        Self::General
    }
}

/// Community post entity.
///
/// `view_count`, `recommendation_count` and `comment_count` are
/// denormalized counters maintained with atomic column expressions; the
/// recommendation and comment tables stay the source of truth.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(indexed)]
    pub author_id: i64,

    pub category: PostCategory,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    #[sea_orm(nullable)]
    pub image_url: Option<String>,

    #[sea_orm(default_value = 0)]
    pub view_count: i64,

    #[sea_orm(default_value = 0)]
    pub recommendation_count: i64,

    #[sea_orm(default_value = 0)]
    pub comment_count: i64,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(has_many = "super::post_comment::Entity")]
    Comments,
    #[sea_orm(has_many = "super::post_recommendation::Entity")]
    Recommendations,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::post_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::post_recommendation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recommendations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
