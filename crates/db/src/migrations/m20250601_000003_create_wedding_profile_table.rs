//! Create wedding profile table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WeddingProfile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WeddingProfile::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WeddingProfile::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(WeddingProfile::GroupId).big_integer())
                    .col(ColumnDef::new(WeddingProfile::RegionSido).string_len(50))
                    .col(ColumnDef::new(WeddingProfile::RegionSigungu).string_len(50))
                    .col(ColumnDef::new(WeddingProfile::Style).string_len(50))
                    .col(ColumnDef::new(WeddingProfile::BudgetMin).big_integer())
                    .col(ColumnDef::new(WeddingProfile::BudgetMax).big_integer())
                    .col(
                        ColumnDef::new(WeddingProfile::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_wedding_profile_group_id")
                    .table(WeddingProfile::Table)
                    .col(WeddingProfile::GroupId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_wedding_profile_user_id")
                    .from(WeddingProfile::Table, WeddingProfile::UserId)
                    .to(User::Table, User::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_wedding_profile_group_id")
                    .from(WeddingProfile::Table, WeddingProfile::GroupId)
                    .to(WeddingGroup::Table, WeddingGroup::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WeddingProfile::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum WeddingProfile {
    Table,
    Id,
    UserId,
    GroupId,
    RegionSido,
    RegionSigungu,
    Style,
    BudgetMin,
    BudgetMax,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}

#[derive(Iden)]
enum WeddingGroup {
    Table,
    Id,
}
