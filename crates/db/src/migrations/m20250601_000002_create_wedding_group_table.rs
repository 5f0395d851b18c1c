//! Create wedding group table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WeddingGroup::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WeddingGroup::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WeddingGroup::WeddingDate).date())
                    .col(
                        ColumnDef::new(WeddingGroup::InviteCode)
                            .string_len(16)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(WeddingGroup::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WeddingGroup::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum WeddingGroup {
    Table,
    Id,
    WeddingDate,
    InviteCode,
    CreatedAt,
}
