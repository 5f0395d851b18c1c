//! Create daily log table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DailyLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailyLog::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DailyLog::GroupId).big_integer().not_null())
                    .col(ColumnDef::new(DailyLog::Date).date().not_null())
                    .col(ColumnDef::new(DailyLog::Content).text().not_null().default(""))
                    .col(
                        ColumnDef::new(DailyLog::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(DailyLog::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // One log per group and day
        manager
            .create_index(
                Index::create()
                    .name("idx_daily_log_group_id_date")
                    .table(DailyLog::Table)
                    .col(DailyLog::GroupId)
                    .col(DailyLog::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_daily_log_group_id")
                    .from(DailyLog::Table, DailyLog::GroupId)
                    .to(WeddingGroup::Table, WeddingGroup::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DailyLog::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DailyLog {
    Table,
    Id,
    GroupId,
    Date,
    Content,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum WeddingGroup {
    Table,
    Id,
}
