//! Create schedule task table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScheduleTask::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScheduleTask::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScheduleTask::GroupId).big_integer().not_null())
                    .col(ColumnDef::new(ScheduleTask::Date).date())
                    .col(ColumnDef::new(ScheduleTask::ExpectedDate).date())
                    .col(ColumnDef::new(ScheduleTask::Title).string_len(200).not_null())
                    .col(
                        ColumnDef::new(ScheduleTask::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ScheduleTask::Category)
                            .string_len(20)
                            .not_null()
                            .default("OTHER"),
                    )
                    .col(
                        ColumnDef::new(ScheduleTask::Difficulty)
                            .small_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(ScheduleTask::DDayOffset).integer())
                    .col(
                        ColumnDef::new(ScheduleTask::EstimatedBudget)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ScheduleTask::IsDone)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ScheduleTask::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Composite index: (group_id, date) for per-month batch fetches
        manager
            .create_index(
                Index::create()
                    .name("idx_schedule_task_group_id_date")
                    .table(ScheduleTask::Table)
                    .col(ScheduleTask::GroupId)
                    .col(ScheduleTask::Date)
                    .to_owned(),
            )
            .await?;

        // Composite index: (group_id, d_day_offset) for checklist ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_schedule_task_group_id_offset")
                    .table(ScheduleTask::Table)
                    .col(ScheduleTask::GroupId)
                    .col(ScheduleTask::DDayOffset)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_schedule_task_group_id")
                    .from(ScheduleTask::Table, ScheduleTask::GroupId)
                    .to(WeddingGroup::Table, WeddingGroup::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScheduleTask::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ScheduleTask {
    Table,
    Id,
    GroupId,
    Date,
    ExpectedDate,
    Title,
    Description,
    Category,
    Difficulty,
    DDayOffset,
    EstimatedBudget,
    IsDone,
    CreatedAt,
}

#[derive(Iden)]
enum WeddingGroup {
    Table,
    Id,
}
