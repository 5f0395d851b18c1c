//! Create vendor sync flag table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VendorSyncFlag::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VendorSyncFlag::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VendorSyncFlag::CategorySlug)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(VendorSyncFlag::Region).string_len(100).not_null())
                    .col(
                        ColumnDef::new(VendorSyncFlag::SyncedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vendor_sync_flag_slug_region")
                    .table(VendorSyncFlag::Table)
                    .col(VendorSyncFlag::CategorySlug)
                    .col(VendorSyncFlag::Region)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VendorSyncFlag::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum VendorSyncFlag {
    Table,
    Id,
    CategorySlug,
    Region,
    SyncedAt,
}
