//! Create vendor selection table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VendorSelection::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VendorSelection::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VendorSelection::ProfileId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VendorSelection::VendorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VendorSelection::Status)
                            .string_len(20)
                            .not_null()
                            .default("candidate"),
                    )
                    .col(
                        ColumnDef::new(VendorSelection::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(VendorSelection::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // One selection per profile and vendor
        manager
            .create_index(
                Index::create()
                    .name("idx_vendor_selection_profile_vendor")
                    .table(VendorSelection::Table)
                    .col(VendorSelection::ProfileId)
                    .col(VendorSelection::VendorId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_vendor_selection_profile_id")
                    .from(VendorSelection::Table, VendorSelection::ProfileId)
                    .to(WeddingProfile::Table, WeddingProfile::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_vendor_selection_vendor_id")
                    .from(VendorSelection::Table, VendorSelection::VendorId)
                    .to(Vendor::Table, Vendor::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VendorSelection::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum VendorSelection {
    Table,
    Id,
    ProfileId,
    VendorId,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum WeddingProfile {
    Table,
    Id,
}

#[derive(Iden)]
enum Vendor {
    Table,
    Id,
}
