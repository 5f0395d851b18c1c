//! Create vendor category and vendor tables migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VendorCategory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VendorCategory::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VendorCategory::Name).string_len(50).not_null())
                    .col(
                        ColumnDef::new(VendorCategory::Slug)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Vendor::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vendor::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vendor::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Vendor::CategoryId).big_integer().not_null())
                    .col(ColumnDef::new(Vendor::RegionSido).string_len(50).not_null())
                    .col(ColumnDef::new(Vendor::RegionSigungu).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Vendor::Address)
                            .string_len(200)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Vendor::ImageUrl).string_len(1024))
                    .col(ColumnDef::new(Vendor::NaverPlaceId).string_len(100))
                    .col(ColumnDef::new(Vendor::GooglePlaceId).string_len(100))
                    .col(
                        ColumnDef::new(Vendor::AvgRating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Vendor::ReviewCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Vendor::SummaryPositive)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Vendor::SummaryNegative)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vendor_category_id")
                    .table(Vendor::Table)
                    .col(Vendor::CategoryId)
                    .to_owned(),
            )
            .await?;

        // Sync upsert key
        manager
            .create_index(
                Index::create()
                    .name("idx_vendor_google_place_id")
                    .table(Vendor::Table)
                    .col(Vendor::GooglePlaceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_vendor_category_id")
                    .from(Vendor::Table, Vendor::CategoryId)
                    .to(VendorCategory::Table, VendorCategory::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vendor::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VendorCategory::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum VendorCategory {
    Table,
    Id,
    Name,
    Slug,
}

#[derive(Iden)]
enum Vendor {
    Table,
    Id,
    Name,
    CategoryId,
    RegionSido,
    RegionSigungu,
    Address,
    ImageUrl,
    NaverPlaceId,
    GooglePlaceId,
    AvgRating,
    ReviewCount,
    SummaryPositive,
    SummaryNegative,
}
