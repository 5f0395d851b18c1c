//! Create raw review table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RawReview::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RawReview::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RawReview::VendorId).big_integer().not_null())
                    .col(ColumnDef::new(RawReview::Source).string_len(20).not_null())
                    .col(
                        ColumnDef::new(RawReview::AuthorName)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(RawReview::Content).text().not_null())
                    .col(ColumnDef::new(RawReview::Rating).double())
                    .col(ColumnDef::new(RawReview::WrittenAt).date())
                    .col(
                        ColumnDef::new(RawReview::CrawledAt)
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
                    .name("idx_raw_review_vendor_id")
                    .table(RawReview::Table)
                    .col(RawReview::VendorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_raw_review_vendor_id")
                    .from(RawReview::Table, RawReview::VendorId)
                    .to(Vendor::Table, Vendor::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RawReview::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RawReview {
    Table,
    Id,
    VendorId,
    Source,
    AuthorName,
    Content,
    Rating,
    WrittenAt,
    CrawledAt,
}

#[derive(Iden)]
enum Vendor {
    Table,
    Id,
}
