//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250601_000001_create_user_table;
mod m20250601_000002_create_wedding_group_table;
mod m20250601_000003_create_wedding_profile_table;
mod m20250601_000004_create_schedule_task_table;
mod m20250601_000005_create_daily_log_table;
mod m20250601_000006_create_vendor_tables;
mod m20250601_000007_create_vendor_selection_table;
mod m20250601_000008_create_vendor_sync_flag_table;
mod m20250601_000009_create_post_tables;
mod m20250601_000010_create_notice_tables;
mod m20250601_000011_create_raw_review_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_user_table::Migration),
            Box::new(m20250601_000002_create_wedding_group_table::Migration),
            Box::new(m20250601_000003_create_wedding_profile_table::Migration),
            Box::new(m20250601_000004_create_schedule_task_table::Migration),
            Box::new(m20250601_000005_create_daily_log_table::Migration),
            Box::new(m20250601_000006_create_vendor_tables::Migration),
            Box::new(m20250601_000007_create_vendor_selection_table::Migration),
            Box::new(m20250601_000008_create_vendor_sync_flag_table::Migration),
            Box::new(m20250601_000009_create_post_tables::Migration),
            Box::new(m20250601_000010_create_notice_tables::Migration),
            Box::new(m20250601_000011_create_raw_review_table::Migration),
        ]
    }
}
