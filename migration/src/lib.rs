pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_user_table;
mod m20260301_000002_create_refresh_token_table;
mod m20260301_000003_create_work_table;
mod m20260301_000004_create_asset_table;
mod m20260301_000005_create_tag_table;
mod m20260301_000006_create_work_tag_table;
mod m20260301_000007_create_comment_table;
mod m20260301_000008_create_favorite_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_user_table::Migration),
            Box::new(m20260301_000002_create_refresh_token_table::Migration),
            Box::new(m20260301_000003_create_work_table::Migration),
            Box::new(m20260301_000004_create_asset_table::Migration),
            Box::new(m20260301_000005_create_tag_table::Migration),
            Box::new(m20260301_000006_create_work_tag_table::Migration),
            Box::new(m20260301_000007_create_comment_table::Migration),
            Box::new(m20260301_000008_create_favorite_table::Migration),
        ]
    }
}
