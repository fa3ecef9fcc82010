use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000003_create_work_table::Work;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Asset::Table)
                    .if_not_exists()
                    .col(pk_uuid(Asset::Id))
                    .col(uuid(Asset::WorkId))
                    .col(string(Asset::Kind))
                    .col(string_uniq(Asset::StorageKey))
                    .col(string(Asset::FileName))
                    .col(string(Asset::ContentType))
                    .col(big_integer(Asset::Size))
                    .col(integer(Asset::Position))
                    .col(timestamp_with_time_zone(Asset::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_asset_work_id")
                            .from(Asset::Table, Asset::WorkId)
                            .to(Work::Table, Work::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Asset::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Asset {
    Table,
    Id,
    WorkId,
    Kind,
    StorageKey,
    FileName,
    ContentType,
    Size,
    Position,
    CreatedAt,
}
