use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000003_create_work_table::Work;
use super::m20260301_000005_create_tag_table::Tag;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkTag::Table)
                    .if_not_exists()
                    .col(uuid(WorkTag::WorkId))
                    .col(integer(WorkTag::TagId))
                    .primary_key(
                        Index::create()
                            .name("pk_work_tag")
                            .col(WorkTag::WorkId)
                            .col(WorkTag::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_work_tag_work_id")
                            .from(WorkTag::Table, WorkTag::WorkId)
                            .to(Work::Table, Work::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_work_tag_tag_id")
                            .from(WorkTag::Table, WorkTag::TagId)
                            .to(Tag::Table, Tag::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WorkTag::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum WorkTag {
    Table,
    WorkId,
    TagId,
}
