use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Work::Table)
                    .if_not_exists()
                    .col(pk_uuid(Work::Id))
                    .col(uuid(Work::UserId))
                    .col(string(Work::Title))
                    .col(text(Work::Description))
                    .col(string(Work::Visibility))
                    .col(timestamp_with_time_zone(Work::CreatedAt))
                    .col(timestamp_with_time_zone(Work::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_work_user_id")
                            .from(Work::Table, Work::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_work_visibility_created_at")
                    .table(Work::Table)
                    .col(Work::Visibility)
                    .col(Work::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Work::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Work {
    Table,
    Id,
    UserId,
    Title,
    Description,
    Visibility,
    CreatedAt,
    UpdatedAt,
}
