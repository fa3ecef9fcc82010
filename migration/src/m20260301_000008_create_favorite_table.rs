use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_user_table::User;
use super::m20260301_000003_create_work_table::Work;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Favorite::Table)
                    .if_not_exists()
                    .col(uuid(Favorite::UserId))
                    .col(uuid(Favorite::WorkId))
                    .col(timestamp_with_time_zone(Favorite::CreatedAt))
                    .primary_key(
                        Index::create()
                            .name("pk_favorite")
                            .col(Favorite::UserId)
                            .col(Favorite::WorkId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_user_id")
                            .from(Favorite::Table, Favorite::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_work_id")
                            .from(Favorite::Table, Favorite::WorkId)
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
            .drop_table(Table::drop().table(Favorite::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Favorite {
    Table,
    UserId,
    WorkId,
    CreatedAt,
}
