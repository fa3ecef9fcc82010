//! Favorite data repository.
//!
//! A favorite is a `(user, work)` pair; adding and removing are idempotent.

use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QuerySelect,
};
use std::collections::HashMap;
use uuid::Uuid;

pub struct FavoriteRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FavoriteRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Marks a work as favorited by a user. Favoriting twice keeps the original timestamp.
    pub async fn add(&self, user_id: Uuid, work_id: Uuid) -> Result<(), DbErr> {
        entity::prelude::Favorite::insert(entity::favorite::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            work_id: ActiveValue::Set(work_id),
            created_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([
                entity::favorite::Column::UserId,
                entity::favorite::Column::WorkId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }

    /// Removes a favorite.
    ///
    /// # Returns
    /// - `Ok(true)` - Favorite existed and was removed
    /// - `Ok(false)` - Nothing to remove
    pub async fn remove(&self, user_id: Uuid, work_id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Favorite::delete_many()
            .filter(entity::favorite::Column::UserId.eq(user_id))
            .filter(entity::favorite::Column::WorkId.eq(work_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn is_favorited(&self, user_id: Uuid, work_id: Uuid) -> Result<bool, DbErr> {
        let count = entity::prelude::Favorite::find()
            .filter(entity::favorite::Column::UserId.eq(user_id))
            .filter(entity::favorite::Column::WorkId.eq(work_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Counts favorites per work.
    ///
    /// Works without favorites are absent from the returned map.
    pub async fn count_by_works(&self, work_ids: &[Uuid]) -> Result<HashMap<Uuid, u64>, DbErr> {
        if work_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let counts: Vec<(Uuid, i64)> = entity::prelude::Favorite::find()
            .select_only()
            .column(entity::favorite::Column::WorkId)
            .column_as(entity::favorite::Column::UserId.count(), "favorite_count")
            .filter(entity::favorite::Column::WorkId.is_in(work_ids.to_vec()))
            .group_by(entity::favorite::Column::WorkId)
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(counts
            .into_iter()
            .map(|(work_id, count)| (work_id, count.max(0) as u64))
            .collect())
    }
}
