//! Comment data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;
use uuid::Uuid;

pub struct CommentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a comment on a work.
    ///
    /// # Arguments
    /// - `work_id` - Work being commented on
    /// - `user_id` - Author
    /// - `body` - Validated comment text
    pub async fn create(
        &self,
        work_id: Uuid,
        user_id: Uuid,
        body: String,
    ) -> Result<entity::comment::Model, DbErr> {
        let now = Utc::now();

        entity::comment::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            work_id: ActiveValue::Set(work_id),
            user_id: ActiveValue::Set(user_id),
            body: ActiveValue::Set(body),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<entity::comment::Model>, DbErr> {
        entity::prelude::Comment::find_by_id(id).one(self.db).await
    }

    /// Replaces the body of a comment and bumps `updated_at`.
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - Updated comment
    /// - `Ok(None)` - Comment not found
    pub async fn update_body(
        &self,
        id: Uuid,
        body: String,
    ) -> Result<Option<entity::comment::Model>, DbErr> {
        let Some(comment) = entity::prelude::Comment::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::comment::ActiveModel = comment.into();
        active_model.body = ActiveValue::Set(body);
        active_model.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(active_model.update(self.db).await?))
    }

    /// Deletes a comment.
    ///
    /// # Returns
    /// - `Ok(true)` - Comment was deleted
    /// - `Ok(false)` - Comment did not exist
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Comment::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets comments of a work oldest first together with their authors.
    ///
    /// # Returns
    /// - `Ok((comments, total))` - Comment/author pairs for the page and total count
    pub async fn get_by_work_paginated(
        &self,
        work_id: Uuid,
        page: u64,
        per_page: u64,
    ) -> Result<
        (
            Vec<(entity::comment::Model, Option<entity::user::Model>)>,
            u64,
        ),
        DbErr,
    > {
        let total = entity::prelude::Comment::find()
            .filter(entity::comment::Column::WorkId.eq(work_id))
            .count(self.db)
            .await?;

        let comments = entity::prelude::Comment::find()
            .find_also_related(entity::prelude::User)
            .filter(entity::comment::Column::WorkId.eq(work_id))
            .order_by_asc(entity::comment::Column::CreatedAt)
            .order_by_asc(entity::comment::Column::Id)
            .offset(page.saturating_mul(per_page))
            .limit(per_page)
            .all(self.db)
            .await?;

        Ok((comments, total))
    }

    /// Counts comments per work.
    ///
    /// Works without comments are absent from the returned map.
    pub async fn count_by_works(&self, work_ids: &[Uuid]) -> Result<HashMap<Uuid, u64>, DbErr> {
        if work_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let counts: Vec<(Uuid, i64)> = entity::prelude::Comment::find()
            .select_only()
            .column(entity::comment::Column::WorkId)
            .column_as(entity::comment::Column::Id.count(), "comment_count")
            .filter(entity::comment::Column::WorkId.is_in(work_ids.to_vec()))
            .group_by(entity::comment::Column::WorkId)
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(counts
            .into_iter()
            .map(|(work_id, count)| (work_id, count.max(0) as u64))
            .collect())
    }
}
