//! Work data repository for database operations.
//!
//! Listing queries apply visibility filtering in SQL so pagination totals only count
//! works the caller is allowed to see.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use uuid::Uuid;

use crate::{
    model::work::Visibility,
    server::model::work::{CreateWorkParam, UpdateWorkParam},
};

/// Work repository over a plain connection or a transaction.
pub struct WorkRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> WorkRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new work.
    ///
    /// # Arguments
    /// - `param` - Owner, validated title, description and visibility
    ///
    /// # Returns
    /// - `Ok(Model)` - The created work
    /// - `Err(DbErr)` - Database error (e.g. owner does not exist)
    pub async fn create(&self, param: CreateWorkParam) -> Result<entity::work::Model, DbErr> {
        let now = Utc::now();

        entity::work::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(param.user_id),
            title: ActiveValue::Set(param.title),
            description: ActiveValue::Set(param.description),
            visibility: ActiveValue::Set(param.visibility.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }

    /// Gets a work by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<entity::work::Model>, DbErr> {
        entity::prelude::Work::find_by_id(id).one(self.db).await
    }

    /// Replaces the editable fields of a work and bumps `updated_at`.
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - Updated work
    /// - `Ok(None)` - Work not found
    /// - `Err(DbErr)` - Database error
    pub async fn update(
        &self,
        param: UpdateWorkParam,
    ) -> Result<Option<entity::work::Model>, DbErr> {
        let Some(work) = entity::prelude::Work::find_by_id(param.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::work::ActiveModel = work.into();
        active_model.title = ActiveValue::Set(param.title);
        active_model.description = ActiveValue::Set(param.description);
        active_model.visibility = ActiveValue::Set(param.visibility.as_str().to_string());
        active_model.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(active_model.update(self.db).await?))
    }

    /// Touches `updated_at` without changing anything else.
    pub async fn touch(&self, id: Uuid) -> Result<(), DbErr> {
        entity::prelude::Work::update_many()
            .col_expr(
                entity::work::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .filter(entity::work::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes a work. Assets, taggings, comments and favorites cascade.
    ///
    /// # Returns
    /// - `Ok(true)` - Work was deleted
    /// - `Ok(false)` - Work did not exist
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Work::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets public works newest first, optionally restricted to a tag.
    ///
    /// # Arguments
    /// - `tag_id` - Only return works carrying this tag
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of works per page
    ///
    /// # Returns
    /// - `Ok((works, total))` - Works for the page and total matching count
    pub async fn get_public_paginated(
        &self,
        tag_id: Option<i32>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<entity::work::Model>, u64), DbErr> {
        let mut query = entity::prelude::Work::find()
            .filter(entity::work::Column::Visibility.eq(Visibility::Public.as_str()));

        if let Some(tag_id) = tag_id {
            query = query
                .join(JoinType::InnerJoin, entity::work::Relation::WorkTag.def())
                .filter(entity::work_tag::Column::TagId.eq(tag_id));
        }

        let paginator = query
            .order_by_desc(entity::work::Column::CreatedAt)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let works = paginator.fetch_page(page).await?;

        Ok((works, total))
    }

    /// Gets works owned by a user newest first.
    ///
    /// # Arguments
    /// - `user_id` - Owner
    /// - `public_only` - When true, unlisted and private works are excluded
    pub async fn get_by_user_paginated(
        &self,
        user_id: Uuid,
        public_only: bool,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<entity::work::Model>, u64), DbErr> {
        let mut query =
            entity::prelude::Work::find().filter(entity::work::Column::UserId.eq(user_id));

        if public_only {
            query =
                query.filter(entity::work::Column::Visibility.eq(Visibility::Public.as_str()));
        }

        let paginator = query
            .order_by_desc(entity::work::Column::CreatedAt)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let works = paginator.fetch_page(page).await?;

        Ok((works, total))
    }

    /// Gets works favorited by a user, most recently favorited first.
    ///
    /// # Arguments
    /// - `user_id` - User whose favorites are listed
    /// - `viewer` - Requesting user; their own works are included regardless of visibility
    /// - `include_all` - When true (admin viewer) no visibility filtering is applied
    pub async fn get_favorited_by_user_paginated(
        &self,
        user_id: Uuid,
        viewer: Option<Uuid>,
        include_all: bool,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<entity::work::Model>, u64), DbErr> {
        let mut query = entity::prelude::Work::find()
            .join(JoinType::InnerJoin, entity::work::Relation::Favorite.def())
            .filter(entity::favorite::Column::UserId.eq(user_id));

        if !include_all {
            let mut visible = Condition::any()
                .add(entity::work::Column::Visibility.eq(Visibility::Public.as_str()));
            if let Some(viewer) = viewer {
                visible = visible.add(entity::work::Column::UserId.eq(viewer));
            }
            query = query.filter(visible);
        }

        let paginator = query
            .order_by_desc(entity::favorite::Column::CreatedAt)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let works = paginator.fetch_page(page).await?;

        Ok((works, total))
    }
}
