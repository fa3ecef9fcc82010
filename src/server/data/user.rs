//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing user records in the database.
//! It handles user creation on login, profile lookups, and admin status management.

use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::server::model::user::UpsertUserParam;

/// Repository providing database operations for user management.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Upserts a user keyed by Discord ID.
    ///
    /// Inserts a new user or updates an existing user's name, avatar and last login time.
    /// The admin status is only updated if explicitly provided (Some value), preventing
    /// accidental removal of admin privileges during regular login operations.
    ///
    /// # Arguments
    /// - `param` - User upsert parameters including discord_id, name, avatar and optional admin status
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - The created or updated user
    /// - `Err(DbErr)` - Database error during insert or update
    pub async fn upsert(&self, param: UpsertUserParam) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now();

        let mut update_columns = vec![
            entity::user::Column::Name,
            entity::user::Column::AvatarUrl,
            entity::user::Column::LastLoginAt,
        ];

        // Only update admin column if is_admin is Some
        if param.is_admin.is_some() {
            update_columns.push(entity::user::Column::Admin);
        }

        entity::prelude::User::insert(entity::user::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            discord_id: ActiveValue::Set(param.discord_id.to_string()),
            name: ActiveValue::Set(param.name),
            avatar_url: ActiveValue::Set(param.avatar_url),
            admin: ActiveValue::Set(param.is_admin.unwrap_or(false)),
            created_at: ActiveValue::Set(now),
            last_login_at: ActiveValue::Set(now),
        })
        .on_conflict(
            OnConflict::column(entity::user::Column::DiscordId)
                .update_columns(update_columns)
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await
    }

    /// Finds a user by their internal ID.
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - User found
    /// - `Ok(None)` - No user with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(id).one(self.db).await
    }

    /// Fetches several users at once, keyed by ID.
    ///
    /// IDs that don't exist are simply absent from the returned map.
    pub async fn find_many(
        &self,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, entity::user::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(ids.to_vec()))
            .all(self.db)
            .await?;

        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }

    /// Checks if any admin users exist in the database.
    ///
    /// Used at startup to decide whether a one-time admin code must be generated.
    ///
    /// # Returns
    /// - `Ok(true)` - At least one admin user exists in the database
    /// - `Ok(false)` - No admin users exist (first-time setup scenario)
    /// - `Err(DbErr)` - Database error during count query
    pub async fn admin_exists(&self) -> Result<bool, DbErr> {
        let admin_count = entity::prelude::User::find()
            .filter(entity::user::Column::Admin.eq(true))
            .count(self.db)
            .await?;

        Ok(admin_count > 0)
    }

    /// Gets users ordered by name with pagination.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of users per page
    ///
    /// # Returns
    /// - `Ok((users, total))` - Users for the page and total user count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_all_paginated(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<entity::user::Model>, u64), DbErr> {
        let paginator = entity::prelude::User::find()
            .order_by_asc(entity::user::Column::Name)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let users = paginator.fetch_page(page).await?;

        Ok((users, total))
    }

    /// Sets the admin flag for a user.
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - Updated user
    /// - `Ok(None)` - No user with that ID
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_admin(
        &self,
        id: Uuid,
        admin: bool,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        let Some(user) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::user::ActiveModel = user.into();
        active_model.admin = ActiveValue::Set(admin);

        Ok(Some(active_model.update(self.db).await?))
    }
}
