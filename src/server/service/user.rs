//! User service for business logic.
//!
//! Provides profile lookups and admin management on top of `UserRepository`, working with
//! domain models rather than DTOs.

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::{
        user::{PaginatedUsers, User},
        PageParam,
    },
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Retrieves a user by ID.
    ///
    /// # Returns
    /// - `Ok(User)` - User found
    /// - `Err(AppError::NotFound)` - No user with that ID
    /// - `Err(AppError::DbErr)` - Database error during query
    pub async fn get_user(&self, id: Uuid) -> Result<User, AppError> {
        let user = UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        User::from_entity(user)
    }

    /// Retrieves all users ordered by name with pagination.
    pub async fn get_all_users(&self, page: PageParam) -> Result<PaginatedUsers, AppError> {
        let (users, total) = UserRepository::new(self.db)
            .get_all_paginated(page.page, page.per_page)
            .await?;

        let users = users
            .into_iter()
            .map(User::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedUsers {
            users,
            total,
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages(total),
        })
    }

    /// Grants or revokes admin privileges.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated user
    /// - `Err(AppError::NotFound)` - No user with that ID
    pub async fn set_admin(&self, id: Uuid, admin: bool) -> Result<User, AppError> {
        let user = UserRepository::new(self.db)
            .set_admin(id, admin)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::info!("Admin status of user {} set to {}", user.name, admin);

        User::from_entity(user)
    }
}
