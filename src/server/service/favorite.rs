//! Favorite service for business logic.

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::favorite::FavoriteRepository, error::AppError, model::user::User,
    service::work::find_visible_work,
};

pub struct FavoriteService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FavoriteService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Favorites a work the user can see. Repeating the call has no further effect.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Work missing or hidden from the user
    pub async fn add(&self, work_id: Uuid, user: &User) -> Result<(), AppError> {
        find_visible_work(self.db, work_id, Some(user)).await?;

        FavoriteRepository::new(self.db).add(user.id, work_id).await?;

        Ok(())
    }

    /// Removes a favorite if present.
    pub async fn remove(&self, work_id: Uuid, user: &User) -> Result<(), AppError> {
        FavoriteRepository::new(self.db)
            .remove(user.id, work_id)
            .await?;

        Ok(())
    }
}
