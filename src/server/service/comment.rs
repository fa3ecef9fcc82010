//! Comment service for business logic.

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::{comment::CommentRepository, work::WorkRepository},
    error::{auth::AuthError, AppError},
    model::{
        comment::{validate_body, Comment, PaginatedComments},
        user::User,
        PageParam,
    },
    service::work::find_visible_work,
};

pub struct CommentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommentService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists comments on a work oldest first.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Work missing or hidden from the viewer
    pub async fn list(
        &self,
        work_id: Uuid,
        viewer: Option<&User>,
        page: PageParam,
    ) -> Result<PaginatedComments, AppError> {
        find_visible_work(self.db, work_id, viewer).await?;

        let (rows, total) = CommentRepository::new(self.db)
            .get_by_work_paginated(work_id, page.page, page.per_page)
            .await?;

        let mut comments = Vec::with_capacity(rows.len());
        for (comment, author) in rows {
            let author = author.ok_or_else(|| {
                AppError::InternalError(format!("Author of comment {} missing", comment.id))
            })?;
            comments.push(Comment::from_entity(comment, User::from_entity(author)?));
        }

        Ok(PaginatedComments {
            comments,
            total,
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages(total),
        })
    }

    /// Adds a comment to a work the user can see.
    ///
    /// # Returns
    /// - `Ok(Comment)` - Created comment
    /// - `Err(AppError::BadRequest)` - Empty or overlong body
    /// - `Err(AppError::NotFound)` - Work missing or hidden
    pub async fn create(
        &self,
        work_id: Uuid,
        user: &User,
        body: &str,
    ) -> Result<Comment, AppError> {
        let body = validate_body(body)?;

        find_visible_work(self.db, work_id, Some(user)).await?;

        let comment = CommentRepository::new(self.db)
            .create(work_id, user.id, body)
            .await?;

        Ok(Comment::from_entity(comment, user.clone()))
    }

    /// Edits a comment. Only its author may do so.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Comment missing
    /// - `Err(AppError::AuthErr(AccessDenied))` - User is not the author
    pub async fn update(
        &self,
        comment_id: Uuid,
        user: &User,
        body: &str,
    ) -> Result<Comment, AppError> {
        let body = validate_body(body)?;
        let comment_repo = CommentRepository::new(self.db);

        let comment = comment_repo
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;
        if comment.user_id != user.id {
            return Err(AuthError::AccessDenied(
                user.id,
                format!("User is not the author of comment {}", comment_id),
            )
            .into());
        }

        let comment = comment_repo
            .update_body(comment_id, body)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

        Ok(Comment::from_entity(comment, user.clone()))
    }

    /// Deletes a comment. Allowed for its author, the work's owner and admins.
    pub async fn delete(&self, comment_id: Uuid, user: &User) -> Result<(), AppError> {
        let comment_repo = CommentRepository::new(self.db);

        let comment = comment_repo
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

        let allowed = if user.admin || comment.user_id == user.id {
            true
        } else {
            WorkRepository::new(self.db)
                .find_by_id(comment.work_id)
                .await?
                .is_some_and(|work| work.user_id == user.id)
        };
        if !allowed {
            return Err(AuthError::AccessDenied(
                user.id,
                format!("User may not delete comment {}", comment_id),
            )
            .into());
        }

        comment_repo.delete(comment_id).await?;

        Ok(())
    }
}
