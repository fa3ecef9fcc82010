//! Comment domain models and validation.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::comment::{CommentDto, PaginatedCommentsDto},
    server::{error::AppError, model::user::User},
};

/// Maximum comment length in characters, after trimming.
pub const MAX_COMMENT_LEN: usize = 2000;

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: Uuid,
    pub work_id: Uuid,
    pub author: User,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Builds a comment from its entity model and the already converted author.
    pub fn from_entity(entity: entity::comment::Model, author: User) -> Self {
        Self {
            id: entity.id,
            work_id: entity.work_id,
            author,
            body: entity.body,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> CommentDto {
        CommentDto {
            id: self.id,
            work_id: self.work_id,
            author: self.author.to_summary_dto(),
            body: self.body,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Trims and checks a comment body.
///
/// # Returns
/// - `Ok(String)` - Trimmed body of 1 to 2000 characters
/// - `Err(AppError::BadRequest)` - Body empty or too long
pub fn validate_body(body: &str) -> Result<String, AppError> {
    let body = body.trim();
    let len = body.chars().count();

    if len == 0 {
        return Err(AppError::BadRequest("Comment must not be empty".to_string()));
    }
    if len > MAX_COMMENT_LEN {
        return Err(AppError::BadRequest(format!(
            "Comment must be at most {} characters",
            MAX_COMMENT_LEN
        )));
    }

    Ok(body.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedComments {
    pub comments: Vec<Comment>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedComments {
    pub fn into_dto(self) -> PaginatedCommentsDto {
        PaginatedCommentsDto {
            comments: self.comments.into_iter().map(|c| c.into_dto()).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
