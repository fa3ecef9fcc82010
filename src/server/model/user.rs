//! User domain models and parameters.
//!
//! Provides the application user with Discord identity and admin flag, along with the
//! parameter types used when users log in or are managed by admins.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::user::{PaginatedUsersDto, UserDto, UserSummaryDto},
    server::{error::AppError, util::parse::parse_u64_from_string},
};

/// Authenticated application user.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    /// Discord ID of the user
    pub discord_id: u64,
    /// Display name, refreshed from Discord on every login.
    pub name: String,
    pub avatar_url: Option<String>,
    /// Whether the user has admin privileges.
    pub admin: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user domain model
    /// - `Err(AppError::InternalErr(ParseStringId))` - Stored Discord ID is not a valid u64
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, AppError> {
        let discord_id = parse_u64_from_string(entity.discord_id)?;

        Ok(Self {
            id: entity.id,
            discord_id,
            name: entity.name,
            avatar_url: entity.avatar_url,
            admin: entity.admin,
            created_at: entity.created_at,
            last_login_at: entity.last_login_at,
        })
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            name: self.name,
            avatar_url: self.avatar_url,
            admin: self.admin,
            created_at: self.created_at,
        }
    }

    /// Owner/author block embedded in work and comment responses.
    pub fn to_summary_dto(&self) -> UserSummaryDto {
        UserSummaryDto {
            id: self.id,
            name: self.name.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

/// Parameters for upserting a user during login.
///
/// The optional `is_admin` field preserves the existing admin status when None, so a
/// regular login never revokes admin privileges.
#[derive(Debug, Clone)]
pub struct UpsertUserParam {
    /// Discord ID of the user
    pub discord_id: u64,
    pub name: String,
    pub avatar_url: Option<String>,
    /// Optional admin status (None preserves existing admin status, Some updates it).
    pub is_admin: Option<bool>,
}

/// Paginated collection of users with metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedUsers {
    /// Users for this page.
    pub users: Vec<User>,
    /// Total number of users across all pages.
    pub total: u64,
    /// Current page number (zero-indexed).
    pub page: u64,
    /// Number of users per page.
    pub per_page: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl PaginatedUsers {
    pub fn into_dto(self) -> PaginatedUsersDto {
        let users = self.users.into_iter().map(|u| u.into_dto()).collect();

        PaginatedUsersDto {
            users,
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
