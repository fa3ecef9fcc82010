//! Work domain models, parameters and input validation.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::work::{PaginatedWorksDto, Visibility, WorkDto, WorkSummaryDto},
    server::{
        error::{internal::InternalError, AppError},
        model::{asset::Asset, user::User},
    },
};

/// Maximum title length in characters, after trimming.
pub const MAX_TITLE_LEN: usize = 100;
/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/// A creative work owned by a user.
#[derive(Debug, Clone, PartialEq)]
pub struct Work {
    pub id: Uuid,
    /// Owner of the work.
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Work {
    /// Converts an entity model to a work domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Work)` - The converted work
    /// - `Err(AppError::InternalErr(UnknownEnumValue))` - Stored visibility is not recognized
    pub fn from_entity(entity: entity::work::Model) -> Result<Self, AppError> {
        let visibility = entity.visibility.parse::<Visibility>().map_err(|value| {
            InternalError::UnknownEnumValue {
                field: "work.visibility",
                value,
            }
        })?;

        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            title: entity.title,
            description: entity.description,
            visibility,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Whether `viewer` may open this work.
    ///
    /// Public and unlisted works are visible to everyone; private works only to their
    /// owner and admins.
    pub fn is_visible_to(&self, viewer: Option<&User>) -> bool {
        match self.visibility {
            Visibility::Public | Visibility::Unlisted => true,
            Visibility::Private => viewer.is_some_and(|user| self.can_manage(user)),
        }
    }

    /// Whether `user` may edit or delete this work and its assets.
    pub fn can_manage(&self, user: &User) -> bool {
        user.admin || user.id == self.user_id
    }
}

/// Parameters for creating a work, already validated.
#[derive(Debug, Clone)]
pub struct CreateWorkParam {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub visibility: Visibility,
}

/// Parameters for replacing the editable fields of a work, already validated.
#[derive(Debug, Clone)]
pub struct UpdateWorkParam {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub visibility: Visibility,
}

/// Trims and checks a work title.
///
/// # Returns
/// - `Ok(String)` - Trimmed title of 1 to 100 characters
/// - `Err(AppError::BadRequest)` - Title empty or too long
pub fn validate_title(title: &str) -> Result<String, AppError> {
    let title = title.trim();
    let len = title.chars().count();

    if len == 0 {
        return Err(AppError::BadRequest("Title must not be empty".to_string()));
    }
    if len > MAX_TITLE_LEN {
        return Err(AppError::BadRequest(format!(
            "Title must be at most {} characters",
            MAX_TITLE_LEN
        )));
    }

    Ok(title.to_string())
}

/// Checks a work description; surrounding whitespace is trimmed.
pub fn validate_description(description: &str) -> Result<String, AppError> {
    let description = description.trim();

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(AppError::BadRequest(format!(
            "Description must be at most {} characters",
            MAX_DESCRIPTION_LEN
        )));
    }

    Ok(description.to_string())
}

/// Full view of a single work.
#[derive(Debug, Clone)]
pub struct WorkDetail {
    pub work: Work,
    pub owner: User,
    pub tags: Vec<String>,
    pub assets: Vec<Asset>,
    pub favorite_count: u64,
    pub comment_count: u64,
    /// Whether the viewer has favorited the work; false for anonymous viewers.
    pub favorited: bool,
}

impl WorkDetail {
    pub fn into_dto(self) -> WorkDto {
        WorkDto {
            id: self.work.id,
            owner: self.owner.to_summary_dto(),
            title: self.work.title,
            description: self.work.description,
            visibility: self.work.visibility,
            tags: self.tags,
            assets: self.assets.into_iter().map(|a| a.into_dto()).collect(),
            favorite_count: self.favorite_count,
            comment_count: self.comment_count,
            favorited: self.favorited,
            created_at: self.work.created_at,
            updated_at: self.work.updated_at,
        }
    }
}

/// Listing entry for a work.
#[derive(Debug, Clone)]
pub struct WorkSummary {
    pub work: Work,
    pub owner: User,
    pub tags: Vec<String>,
    /// First image asset, if any.
    pub thumbnail: Option<Asset>,
    pub favorite_count: u64,
}

impl WorkSummary {
    pub fn into_dto(self) -> WorkSummaryDto {
        WorkSummaryDto {
            id: self.work.id,
            owner: self.owner.to_summary_dto(),
            title: self.work.title,
            visibility: self.work.visibility,
            tags: self.tags,
            thumbnail_url: self.thumbnail.map(|a| a.url),
            favorite_count: self.favorite_count,
            created_at: self.work.created_at,
        }
    }
}

/// Paginated collection of work summaries with metadata.
#[derive(Debug, Clone)]
pub struct PaginatedWorks {
    pub works: Vec<WorkSummary>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedWorks {
    pub fn into_dto(self) -> PaginatedWorksDto {
        PaginatedWorksDto {
            works: self.works.into_iter().map(|w| w.into_dto()).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
