//! Tag domain models and name normalization.
//!
//! Tag names are normalized before they reach the database: trimmed, lowercased and
//! with inner whitespace runs replaced by a single `-`. Normalized names must be 1 to 32
//! characters of `[a-z0-9-_]`.

use crate::{
    model::tag::{PaginatedTagsDto, TagDto},
    server::error::AppError,
};

/// Maximum length of a normalized tag name.
pub const MAX_TAG_LEN: usize = 32;
/// Maximum number of tags on a single work.
pub const MAX_TAGS_PER_WORK: usize = 10;

/// Normalizes a single tag name.
///
/// # Returns
/// - `Ok(String)` - Normalized tag name
/// - `Err(AppError::BadRequest)` - Empty, too long or containing invalid characters
pub fn normalize_tag(raw: &str) -> Result<String, AppError> {
    let name = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();

    if name.is_empty() {
        return Err(AppError::BadRequest("Tag must not be empty".to_string()));
    }
    if name.chars().count() > MAX_TAG_LEN {
        return Err(AppError::BadRequest(format!(
            "Tag '{}' is longer than {} characters",
            name, MAX_TAG_LEN
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(AppError::BadRequest(format!(
            "Tag '{}' may only contain a-z, 0-9, '-' and '_'",
            name
        )));
    }

    Ok(name)
}

/// Normalizes a list of tags for a work, collapsing duplicates.
///
/// Order of first occurrence is preserved.
///
/// # Returns
/// - `Ok(Vec<String>)` - Distinct normalized names
/// - `Err(AppError::BadRequest)` - Any invalid tag, or more than 10 distinct tags
pub fn normalize_tags(raw: &[String]) -> Result<Vec<String>, AppError> {
    let mut names: Vec<String> = Vec::with_capacity(raw.len());

    for tag in raw {
        let name = normalize_tag(tag)?;
        if !names.contains(&name) {
            names.push(name);
        }
    }

    if names.len() > MAX_TAGS_PER_WORK {
        return Err(AppError::BadRequest(format!(
            "A work can have at most {} tags",
            MAX_TAGS_PER_WORK
        )));
    }

    Ok(names)
}

/// Tag with the number of public works carrying it.
#[derive(Debug, Clone, PartialEq)]
pub struct TagWithCount {
    pub name: String,
    pub work_count: u64,
}

impl TagWithCount {
    pub fn into_dto(self) -> TagDto {
        TagDto {
            name: self.name,
            work_count: self.work_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedTags {
    pub tags: Vec<TagWithCount>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedTags {
    pub fn into_dto(self) -> PaginatedTagsDto {
        PaginatedTagsDto {
            tags: self.tags.into_iter().map(|t| t.into_dto()).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
