use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct TagDto {
    pub name: String,
    /// Number of public works carrying this tag.
    pub work_count: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct PaginatedTagsDto {
    pub tags: Vec<TagDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct SetTagsDto {
    pub tags: Vec<String>,
}
