use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::{asset::AssetDto, user::UserSummaryDto};

/// Who can see a work.
///
/// - `Public` works are listed and viewable by anyone.
/// - `Unlisted` works are viewable by anyone with the link but never listed.
/// - `Private` works are only visible to their owner and admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Unlisted,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Unlisted => "unlisted",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "unlisted" => Ok(Self::Unlisted),
            "private" => Ok(Self::Private),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct CreateWorkDto {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct UpdateWorkDto {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub visibility: Visibility,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct WorkDto {
    pub id: Uuid,
    pub owner: UserSummaryDto,
    pub title: String,
    pub description: String,
    pub visibility: Visibility,
    pub tags: Vec<String>,
    pub assets: Vec<AssetDto>,
    pub favorite_count: u64,
    pub comment_count: u64,
    /// Whether the requesting user has favorited this work.
    pub favorited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact representation used in listings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct WorkSummaryDto {
    pub id: Uuid,
    pub owner: UserSummaryDto,
    pub title: String,
    pub visibility: Visibility,
    pub tags: Vec<String>,
    /// URL of the first image asset, if any.
    pub thumbnail_url: Option<String>,
    pub favorite_count: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct PaginatedWorksDto {
    pub works: Vec<WorkSummaryDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}
