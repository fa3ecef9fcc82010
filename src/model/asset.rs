use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;
use uuid::Uuid;

/// Media category of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Video,
    Audio,
    Model,
    Archive,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Model => "model",
            Self::Archive => "archive",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "audio" => Ok(Self::Audio),
            "model" => Ok(Self::Model),
            "archive" => Ok(Self::Archive),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct AssetDto {
    pub id: Uuid,
    pub work_id: Uuid,
    pub kind: AssetKind,
    pub file_name: String,
    pub content_type: String,
    pub size: i64,
    pub position: i32,
    /// Public URL the file is served from.
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// Multipart form accepted by the upload endpoint.
#[derive(ToSchema)]
pub struct UploadAssetForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
