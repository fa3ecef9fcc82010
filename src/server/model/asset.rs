//! Asset domain models and upload classification.
//!
//! Uploaded files are classified by their declared content type first and by file
//! extension second. Anything that doesn't map to a known [`AssetKind`] is rejected.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::asset::{AssetDto, AssetKind},
    server::{
        error::{internal::InternalError, AppError},
        storage::FileStorage,
    },
};

/// Longest extension kept from an uploaded file name.
const MAX_EXTENSION_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub id: Uuid,
    pub work_id: Uuid,
    pub kind: AssetKind,
    /// Key of the file inside the storage backend.
    pub storage_key: String,
    /// Original file name as uploaded.
    pub file_name: String,
    pub content_type: String,
    /// Size in bytes.
    pub size: i64,
    pub position: i32,
    /// Public URL the file is served from.
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl Asset {
    /// Converts an entity model to an asset domain model, resolving its public URL.
    ///
    /// # Returns
    /// - `Ok(Asset)` - The converted asset
    /// - `Err(AppError::InternalErr(UnknownEnumValue))` - Stored kind is not recognized
    pub fn from_entity(
        entity: entity::asset::Model,
        storage: &dyn FileStorage,
    ) -> Result<Self, AppError> {
        let kind = entity
            .kind
            .parse::<AssetKind>()
            .map_err(|value| InternalError::UnknownEnumValue {
                field: "asset.kind",
                value,
            })?;
        let url = storage.url(&entity.storage_key);

        Ok(Self {
            id: entity.id,
            work_id: entity.work_id,
            kind,
            storage_key: entity.storage_key,
            file_name: entity.file_name,
            content_type: entity.content_type,
            size: entity.size,
            position: entity.position,
            url,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> AssetDto {
        AssetDto {
            id: self.id,
            work_id: self.work_id,
            kind: self.kind,
            file_name: self.file_name,
            content_type: self.content_type,
            size: self.size,
            position: self.position,
            url: self.url,
            created_at: self.created_at,
        }
    }
}

/// Parameters for inserting an asset row after its file has been stored.
#[derive(Debug, Clone)]
pub struct CreateAssetParam {
    pub id: Uuid,
    pub work_id: Uuid,
    pub kind: AssetKind,
    pub storage_key: String,
    pub file_name: String,
    pub content_type: String,
    pub size: i64,
    pub position: i32,
}

/// Result of classifying an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadClass {
    pub kind: AssetKind,
    /// Lowercase extension used in the storage key, without the dot.
    pub extension: String,
    /// Content type recorded for the asset.
    pub content_type: String,
}

/// Classifies an upload from its declared content type and file name.
///
/// A specific content type wins over the extension; `application/octet-stream` and
/// missing content types fall back to the extension.
///
/// # Returns
/// - `Ok(UploadClass)` - Supported file
/// - `Err(AppError::BadRequest)` - Unsupported or unrecognizable file type
pub fn classify_upload(
    content_type: Option<&str>,
    file_name: &str,
) -> Result<UploadClass, AppError> {
    let extension = file_extension(file_name);
    let declared = content_type
        .and_then(|ct| ct.parse::<mime::Mime>().ok())
        .filter(|m| *m != mime::APPLICATION_OCTET_STREAM);

    let kind = declared
        .as_ref()
        .and_then(kind_from_mime)
        .or_else(|| extension.as_deref().and_then(kind_from_extension))
        .ok_or_else(|| {
            AppError::BadRequest(format!("Unsupported file type for '{}'", file_name))
        })?;

    let extension = extension
        .or_else(|| {
            declared
                .as_ref()
                .map(|m| m.subtype().as_str().to_ascii_lowercase())
                .filter(|s| is_valid_extension(s))
        })
        .unwrap_or_else(|| "bin".to_string());

    let content_type = declared
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| mime::APPLICATION_OCTET_STREAM.essence_str().to_string());

    Ok(UploadClass {
        kind,
        extension,
        content_type,
    })
}

/// Storage key of an asset: `works/{work_id}/{asset_id}.{ext}`.
pub fn storage_key(work_id: Uuid, asset_id: Uuid, extension: &str) -> String {
    format!("works/{}/{}.{}", work_id, asset_id, extension)
}

fn file_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }

    let ext = ext.to_ascii_lowercase();
    is_valid_extension(&ext).then_some(ext)
}

fn is_valid_extension(ext: &str) -> bool {
    !ext.is_empty()
        && ext.len() <= MAX_EXTENSION_LEN
        && ext.chars().all(|c| c.is_ascii_alphanumeric())
}

fn kind_from_mime(m: &mime::Mime) -> Option<AssetKind> {
    let top = m.type_();

    if top == mime::IMAGE {
        Some(AssetKind::Image)
    } else if top == mime::VIDEO {
        Some(AssetKind::Video)
    } else if top == mime::AUDIO {
        Some(AssetKind::Audio)
    } else if top.as_str() == "model" {
        Some(AssetKind::Model)
    } else if top == mime::APPLICATION {
        match m.subtype().as_str() {
            "zip" | "x-zip-compressed" | "gzip" | "x-gzip" | "x-tar" | "x-7z-compressed"
            | "vnd.rar" | "x-rar-compressed" => Some(AssetKind::Archive),
            _ => None,
        }
    } else {
        None
    }
}

fn kind_from_extension(ext: &str) -> Option<AssetKind> {
    match ext {
        "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp" | "svg" | "avif" => {
            Some(AssetKind::Image)
        }
        "mp4" | "webm" | "mov" | "mkv" | "avi" => Some(AssetKind::Video),
        "mp3" | "wav" | "ogg" | "flac" | "m4a" | "opus" => Some(AssetKind::Audio),
        "glb" | "gltf" | "obj" | "fbx" | "stl" | "blend" | "3mf" => Some(AssetKind::Model),
        "zip" | "7z" | "rar" | "tar" | "gz" => Some(AssetKind::Archive),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_wins_over_extension() {
        let class = classify_upload(Some("video/mp4"), "clip.png").unwrap();

        assert_eq!(class.kind, AssetKind::Video);
        assert_eq!(class.extension, "png");
        assert_eq!(class.content_type, "video/mp4");
    }

    #[test]
    fn octet_stream_falls_back_to_extension() {
        let class = classify_upload(Some("application/octet-stream"), "Model.GLB").unwrap();

        assert_eq!(class.kind, AssetKind::Model);
        assert_eq!(class.extension, "glb");
        assert_eq!(class.content_type, "application/octet-stream");
    }

    #[test]
    fn extension_derived_from_content_type_when_missing() {
        let class = classify_upload(Some("image/png"), "screenshot").unwrap();

        assert_eq!(class.kind, AssetKind::Image);
        assert_eq!(class.extension, "png");
    }

    #[test]
    fn parameters_are_dropped_from_content_type() {
        let class = classify_upload(Some("audio/ogg; codecs=opus"), "track.ogg").unwrap();

        assert_eq!(class.kind, AssetKind::Audio);
        assert_eq!(class.content_type, "audio/ogg");
    }

    #[test]
    fn archive_by_content_type() {
        let class = classify_upload(Some("application/zip"), "pack.zip").unwrap();

        assert_eq!(class.kind, AssetKind::Archive);
    }

    #[test]
    fn rejects_unknown_types() {
        assert!(matches!(
            classify_upload(Some("text/plain"), "notes.txt"),
            Err(AppError::BadRequest(_))
        ));
        assert!(classify_upload(None, "binary").is_err());
    }

    #[test]
    fn hostile_extension_is_not_used() {
        let class = classify_upload(Some("image/jpeg"), "x.p/../ng").unwrap();

        assert_eq!(class.extension, "jpeg");
    }

    #[test]
    fn builds_storage_key() {
        let work_id = Uuid::nil();
        let asset_id = Uuid::nil();

        assert_eq!(
            storage_key(work_id, asset_id, "png"),
            format!("works/{}/{}.png", work_id, asset_id)
        );
    }
}
