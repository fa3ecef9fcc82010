use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    model::{
        api::ErrorDto,
        asset::{AssetDto, UploadAssetForm},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        service::asset::{AssetService, UploadedFile},
        state::AppState,
    },
};

/// Tag for grouping asset endpoints in OpenAPI documentation
pub static ASSET_TAG: &str = "asset";

/// Name of the multipart field carrying the file.
const FILE_FIELD: &str = "file";

/// Upload a file and attach it to a work.
///
/// The asset kind is derived from the declared content type, falling back to the file
/// extension. Unsupported files are rejected.
#[utoipa::path(
    post,
    path = "/api/works/{work_id}/assets",
    tag = ASSET_TAG,
    params(("work_id" = Uuid, Path, description = "Work ID")),
    request_body(content = UploadAssetForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Asset uploaded", body = AssetDto),
        (status = 400, description = "Missing, empty or unsupported file", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Work not found", body = ErrorDto),
        (status = 413, description = "File too large", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn upload_asset(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(work_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?.to_vec();

        upload = Some(UploadedFile {
            file_name,
            content_type,
            bytes,
        });
        break;
    }

    let Some(upload) = upload else {
        return Err(AppError::BadRequest(format!(
            "Missing multipart field '{}'",
            FILE_FIELD
        )));
    };

    let asset = AssetService::new(&state.db, state.storage.as_ref())
        .upload(work_id, &user, upload)
        .await?;

    Ok((StatusCode::CREATED, Json(asset.into_dto())))
}

/// List the assets of a work in display order.
#[utoipa::path(
    get,
    path = "/api/works/{work_id}/assets",
    tag = ASSET_TAG,
    params(("work_id" = Uuid, Path, description = "Work ID")),
    responses(
        (status = 200, description = "Assets of the work", body = Vec<AssetDto>),
        (status = 401, description = "Invalid access token", body = ErrorDto),
        (status = 404, description = "Work not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_assets(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(work_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &state.jwt, &headers)
        .optional()
        .await?;

    let assets = AssetService::new(&state.db, state.storage.as_ref())
        .list(work_id, viewer.as_ref())
        .await?;

    let assets_dto: Vec<AssetDto> = assets.into_iter().map(|a| a.into_dto()).collect();

    Ok((StatusCode::OK, Json(assets_dto)))
}

/// Delete an asset and its stored file.
#[utoipa::path(
    delete,
    path = "/api/works/{work_id}/assets/{asset_id}",
    tag = ASSET_TAG,
    params(
        ("work_id" = Uuid, Path, description = "Work ID"),
        ("asset_id" = Uuid, Path, description = "Asset ID")
    ),
    responses(
        (status = 204, description = "Asset deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Work or asset not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_asset(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((work_id, asset_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    AssetService::new(&state.db, state.storage.as_ref())
        .delete(work_id, asset_id, &user)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
