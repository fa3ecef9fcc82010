use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    model::{
        api::ErrorDto,
        tag::{PaginatedTagsDto, SetTagsDto},
    },
    server::{
        controller::{default_entries, page_param},
        error::AppError,
        middleware::auth::AuthGuard,
        service::tag::TagService,
        state::AppState,
    },
};

/// Tag for grouping tag endpoints in OpenAPI documentation
pub static TAG_TAG: &str = "tag";

#[derive(Deserialize)]
pub struct TagListParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    /// Name prefix filter.
    pub q: Option<String>,
}

/// List tags by name with the number of public works carrying each.
#[utoipa::path(
    get,
    path = "/api/tags",
    tag = TAG_TAG,
    params(
        ("q" = Option<String>, Query, description = "Tag name prefix"),
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Tags", body = PaginatedTagsDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_tags(
    State(state): State<AppState>,
    Query(params): Query<TagListParams>,
) -> Result<impl IntoResponse, AppError> {
    let tags = TagService::new(&state.db)
        .list(params.q.as_deref(), page_param(params.page, params.entries))
        .await?;

    Ok((StatusCode::OK, Json(tags.into_dto())))
}

/// Replace the tags of a work, creating tags that do not exist yet.
#[utoipa::path(
    put,
    path = "/api/works/{work_id}/tags",
    tag = TAG_TAG,
    params(("work_id" = Uuid, Path, description = "Work ID")),
    request_body = SetTagsDto,
    responses(
        (status = 200, description = "Normalized tag names now on the work", body = Vec<String>),
        (status = 400, description = "Invalid tags", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Work not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn set_work_tags(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(work_id): Path<Uuid>,
    Json(payload): Json<SetTagsDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let tags = TagService::new(&state.db)
        .set_for_work(work_id, &user, &payload.tags)
        .await?;

    Ok((StatusCode::OK, Json(tags)))
}
