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
        work::{CreateWorkDto, PaginatedWorksDto, UpdateWorkDto, WorkDto},
    },
    server::{
        controller::{default_entries, page_param},
        error::AppError,
        middleware::auth::AuthGuard,
        service::work::WorkService,
        state::AppState,
    },
};

/// Tag for grouping work endpoints in OpenAPI documentation
pub static WORK_TAG: &str = "work";

#[derive(Deserialize)]
pub struct WorkListParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    /// Only list works carrying this tag.
    pub tag: Option<String>,
}

/// List public works, newest first.
#[utoipa::path(
    get,
    path = "/api/works",
    tag = WORK_TAG,
    params(
        ("tag" = Option<String>, Query, description = "Filter by tag name"),
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Public works", body = PaginatedWorksDto),
        (status = 400, description = "Invalid tag", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_works(
    State(state): State<AppState>,
    Query(params): Query<WorkListParams>,
) -> Result<impl IntoResponse, AppError> {
    let works = WorkService::new(&state.db, state.storage.as_ref())
        .list_public(
            params.tag.as_deref(),
            page_param(params.page, params.entries),
        )
        .await?;

    Ok((StatusCode::OK, Json(works.into_dto())))
}

/// Create a work owned by the current user.
#[utoipa::path(
    post,
    path = "/api/works",
    tag = WORK_TAG,
    request_body = CreateWorkDto,
    responses(
        (status = 201, description = "Work created", body = WorkDto),
        (status = 400, description = "Invalid work data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_work(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateWorkDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let work = WorkService::new(&state.db, state.storage.as_ref())
        .create(&user, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(work.into_dto())))
}

/// Get a work with its tags, assets and counters.
///
/// Private works are reported as missing unless the viewer owns them or is an admin.
#[utoipa::path(
    get,
    path = "/api/works/{work_id}",
    tag = WORK_TAG,
    params(("work_id" = Uuid, Path, description = "Work ID")),
    responses(
        (status = 200, description = "Work details", body = WorkDto),
        (status = 401, description = "Invalid access token", body = ErrorDto),
        (status = 404, description = "Work not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_work(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(work_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &state.jwt, &headers)
        .optional()
        .await?;

    let work = WorkService::new(&state.db, state.storage.as_ref())
        .get(work_id, viewer.as_ref())
        .await?;

    Ok((StatusCode::OK, Json(work.into_dto())))
}

/// Replace a work's title, description, visibility and tags.
#[utoipa::path(
    put,
    path = "/api/works/{work_id}",
    tag = WORK_TAG,
    params(("work_id" = Uuid, Path, description = "Work ID")),
    request_body = UpdateWorkDto,
    responses(
        (status = 200, description = "Work updated", body = WorkDto),
        (status = 400, description = "Invalid work data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Work not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_work(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(work_id): Path<Uuid>,
    Json(payload): Json<UpdateWorkDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let work = WorkService::new(&state.db, state.storage.as_ref())
        .update(work_id, &user, payload)
        .await?;

    Ok((StatusCode::OK, Json(work.into_dto())))
}

/// Delete a work together with its stored files.
#[utoipa::path(
    delete,
    path = "/api/works/{work_id}",
    tag = WORK_TAG,
    params(("work_id" = Uuid, Path, description = "Work ID")),
    responses(
        (status = 204, description = "Work deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Work not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_work(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(work_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    WorkService::new(&state.db, state.storage.as_ref())
        .delete(work_id, &user)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
