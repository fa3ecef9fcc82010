use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    model::api::ErrorDto,
    server::{
        error::AppError, middleware::auth::AuthGuard, service::favorite::FavoriteService,
        state::AppState,
    },
};

/// Tag for grouping favorite endpoints in OpenAPI documentation
pub static FAVORITE_TAG: &str = "favorite";

/// Favorite a work. Repeating the request has no further effect.
#[utoipa::path(
    put,
    path = "/api/works/{work_id}/favorite",
    tag = FAVORITE_TAG,
    params(("work_id" = Uuid, Path, description = "Work ID")),
    responses(
        (status = 204, description = "Work favorited"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Work not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(work_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    FavoriteService::new(&state.db).add(work_id, &user).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Remove a work from the current user's favorites.
#[utoipa::path(
    delete,
    path = "/api/works/{work_id}/favorite",
    tag = FAVORITE_TAG,
    params(("work_id" = Uuid, Path, description = "Work ID")),
    responses(
        (status = 204, description = "Favorite removed"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(work_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    FavoriteService::new(&state.db)
        .remove(work_id, &user)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
