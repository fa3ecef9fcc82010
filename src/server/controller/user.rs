use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    model::{api::ErrorDto, user::UserDto, work::PaginatedWorksDto},
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::AuthGuard,
        service::{user::UserService, work::WorkService},
        state::AppState,
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

/// Get a user's public profile.
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    tag = USER_TAG,
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = UserDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::new(&state.db).get_user(user_id).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Get the works of a user.
///
/// Owners and admins see every work; everyone else only public ones.
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/works",
    tag = USER_TAG,
    params(
        ("user_id" = Uuid, Path, description = "User ID"),
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Works of the user", body = PaginatedWorksDto),
        (status = 401, description = "Invalid access token", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_works(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &state.jwt, &headers)
        .optional()
        .await?;

    let works = WorkService::new(&state.db, state.storage.as_ref())
        .list_by_user(user_id, viewer.as_ref(), params.into_page())
        .await?;

    Ok((StatusCode::OK, Json(works.into_dto())))
}

/// Get the works a user has favorited, newest favorite first.
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/favorites",
    tag = USER_TAG,
    params(
        ("user_id" = Uuid, Path, description = "User ID"),
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Favorited works", body = PaginatedWorksDto),
        (status = 401, description = "Invalid access token", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_favorites(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &state.jwt, &headers)
        .optional()
        .await?;

    let works = WorkService::new(&state.db, state.storage.as_ref())
        .list_favorites(user_id, viewer.as_ref(), params.into_page())
        .await?;

    Ok((StatusCode::OK, Json(works.into_dto())))
}
