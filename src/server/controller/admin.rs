use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    model::{
        api::ErrorDto,
        user::{PaginatedUsersDto, SetAdminDto, UserDto},
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::user::UserService,
        state::AppState,
    },
};

/// Tag for grouping admin endpoints in OpenAPI documentation
pub static ADMIN_TAG: &str = "admin";

/// List all users ordered by name.
///
/// # Access Control
/// - `Admin` - Only admins can list users
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = ADMIN_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Users", body = PaginatedUsersDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Admin])
        .await?;

    let users = UserService::new(&state.db)
        .get_all_users(params.into_page())
        .await?;

    Ok((StatusCode::OK, Json(users.into_dto())))
}

/// Grant or revoke admin rights.
///
/// # Access Control
/// - `Admin` - Only admins can change admin rights
#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}/admin",
    tag = ADMIN_TAG,
    params(("user_id" = Uuid, Path, description = "User ID")),
    request_body = SetAdminDto,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn set_user_admin(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<SetAdminDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db)
        .set_admin(user_id, payload.admin)
        .await?;

    tracing::info!(
        "Admin {} set admin={} for user {}",
        admin.id,
        user.admin,
        user.id
    );

    Ok((StatusCode::OK, Json(user.into_dto())))
}
