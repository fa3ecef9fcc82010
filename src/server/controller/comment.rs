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
        comment::{CommentBodyDto, CommentDto, PaginatedCommentsDto},
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::AuthGuard,
        service::comment::CommentService,
        state::AppState,
    },
};

/// Tag for grouping comment endpoints in OpenAPI documentation
pub static COMMENT_TAG: &str = "comment";

/// List the comments of a work, oldest first.
#[utoipa::path(
    get,
    path = "/api/works/{work_id}/comments",
    tag = COMMENT_TAG,
    params(
        ("work_id" = Uuid, Path, description = "Work ID"),
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Comments", body = PaginatedCommentsDto),
        (status = 401, description = "Invalid access token", body = ErrorDto),
        (status = 404, description = "Work not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_comments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(work_id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &state.jwt, &headers)
        .optional()
        .await?;

    let comments = CommentService::new(&state.db)
        .list(work_id, viewer.as_ref(), params.into_page())
        .await?;

    Ok((StatusCode::OK, Json(comments.into_dto())))
}

/// Comment on a work.
#[utoipa::path(
    post,
    path = "/api/works/{work_id}/comments",
    tag = COMMENT_TAG,
    params(("work_id" = Uuid, Path, description = "Work ID")),
    request_body = CommentBodyDto,
    responses(
        (status = 201, description = "Comment created", body = CommentDto),
        (status = 400, description = "Empty or too long comment", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Work not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(work_id): Path<Uuid>,
    Json(payload): Json<CommentBodyDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let comment = CommentService::new(&state.db)
        .create(work_id, &user, &payload.body)
        .await?;

    Ok((StatusCode::CREATED, Json(comment.into_dto())))
}

/// Edit a comment. Only its author may do so.
#[utoipa::path(
    put,
    path = "/api/comments/{comment_id}",
    tag = COMMENT_TAG,
    params(("comment_id" = Uuid, Path, description = "Comment ID")),
    request_body = CommentBodyDto,
    responses(
        (status = 200, description = "Comment updated", body = CommentDto),
        (status = 400, description = "Empty or too long comment", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the author", body = ErrorDto),
        (status = 404, description = "Comment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(comment_id): Path<Uuid>,
    Json(payload): Json<CommentBodyDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let comment = CommentService::new(&state.db)
        .update(comment_id, &user, &payload.body)
        .await?;

    Ok((StatusCode::OK, Json(comment.into_dto())))
}

/// Delete a comment.
///
/// Allowed for the author, the owner of the work and admins.
#[utoipa::path(
    delete,
    path = "/api/comments/{comment_id}",
    tag = COMMENT_TAG,
    params(("comment_id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed to delete this comment", body = ErrorDto),
        (status = 404, description = "Comment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(comment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    CommentService::new(&state.db)
        .delete(comment_id, &user)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
