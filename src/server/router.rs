//! Route table, OpenAPI document and HTTP middleware stack.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::path::Path;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::SqliteStore;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{admin, asset, auth, comment, favorite, tag, user, work},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Workshop API", description = "Share creative works with your community"),
    paths(
        auth::login,
        auth::callback,
        auth::refresh,
        auth::logout,
        auth::get_user,
        user::get_user,
        user::get_user_works,
        user::get_user_favorites,
        work::get_works,
        work::create_work,
        work::get_work,
        work::update_work,
        work::delete_work,
        asset::upload_asset,
        asset::get_assets,
        asset::delete_asset,
        tag::get_tags,
        tag::set_work_tags,
        comment::get_comments,
        comment::create_comment,
        comment::update_comment,
        comment::delete_comment,
        favorite::add_favorite,
        favorite::remove_favorite,
        admin::get_users,
        admin::set_user_admin,
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Discord login and token management"),
        (name = "user", description = "Public user profiles"),
        (name = "work", description = "Creative works"),
        (name = "asset", description = "Files attached to works"),
        (name = "tag", description = "Work tags"),
        (name = "comment", description = "Comments on works"),
        (name = "favorite", description = "Favorited works"),
        (name = "admin", description = "User administration")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` security scheme referenced by authenticated endpoints.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// API routes without state or global middleware.
///
/// # Arguments
/// - `max_upload_bytes` - Body limit applied to asset uploads only
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", get(auth::login))
        .route("/api/auth/callback", get(auth::callback))
        .route("/api/auth/refresh", post(auth::refresh))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/user", get(auth::get_user))
        .route("/api/users/{user_id}", get(user::get_user))
        .route("/api/users/{user_id}/works", get(user::get_user_works))
        .route("/api/users/{user_id}/favorites", get(user::get_user_favorites))
        .route("/api/works", get(work::get_works).post(work::create_work))
        .route(
            "/api/works/{work_id}",
            get(work::get_work)
                .put(work::update_work)
                .delete(work::delete_work),
        )
        .route(
            "/api/works/{work_id}/assets",
            post(asset::upload_asset)
                .layer(DefaultBodyLimit::max(max_upload_bytes))
                .get(asset::get_assets),
        )
        .route(
            "/api/works/{work_id}/assets/{asset_id}",
            axum::routing::delete(asset::delete_asset),
        )
        .route("/api/works/{work_id}/tags", put(tag::set_work_tags))
        .route(
            "/api/works/{work_id}/comments",
            get(comment::get_comments).post(comment::create_comment),
        )
        .route(
            "/api/works/{work_id}/favorite",
            put(favorite::add_favorite).delete(favorite::remove_favorite),
        )
        .route("/api/tags", get(tag::get_tags))
        .route(
            "/api/comments/{comment_id}",
            put(comment::update_comment).delete(comment::delete_comment),
        )
        .route("/api/admin/users", get(admin::get_users))
        .route("/api/admin/users/{user_id}/admin", put(admin::set_user_admin))
}

/// Complete application: API routes, stored files under `/files`, Swagger UI at
/// `/api/docs` and the session, CORS and tracing layers.
pub fn app(state: AppState, session: SessionManagerLayer<SqliteStore>, files_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router(state.max_upload_bytes)
        .with_state(state)
        .nest_service("/files", ServeDir::new(files_dir))
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .layer(session)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
