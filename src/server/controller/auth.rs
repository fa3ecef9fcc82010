use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        auth::{RefreshTokenDto, TokenPairDto},
        user::UserDto,
    },
    server::{
        error::{auth::AuthError, AppError},
        middleware::{
            auth::AuthGuard,
            session::{CsrfSession, OAuthFlowSession},
        },
        service::{auth::AuthService, token::SessionTokenService},
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

#[derive(Deserialize)]
pub struct LoginParams {
    /// One-time code printed at startup while no admin exists.
    pub admin_code: Option<String>,
}

/// Query parameters for the OAuth callback endpoint.
#[derive(Deserialize)]
pub struct CallbackParams {
    /// CSRF state token to be validated against the session value.
    pub state: String,
    /// Authorization code from Discord for token exchange.
    pub code: String,
}

/// Start the Discord login flow.
///
/// Stores the CSRF state in the session and redirects to Discord. A valid `admin_code`
/// marks the flow so the user is granted admin once the callback completes.
#[utoipa::path(
    get,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    params(
        ("admin_code" = Option<String>, Query, description = "One-time admin bootstrap code")
    ),
    responses(
        (status = 307, description = "Redirect to Discord authorization page"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<LoginParams>,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = AuthService::new(
        &state.db,
        &state.http_client,
        &state.oauth_client,
        &state.jwt,
        &state.login_policy,
    );

    let grant_admin = match params.admin_code {
        Some(code) => {
            let valid = state.admin_code_service.validate_and_consume(&code).await;
            if !valid {
                tracing::warn!("Login attempted with an invalid or expired admin code");
            }
            valid
        }
        None => false,
    };

    // Overwrite any flag left behind by an abandoned login in this session.
    OAuthFlowSession::new(&session)
        .set_admin_flag(grant_admin)
        .await?;

    let (url, csrf_token) = auth_service.login_url();

    CsrfSession::new(&session)
        .set_token(csrf_token.secret().to_string())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

/// Complete the Discord login flow.
///
/// Validates the CSRF state, logs the user in and returns a fresh token pair.
#[utoipa::path(
    get,
    path = "/api/auth/callback",
    tag = AUTH_TAG,
    params(
        ("code" = String, Query, description = "Authorization code from Discord"),
        ("state" = String, Query, description = "CSRF state")
    ),
    responses(
        (status = 200, description = "Logged in", body = TokenPairDto),
        (status = 400, description = "CSRF validation failed", body = ErrorDto),
        (status = 403, description = "User is not a member of an allowed guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    validate_csrf(&session, &params.state).await?;

    let set_admin = OAuthFlowSession::new(&session).take_admin_flag().await?;

    let auth_service = AuthService::new(
        &state.db,
        &state.http_client,
        &state.oauth_client,
        &state.jwt,
        &state.login_policy,
    );
    let pair = auth_service.callback(params.code, set_admin).await?;

    Ok((StatusCode::OK, Json(pair.into_dto())))
}

/// Exchange a refresh token for a new token pair.
///
/// The presented refresh token is consumed; the response carries its replacement.
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = AUTH_TAG,
    request_body = RefreshTokenDto,
    responses(
        (status = 200, description = "Tokens rotated", body = TokenPairDto),
        (status = 401, description = "Refresh token unknown or expired", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenDto>,
) -> Result<impl IntoResponse, AppError> {
    let token_service = SessionTokenService::new(
        &state.db,
        &state.jwt,
        state.login_policy.refresh_token_ttl_days,
    );

    let pair = token_service.refresh(&payload.refresh_token).await?;

    Ok((StatusCode::OK, Json(pair.into_dto())))
}

/// Revoke a refresh token and clear the login session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    request_body = RefreshTokenDto,
    responses(
        (status = 204, description = "Logged out"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RefreshTokenDto>,
) -> Result<impl IntoResponse, AppError> {
    let token_service = SessionTokenService::new(
        &state.db,
        &state.jwt,
        state.login_policy.refresh_token_ttl_days,
    );

    token_service.revoke(&payload.refresh_token).await?;
    OAuthFlowSession::new(&session).clear().await;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the currently authenticated user.
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Missing or invalid access token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

async fn validate_csrf(session: &Session, csrf_state: &str) -> Result<(), AppError> {
    let stored_state = CsrfSession::new(session).take_token().await?;

    match stored_state {
        Some(state) if state == csrf_state => Ok(()),
        _ => Err(AppError::AuthErr(AuthError::CsrfValidationFailed)),
    }
}
