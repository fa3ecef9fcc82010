use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use oauth2::{basic::BasicErrorResponse, HttpClientError, RequestTokenError};
use thiserror::Error;
use uuid::Uuid;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// CSRF state validation failed during OAuth callback.
    ///
    /// The CSRF state token in the OAuth callback URL does not match the token stored
    /// in the session, indicating a potential CSRF attack or an invalid callback request.
    /// Results in a 400 Bad Request response.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// Request carried no bearer token.
    #[error("Request is missing a bearer token")]
    MissingToken,

    /// Bearer token failed signature, issuer or expiry validation.
    #[error("Invalid access token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    /// Access token could not be signed.
    #[error("Failed to sign access token: {0}")]
    TokenEncoding(#[source] jsonwebtoken::errors::Error),

    /// Refresh token is unknown, already rotated or expired.
    #[error("Refresh token is invalid or expired")]
    InvalidRefreshToken,

    /// Token subject refers to a user that no longer exists.
    #[error("User {0} from access token not found in database")]
    UserNotInDatabase(Uuid),

    /// User lacks a permission required by the endpoint.
    #[error("User {0} denied access: {1}")]
    AccessDenied(Uuid, String),

    /// Discord user shares none of the configured guilds.
    #[error("Discord user {0} is not a member of any allowed guild")]
    NotGuildMember(u64),

    /// Exchanging the authorization code with Discord failed.
    #[error("Failed to exchange authorization code: {0}")]
    RequestTokenErr(
        #[from] RequestTokenError<HttpClientError<reqwest::Error>, BasicErrorResponse>,
    ),
}

/// Converts authentication errors into HTTP responses.
///
/// Maps authentication errors to appropriate HTTP status codes and user-friendly error messages:
/// - `CsrfValidationFailed` → 400 Bad Request
/// - `MissingToken` / `InvalidToken` / `InvalidRefreshToken` / `UserNotInDatabase` → 401 Unauthorized
/// - `AccessDenied` / `NotGuildMember` → 403 Forbidden
/// - `TokenEncoding` / `RequestTokenErr` → 500 Internal Server Error
///
/// All errors are logged at debug level (500s at error level) while keeping client-facing
/// messages generic to avoid information leakage.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::CsrfValidationFailed => (
                StatusCode::BAD_REQUEST,
                "There was an issue logging you in, please try again.",
            ),
            Self::MissingToken | Self::InvalidToken(_) | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "Authentication required")
            }
            Self::InvalidRefreshToken => (
                StatusCode::UNAUTHORIZED,
                "Session expired, please log in again",
            ),
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                "You do not have permission to perform this action",
            ),
            Self::NotGuildMember(_) => (
                StatusCode::FORBIDDEN,
                "You must be a member of an allowed Discord server to log in",
            ),
            Self::TokenEncoding(_) | Self::RequestTokenErr(_) => {
                tracing::error!("{}", self);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorDto {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response();
            }
        };

        tracing::debug!("{}", self);

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
