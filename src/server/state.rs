//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and cloned for each request through
//! Axum's state extraction. Every field is cheap to clone: the database connection and
//! HTTP client are pools, the remaining services hold their data behind `Arc`.

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::{
    service::{admin::code::AdminCodeService, auth::LoginPolicy, token::JwtService},
    storage::FileStorage,
};

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DatabaseConnection,

    /// HTTP client for Discord API calls, configured without redirects.
    pub http_client: reqwest::Client,

    /// OAuth2 client for the Discord login flow.
    pub oauth_client: OAuth2Client,

    /// Signs and verifies access tokens.
    pub jwt: JwtService,

    /// Backend holding uploaded asset files.
    pub storage: Arc<dyn FileStorage>,

    /// One-time codes granting admin to the first user while no admin exists.
    pub admin_code_service: AdminCodeService,

    pub login_policy: LoginPolicy,

    /// Public base URL of the application.
    pub app_url: String,

    /// Upper bound for a single upload request body.
    pub max_upload_bytes: usize,
}
