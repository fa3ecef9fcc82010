//! Authentication domain models.

use serde::{Deserialize, Serialize};

use crate::{model::auth::TokenPairDto, server::model::user::User};

/// Issuer written into and required from every access token.
pub const TOKEN_ISSUER: &str = "workshop";

/// JWT claims carried by access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User UUID.
    pub sub: String,
    pub iss: String,
    /// Issued at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Access and refresh token issued after login or refresh.
///
/// The refresh token is the plain value handed to the client; only its hash is stored.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: User,
}

impl TokenPair {
    pub fn into_dto(self) -> TokenPairDto {
        TokenPairDto {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.expires_in,
            user: self.user.into_dto(),
        }
    }
}
