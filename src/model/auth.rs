use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::user::UserDto;

/// Issued after login and on every refresh.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct TokenPairDto {
    /// Short-lived JWT sent as `Authorization: Bearer <token>`.
    pub access_token: String,
    /// Opaque token exchanged at `/api/auth/refresh` for a new pair.
    pub refresh_token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserDto,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct RefreshTokenDto {
    pub refresh_token: String,
}
