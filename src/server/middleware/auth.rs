//! Bearer token authentication guard.
//!
//! Handlers construct an [`AuthGuard`] from the request headers and either require an
//! authenticated user (optionally with extra permissions) or accept anonymous requests.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::User,
    service::token::JwtService,
};

/// Permissions a handler can demand on top of being logged in.
pub enum Permission {
    Admin,
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtService,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, jwt: &'a JwtService, headers: &'a HeaderMap) -> Self {
        Self { db, jwt, headers }
    }

    /// Requires an authenticated user holding every permission in `permissions`.
    ///
    /// The user is reloaded from the database on every request, so revoked admin rights
    /// and deleted accounts take effect before the access token expires.
    ///
    /// # Returns
    /// - `Ok(User)` - Authenticated user with all required permissions
    /// - `Err(AuthError::MissingToken)` - No bearer token
    /// - `Err(AuthError::InvalidToken)` - Token failed validation
    /// - `Err(AuthError::UserNotInDatabase)` - Token refers to a deleted user
    /// - `Err(AuthError::AccessDenied)` - A permission is missing
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let Some(token) = self.bearer_token()? else {
            return Err(AuthError::MissingToken.into());
        };

        let user = self.load_user(token).await?;

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !user.admin {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            "User attempted to access an admin endpoint without admin permissions"
                                .to_string(),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(user)
    }

    /// Returns the authenticated user if the request carries a token.
    ///
    /// Anonymous requests yield `None`; a present but invalid token is still rejected.
    pub async fn optional(&self) -> Result<Option<User>, AppError> {
        match self.bearer_token()? {
            Some(token) => Ok(Some(self.load_user(token).await?)),
            None => Ok(None),
        }
    }

    /// Extracts the token from an `Authorization: Bearer <token>` header.
    ///
    /// # Returns
    /// - `Ok(None)` - No `Authorization` header
    /// - `Err(AuthError::MissingToken)` - Header present but not a bearer token
    fn bearer_token(&self) -> Result<Option<&'a str>, AuthError> {
        let Some(value) = self.headers.get(AUTHORIZATION) else {
            return Ok(None);
        };

        let token = value
            .to_str()
            .ok()
            .and_then(|v| {
                v.strip_prefix("Bearer ")
                    .or_else(|| v.strip_prefix("bearer "))
            })
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        Ok(Some(token))
    }

    async fn load_user(&self, token: &str) -> Result<User, AppError> {
        let user_id = self.jwt.verify(token)?;

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        User::from_entity(user)
    }
}
