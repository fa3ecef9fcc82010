//! Access and refresh token handling.
//!
//! Access tokens are HS256 JWTs validated without touching the database. Refresh tokens
//! are opaque random strings; only their SHA-256 hash is persisted, and every refresh
//! rotates the token so each one can be used exactly once.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::DatabaseConnection;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::server::{
    data::{refresh_token::RefreshTokenRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::{
        auth::{Claims, TokenPair, TOKEN_ISSUER},
        user::User,
    },
    util::{parse::parse_uuid, random::random_alphanumeric},
};

/// Length of generated refresh tokens.
const REFRESH_TOKEN_LENGTH: usize = 64;

/// Signs and validates access tokens.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
}

impl JwtService {
    /// Creates a JWT service signing with `secret`.
    ///
    /// # Arguments
    /// - `secret` - HMAC secret shared by signing and validation
    /// - `access_ttl_secs` - Lifetime of issued access tokens in seconds
    pub fn new(secret: &str, access_ttl_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_ttl: Duration::seconds(access_ttl_secs),
        }
    }

    /// Access token lifetime in seconds.
    pub fn access_ttl_secs(&self) -> i64 {
        self.access_ttl.num_seconds()
    }

    /// Issues an access token for `user_id` valid from now.
    pub fn issue(&self, user_id: Uuid) -> Result<String, AuthError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issues an access token as if it had been created at `issued_at`.
    pub fn issue_at(&self, user_id: Uuid, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id.to_string(),
            iss: TOKEN_ISSUER.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.access_ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AuthError::TokenEncoding)
    }

    /// Validates signature, issuer and expiry and returns the user ID from `sub`.
    ///
    /// # Returns
    /// - `Ok(Uuid)` - Token valid
    /// - `Err(AuthError::InvalidToken)` - Bad signature, wrong issuer, expired or malformed
    pub fn verify(&self, token: &str) -> Result<Uuid, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!("Access token rejected: {}", e);
            AuthError::InvalidToken(e)
        })?;

        parse_uuid(&data.claims.sub).map_err(|e| {
            tracing::debug!("Access token subject rejected: {}", e);
            AuthError::InvalidToken(jsonwebtoken::errors::ErrorKind::InvalidSubject.into())
        })
    }
}

/// Hex-encoded SHA-256 of a refresh token, the form stored in the database.
pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// Issues, rotates and revokes token pairs.
pub struct SessionTokenService<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtService,
    refresh_ttl: Duration,
}

impl<'a> SessionTokenService<'a> {
    pub fn new(db: &'a DatabaseConnection, jwt: &'a JwtService, refresh_ttl_days: i64) -> Self {
        Self {
            db,
            jwt,
            refresh_ttl: Duration::days(refresh_ttl_days),
        }
    }

    /// Issues a fresh access token and refresh token for `user`.
    ///
    /// # Returns
    /// - `Ok(TokenPair)` - Tokens issued and refresh hash stored
    /// - `Err(AppError::AuthErr(TokenEncoding))` - JWT signing failed
    /// - `Err(AppError::DbErr)` - Storing the refresh token failed
    pub async fn issue(&self, user: User) -> Result<TokenPair, AppError> {
        let access_token = self.jwt.issue(user.id)?;
        let refresh_token = random_alphanumeric(REFRESH_TOKEN_LENGTH);

        RefreshTokenRepository::new(self.db)
            .create(
                user.id,
                hash_refresh_token(&refresh_token),
                Utc::now() + self.refresh_ttl,
            )
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.jwt.access_ttl_secs(),
            user,
        })
    }

    /// Exchanges a refresh token for a new pair, invalidating the old token.
    ///
    /// Expired tokens are deleted on sight. When two requests race with the same token only
    /// the one that deletes the row succeeds.
    ///
    /// # Returns
    /// - `Ok(TokenPair)` - New pair issued
    /// - `Err(AppError::AuthErr(InvalidRefreshToken))` - Unknown, already used or expired
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let token_repo = RefreshTokenRepository::new(self.db);

        let Some(stored) = token_repo
            .find_by_hash(&hash_refresh_token(refresh_token))
            .await?
        else {
            return Err(AuthError::InvalidRefreshToken.into());
        };

        let deleted = token_repo.delete(stored.id).await?;
        if !deleted || stored.expires_at <= Utc::now() {
            return Err(AuthError::InvalidRefreshToken.into());
        }

        let Some(user) = UserRepository::new(self.db)
            .find_by_id(stored.user_id)
            .await?
        else {
            return Err(AuthError::UserNotInDatabase(stored.user_id).into());
        };

        self.issue(User::from_entity(user)?).await
    }

    /// Revokes a refresh token. Unknown tokens are ignored.
    pub async fn revoke(&self, refresh_token: &str) -> Result<(), AppError> {
        RefreshTokenRepository::new(self.db)
            .delete_by_hash(&hash_refresh_token(refresh_token))
            .await?;

        Ok(())
    }

    /// Deletes refresh tokens that expired at or before `now`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of tokens removed
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let removed = RefreshTokenRepository::new(self.db)
            .delete_expired(now)
            .await?;

        Ok(removed)
    }
}
