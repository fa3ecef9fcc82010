//! Discord OAuth2 login.
//!
//! Drives the authorization code flow: builds the consent URL, exchanges the returned
//! code, reads the Discord profile and guild list, enforces the guild allow-list and
//! finally upserts the user and issues a token pair.

use oauth2::{
    basic::BasicTokenType, AuthorizationCode, CsrfToken, EmptyExtraTokenFields, Scope,
    StandardTokenResponse, TokenResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serenity::all::{GuildId, User as DiscordUser};
use url::Url;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::{
        auth::TokenPair,
        user::{UpsertUserParam, User},
    },
    service::token::{JwtService, SessionTokenService},
    state::OAuth2Client,
};

/// Partial guild information returned from Discord's user guilds endpoint.
#[derive(Debug, Deserialize)]
pub struct PartialGuild {
    /// Discord guild ID.
    pub id: GuildId,
}

/// Login settings taken from configuration.
#[derive(Debug, Clone)]
pub struct LoginPolicy {
    /// Base URL of the Discord REST API.
    pub api_url: String,
    /// Guilds a user must share at least one of. Empty admits everyone.
    pub allowed_guilds: Vec<u64>,
    pub refresh_token_ttl_days: i64,
}

/// Service for Discord OAuth2 authentication.
pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    http_client: &'a reqwest::Client,
    oauth_client: &'a OAuth2Client,
    jwt: &'a JwtService,
    policy: &'a LoginPolicy,
}

impl<'a> AuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
        jwt: &'a JwtService,
        policy: &'a LoginPolicy,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            jwt,
            policy,
        }
    }

    /// Generates a Discord OAuth2 login URL with CSRF protection.
    ///
    /// Requests the `identify` and `guilds` scopes.
    ///
    /// # Returns
    /// - `(Url, CsrfToken)` - Authorization URL and the CSRF state to keep in the session
    pub fn login_url(&self) -> (Url, CsrfToken) {
        self.oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("identify".to_string()))
            .add_scope(Scope::new("guilds".to_string()))
            .url()
    }

    /// Completes the OAuth2 flow and logs the user in.
    ///
    /// # Arguments
    /// - `authorization_code` - Code Discord appended to the callback URL
    /// - `set_admin` - Grant admin privileges (valid bootstrap code was used)
    ///
    /// # Returns
    /// - `Ok(TokenPair)` - User upserted and tokens issued
    /// - `Err(AppError::AuthErr(RequestTokenErr))` - Code exchange failed
    /// - `Err(AppError::AuthErr(NotGuildMember))` - User shares no allowed guild
    /// - `Err(AppError::ReqwestErr)` - Discord API request failed
    /// - `Err(AppError::DbErr)` - Database error during upsert
    pub async fn callback(
        &self,
        authorization_code: String,
        set_admin: bool,
    ) -> Result<TokenPair, AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .request_async(self.http_client)
            .await
            .map_err(AuthError::from)?;

        let discord_user = self.fetch_discord_user(&token).await?;
        let discord_id = discord_user.id.get();

        if !self.policy.allowed_guilds.is_empty() {
            let guilds = self.fetch_user_guilds(&token).await?;
            ensure_guild_member(discord_id, &guilds, &self.policy.allowed_guilds)?;
        }

        // Only raise admin status, never clear it during login
        let admin_update = if set_admin { Some(true) } else { None };
        let entity = UserRepository::new(self.db)
            .upsert(UpsertUserParam {
                discord_id,
                name: discord_user
                    .global_name
                    .clone()
                    .unwrap_or_else(|| discord_user.name.clone()),
                avatar_url: discord_user.avatar_url(),
                is_admin: admin_update,
            })
            .await?;
        let user = User::from_entity(entity)?;

        if set_admin {
            tracing::info!("User {} has been set as admin", user.name);
        }
        tracing::debug!("User {} ({}) logged in", user.name, user.id);

        SessionTokenService::new(self.db, self.jwt, self.policy.refresh_token_ttl_days)
            .issue(user)
            .await
    }

    /// Retrieves the Discord user's profile.
    async fn fetch_discord_user(
        &self,
        token: &StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    ) -> Result<DiscordUser, AppError> {
        let user = self
            .http_client
            .get(format!("{}/users/@me", self.policy.api_url))
            .bearer_auth(token.access_token().secret())
            .send()
            .await?
            .error_for_status()?
            .json::<DiscordUser>()
            .await?;

        Ok(user)
    }

    /// Retrieves the guilds the Discord user is a member of.
    async fn fetch_user_guilds(
        &self,
        token: &StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    ) -> Result<Vec<PartialGuild>, AppError> {
        let guilds = self
            .http_client
            .get(format!("{}/users/@me/guilds", self.policy.api_url))
            .bearer_auth(token.access_token().secret())
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<PartialGuild>>()
            .await?;

        Ok(guilds)
    }
}

/// Checks that the user shares at least one allowed guild.
///
/// An empty allow-list admits everyone.
///
/// # Returns
/// - `Ok(())` - User may log in
/// - `Err(AuthError::NotGuildMember)` - No overlap with the allow-list
pub fn ensure_guild_member(
    discord_id: u64,
    guilds: &[PartialGuild],
    allowed: &[u64],
) -> Result<(), AuthError> {
    if allowed.is_empty() || guilds.iter().any(|g| allowed.contains(&g.id.get())) {
        return Ok(());
    }

    Err(AuthError::NotGuildMember(discord_id))
}
