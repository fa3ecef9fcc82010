//! Type-safe session wrappers for the OAuth login flow.
//!
//! Sessions only carry state across the redirect to Discord and back; API requests are
//! authenticated with bearer tokens instead. Each struct wraps the same underlying
//! `Session` but exposes only the methods relevant to its concern.

use tower_sessions::Session;

use crate::server::error::AppError;

const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";
const SESSION_AUTH_SET_ADMIN: &str = "auth:set_admin";

/// CSRF protection session management.
///
/// Tokens are stored when login starts and consumed by the OAuth callback.
pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores a CSRF token in the session.
    ///
    /// # Returns
    /// - `Ok(())` - Token successfully stored
    /// - `Err(AppError::SessionErr(_))` - Failed to store in session
    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Retrieves and removes the CSRF token, so each token can only be used once.
    ///
    /// # Returns
    /// - `Ok(Some(token))` - CSRF token was found and removed
    /// - `Ok(None)` - No CSRF token in session
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?;
        Ok(token)
    }
}

/// Temporary OAuth flow state kept across the Discord redirect.
pub struct OAuthFlowSession<'a> {
    session: &'a Session,
}

impl<'a> OAuthFlowSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Marks that a valid admin code was presented when login started.
    pub async fn set_admin_flag(&self, set_admin: bool) -> Result<(), AppError> {
        self.session
            .insert(SESSION_AUTH_SET_ADMIN, set_admin)
            .await?;
        Ok(())
    }

    /// Retrieves and removes the admin flag.
    ///
    /// # Returns
    /// - `Ok(true)` - Admin code was validated, grant admin privileges
    /// - `Ok(false)` - No admin code was validated
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn take_admin_flag(&self) -> Result<bool, AppError> {
        let set_admin = self
            .session
            .remove(SESSION_AUTH_SET_ADMIN)
            .await?
            .unwrap_or(false);
        Ok(set_admin)
    }

    /// Drops all flow state, used on logout.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}
