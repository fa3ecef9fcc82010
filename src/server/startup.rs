//! One-time initialization performed before the server starts accepting requests.

use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use time::Duration;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    data::user::UserRepository,
    error::AppError,
    service::{admin::code::AdminCodeService, auth::LoginPolicy, token::JwtService},
    state::{AppState, OAuth2Client},
    storage::local::LocalStorage,
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the application database.
///
/// Sessions only hold OAuth flow state, so they expire after a short period of inactivity.
pub async fn connect_to_session(
    db: &DatabaseConnection,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store.migrate().await?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(15)));

    Ok(session_layer)
}

/// HTTP client for Discord API calls.
///
/// Redirects are disabled so a compromised upstream cannot bounce requests elsewhere.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

pub fn setup_oauth_client(config: &Config) -> Result<OAuth2Client, AppError> {
    let client = BasicClient::new(ClientId::new(config.discord_client_id.clone()))
        .set_client_secret(ClientSecret::new(config.discord_client_secret.clone()))
        .set_auth_uri(AuthUrl::new(config.discord_auth_url.clone())?)
        .set_token_uri(TokenUrl::new(config.discord_token_url.clone())?)
        .set_redirect_uri(RedirectUrl::new(config.discord_redirect_url.clone())?);

    Ok(client)
}

/// Assembles the shared request state from configuration and an open database.
pub fn build_state(config: &Config, db: DatabaseConnection) -> Result<AppState, AppError> {
    let storage = LocalStorage::new(config.storage_path.clone(), &config.app_url);

    Ok(AppState {
        db,
        http_client: setup_reqwest_client()?,
        oauth_client: setup_oauth_client(config)?,
        jwt: JwtService::new(&config.jwt_secret, config.jwt_access_ttl_secs),
        storage: Arc::new(storage),
        admin_code_service: AdminCodeService::new(),
        login_policy: LoginPolicy {
            api_url: config.discord_api_url.clone(),
            allowed_guilds: config.discord_allowed_guilds.clone(),
            refresh_token_ttl_days: config.refresh_token_ttl_days,
        },
        app_url: config.app_url.clone(),
        max_upload_bytes: config.max_upload_bytes,
    })
}

/// Logs a one-time admin login link if no admin user exists yet.
///
/// # Returns
/// - `Ok(Some(code))` - No admin exists; a code was generated
/// - `Ok(None)` - At least one admin exists
pub async fn check_for_admin(
    db: &DatabaseConnection,
    app_url: &str,
    admin_code_service: &AdminCodeService,
) -> Result<Option<String>, AppError> {
    if UserRepository::new(db).admin_exists().await? {
        return Ok(None);
    }

    let code = admin_code_service.generate().await;

    tracing::info!(
        "No admin user found. Log in within the next minute to become admin: {}/api/auth/login?admin_code={}",
        app_url.trim_end_matches('/'),
        code
    );

    Ok(Some(code))
}
