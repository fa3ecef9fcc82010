//! Environment-based application configuration.

use std::{path::PathBuf, str::FromStr};

use crate::server::{
    error::{config::ConfigError, AppError},
    util::parse::parse_u64_list,
};

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
const DISCORD_API_URL: &str = "https://discord.com/api";

const DEFAULT_JWT_ACCESS_TTL_SECS: i64 = 900;
const DEFAULT_REFRESH_TOKEN_TTL_DAYS: i64 = 30;
const DEFAULT_STORAGE_PATH: &str = "./storage";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,

    pub discord_client_id: String,
    pub discord_client_secret: String,
    pub discord_redirect_url: String,
    /// Guild IDs a user must share at least one of to log in. Empty admits everyone.
    pub discord_allowed_guilds: Vec<u64>,

    pub discord_auth_url: String,
    pub discord_token_url: String,
    pub discord_api_url: String,

    pub jwt_secret: String,
    pub jwt_access_ttl_secs: i64,
    pub refresh_token_ttl_days: i64,

    pub storage_path: PathBuf,
    pub max_upload_bytes: usize,

    pub app_url: String,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_client_id: required("DISCORD_CLIENT_ID")?,
            discord_client_secret: required("DISCORD_CLIENT_SECRET")?,
            discord_redirect_url: required("DISCORD_REDIRECT_URL")?,
            discord_allowed_guilds: match std::env::var("DISCORD_ALLOWED_GUILDS") {
                Ok(value) => parse_u64_list(&value).map_err(|_| ConfigError::InvalidEnvVar {
                    name: "DISCORD_ALLOWED_GUILDS".to_string(),
                    value,
                })?,
                Err(_) => Vec::new(),
            },
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
            discord_api_url: DISCORD_API_URL.to_string(),
            jwt_secret: required("JWT_SECRET")?,
            jwt_access_ttl_secs: optional("JWT_ACCESS_TTL_SECS", DEFAULT_JWT_ACCESS_TTL_SECS)?,
            refresh_token_ttl_days: optional(
                "REFRESH_TOKEN_TTL_DAYS",
                DEFAULT_REFRESH_TOKEN_TTL_DAYS,
            )?,
            storage_path: std::env::var("STORAGE_PATH")
                .unwrap_or_else(|_| DEFAULT_STORAGE_PATH.to_string())
                .into(),
            max_upload_bytes: optional("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            app_url: required("APP_URL")?.trim_end_matches('/').to_string(),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse::<T>().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}
