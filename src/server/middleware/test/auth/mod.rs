use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use chrono::{Duration, Utc};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::{AuthGuard, Permission},
    service::token::JwtService,
};
use test_utils::{builder::TestBuilder, factory};

mod optional;
mod require;

const SECRET: &str = "guard-secret";

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}
