use crate::server::data::refresh_token::RefreshTokenRepository;
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod delete_expired;
mod find_by_hash;
