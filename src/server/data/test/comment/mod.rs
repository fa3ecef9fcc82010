use crate::server::data::comment::CommentRepository;
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_by_work_paginated;
mod update_body;
