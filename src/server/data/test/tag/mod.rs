use crate::server::data::tag::TagRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod count_public_works;
mod get_or_create_many;
mod get_paginated;
mod set_for_work;
