use crate::{
    model::work::Visibility,
    server::{
        data::work::WorkRepository,
        model::work::{CreateWorkParam, UpdateWorkParam},
    },
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod get_by_user_paginated;
mod get_favorited_by_user_paginated;
mod get_public_paginated;
mod update;
