use crate::{
    model::asset::AssetKind,
    server::{data::asset::AssetRepository, model::asset::CreateAssetParam},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

mod create;
mod get_by_work;
mod get_thumbnails;
