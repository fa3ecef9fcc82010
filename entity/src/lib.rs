//! SeaORM entity models for every table created by the `migration` crate.

pub mod prelude;

pub mod asset;
pub mod comment;
pub mod favorite;
pub mod refresh_token;
pub mod tag;
pub mod user;
pub mod work;
pub mod work_tag;
