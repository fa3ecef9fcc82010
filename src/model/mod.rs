//! JSON data-transfer objects exchanged over the HTTP API.

pub mod api;
pub mod asset;
pub mod auth;
pub mod comment;
pub mod tag;
pub mod user;
pub mod work;
