//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and hand
//! entity models (or tuples of them) back to the service layer, which converts them into
//! domain models. All database queries, inserts, updates, and deletes go through here.

pub mod asset;
pub mod comment;
pub mod favorite;
pub mod import;
pub mod refresh_token;
pub mod tag;
pub mod user;
pub mod work;

#[cfg(test)]
mod test;
