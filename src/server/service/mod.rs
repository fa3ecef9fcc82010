//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Validation, visibility and ownership rules
//! - **Orchestration**: Coordinating multiple repository calls, storage and Discord
//! - **Domain Models**: Working with domain models rather than DTOs or entity models

pub mod admin;
pub mod asset;
pub mod auth;
pub mod comment;
pub mod favorite;
pub mod import;
pub mod tag;
pub mod token;
pub mod user;
pub mod work;
