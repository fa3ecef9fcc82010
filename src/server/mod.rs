//! HTTP backend and business logic.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Business logic orchestration between controllers and data layer
//! - **Data Layer** (`data/`) - Database operations through SeaORM repositories
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Storage** (`storage/`) - Object storage for uploaded asset files
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Bearer token guard and typed session access
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, HTTP clients, token service, storage)
//! - **Startup** (`startup`) - Initialization of database, sessions, clients and the admin bootstrap
//! - **Router** (`router`) - Axum route configuration and API documentation
//! - **Scheduler** (`scheduler/`) - Cron job purging expired refresh tokens
//!
//! # Request Flow
//!
//! 1. **Router** receives the HTTP request and routes it to a controller
//! 2. **Controller** authenticates through `AuthGuard`, converts DTOs to params, calls a service
//! 3. **Service** applies visibility and ownership rules and orchestrates repositories
//! 4. **Data** queries the database and returns entity models
//! 5. **Controller** converts the resulting domain model to a DTO

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod storage;
pub mod util;
