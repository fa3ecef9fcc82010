//! Workshop: a backend for sharing creative works with a Discord community.

pub mod model;
pub mod server;
