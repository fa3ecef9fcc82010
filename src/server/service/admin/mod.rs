//! Administrative services.
//!
//! Holds the one-time code used to bootstrap the first admin account.

pub mod code;
