//! Cron jobs running alongside the HTTP server.

pub mod refresh_tokens;
