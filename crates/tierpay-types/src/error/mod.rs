//! Typed error definitions for tierpay.
//!
//! - **`ApiError`** mirrors the admin API error body: a list of
//!   `{code, message}` entries plus the HTTP status it arrived with.
//! - **`ConfigError`** covers invalid client or retry configuration.

mod api;
mod config;

pub use api::{ApiError, ApiErrorEntry, STRIPE_NOT_CONFIGURED};
pub use config::ConfigError;
