//! # tierpay types
//!
//! Core types, models, and error definitions shared by the tierpay crates.
//!
//! - **`error`** - structured admin API errors and configuration errors
//! - **`models`** - tiers, settings, member pagination, site config
//! - **`view`** - which connection view applies to the current site state
//!
//! ## Architecture Role
//!
//! ```text
//!         tierpay-types (this crate)
//!                 │
//!                 ▼
//!          tierpay-client
//!                 │
//!                 ▼
//!            tierpay-cli
//! ```

pub mod error;
pub mod models;
pub mod view;

pub use error::{ApiError, ApiErrorEntry, ConfigError, STRIPE_NOT_CONFIGURED};
pub use models::{PricingTier, Setting, SettingsKeyValue, SiteConfig};
pub use view::{select_view, ConnectStep, ConnectView};
