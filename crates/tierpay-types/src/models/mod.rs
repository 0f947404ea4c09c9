//! Domain models exchanged with the membership admin API.

mod config;
mod member;
mod settings;
mod tier;

pub use config::SiteConfig;
pub use member::{BrowseMeta, Pagination};
pub use settings::{
    is_truthy, portal_plans_value, setting_value, setting_values, Setting, SettingsKeyValue,
    PORTAL_PLANS, PORTAL_PLANS_KEY, STRIPE_CONNECT_ACCOUNT_ID, STRIPE_CONNECT_ACCOUNT_NAME,
    STRIPE_CONNECT_LIVEMODE, STRIPE_CONNECT_TOKEN, STRIPE_PUBLISHABLE_KEY, STRIPE_SECRET_KEY,
};
pub use tier::{PricingTier, DEFAULT_CURRENCY, DEFAULT_MONTHLY_PRICE, DEFAULT_YEARLY_PRICE};
