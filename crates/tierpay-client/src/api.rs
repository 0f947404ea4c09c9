//! The admin API operations the connect flows depend on.

use async_trait::async_trait;
use tierpay_types::{PricingTier, Setting, SettingsKeyValue};

use crate::error::ClientError;

/// Settings, tiers and members as exposed by the membership admin API.
///
/// [`crate::AdminClient`] talks HTTP; tests substitute in-memory fakes.
#[async_trait]
pub trait MembershipApi: Send + Sync {
    async fn browse_settings(&self) -> Result<Vec<Setting>, ClientError>;

    /// Write the given pairs in order and return the updated settings.
    async fn edit_settings(&self, settings: &[SettingsKeyValue]) -> Result<Vec<Setting>, ClientError>;

    /// Remove the payment-processor configuration.
    async fn delete_stripe_settings(&self) -> Result<(), ClientError>;

    /// Paid, active tiers. The first one is the site's default paid tier.
    async fn browse_active_paid_tiers(&self) -> Result<Vec<PricingTier>, ClientError>;

    /// Replace the whole tier record.
    async fn edit_tier(&self, tier: &PricingTier) -> Result<PricingTier, ClientError>;

    async fn count_paid_members(&self) -> Result<u64, ClientError>;
}
