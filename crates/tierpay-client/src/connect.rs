//! Linking a site to a Stripe account.
//!
//! `connect` writes the secure key, then saves the default paid tier in a
//! bounded retry loop because the backend provisions the processor
//! asynchronously and rejects tier writes with `STRIPE_NOT_CONFIGURED`
//! until it is done. Cancelling or exhausting that loop never undoes the
//! secure-key write that preceded it.

use thiserror::Error;
use tierpay_types::models::{
    is_truthy, portal_plans_value, setting_values, STRIPE_CONNECT_ACCOUNT_NAME,
    STRIPE_CONNECT_LIVEMODE, STRIPE_CONNECT_TOKEN, STRIPE_PUBLISHABLE_KEY, STRIPE_SECRET_KEY,
    PORTAL_PLANS_KEY,
};
use tierpay_types::{select_view, ApiError, ConnectStep, ConnectView, PricingTier, SettingsKeyValue, SiteConfig};
use tokio_util::sync::CancellationToken;

use crate::api::MembershipApi;
use crate::error::ClientError;
use crate::retry::{retry_bounded, RetryOutcome, RetryPolicy};

#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("Please enter a secure key")]
    MissingToken,

    /// The backend rejected the secure key (or a write that depended on it).
    #[error("Invalid secure key")]
    InvalidSecureKey(#[source] ApiError),

    #[error("Failed to save settings. Please check you copied both keys correctly.")]
    InvalidDirectKeys(#[source] ApiError),

    #[error("Cannot disconnect while there are members with active Stripe subscriptions ({count})")]
    ActiveSubscriptions { count: u64 },

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Result of saving the default paid tier after a connect.
#[derive(Debug, Clone, PartialEq)]
pub enum TierSave {
    /// The site has no active paid tier; nothing was written.
    NoTier,
    Saved { tier: PricingTier, attempts: u32 },
    /// The backend was still not ready when the wait budget ran out.
    Exhausted { tier: PricingTier, attempts: u32 },
    Cancelled { tier: PricingTier, attempts: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectReport {
    pub tier: TierSave,
    /// Portal plans are only updated when the tier step was not cancelled.
    pub portal_plans_updated: bool,
}

/// Summary shown for an already linked account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedAccount {
    pub account_name: Option<String>,
    pub livemode: bool,
}

pub struct StripeConnect<A> {
    api: A,
    policy: RetryPolicy,
}

impl<A: MembershipApi> StripeConnect<A> {
    pub fn new(api: A, policy: RetryPolicy) -> Self {
        Self { api, policy }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Apply default prices to the first active paid tier and save it,
    /// retrying while the processor is not configured yet.
    ///
    /// Only a non-transient write failure is an error. Running out of time
    /// returns [`TierSave::Exhausted`].
    pub async fn save_default_tier(&self, cancel: &CancellationToken) -> Result<TierSave, ClientError> {
        let Some(mut tier) = self.api.browse_active_paid_tiers().await?.into_iter().next() else {
            tracing::info!("No active paid tier, skipping tier save");
            return Ok(TierSave::NoTier);
        };
        tier.apply_default_prices();

        let outcome = retry_bounded(&self.policy, cancel, ClientError::is_dependency_not_ready, |attempt| {
            tracing::debug!(attempt, tier = %tier.id, "Saving default tier");
            self.api.edit_tier(&tier)
        })
        .await;

        match outcome {
            RetryOutcome::Succeeded { attempts, .. } => {
                tracing::info!(tier = %tier.id, attempts, "Default tier saved");
                Ok(TierSave::Saved { tier, attempts })
            },
            RetryOutcome::Exhausted { attempts } => {
                tracing::warn!(tier = %tier.id, attempts, "Stripe still not configured, tier not saved");
                Ok(TierSave::Exhausted { tier, attempts })
            },
            RetryOutcome::Cancelled { attempts } => Ok(TierSave::Cancelled { tier, attempts }),
            RetryOutcome::Failed { error, attempts } => {
                tracing::warn!(tier = %tier.id, attempts, %error, "Tier save failed");
                Err(error)
            },
        }
    }

    /// Link the site using a secure key pasted by the user.
    pub async fn connect(&self, token: &str, cancel: &CancellationToken) -> Result<ConnectReport, ConnectError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ConnectError::MissingToken);
        }
        self.connect_inner(token, cancel).await.map_err(|e| match e {
            ClientError::Api(api) => ConnectError::InvalidSecureKey(api),
            other => ConnectError::Client(other),
        })
    }

    async fn connect_inner(&self, token: &str, cancel: &CancellationToken) -> Result<ConnectReport, ClientError> {
        self.api.edit_settings(&[SettingsKeyValue::new(STRIPE_CONNECT_TOKEN, token)]).await?;

        let tier = self.save_default_tier(cancel).await?;
        if matches!(tier, TierSave::Cancelled { .. }) {
            tracing::warn!("Connect cancelled after the secure key was saved");
            return Ok(ConnectReport { tier, portal_plans_updated: false });
        }

        self.api.edit_settings(&[SettingsKeyValue::new(PORTAL_PLANS_KEY, portal_plans_value())]).await?;
        Ok(ConnectReport { tier, portal_plans_updated: true })
    }

    pub async fn connected_account(&self) -> Result<ConnectedAccount, ClientError> {
        let settings = self.api.browse_settings().await?;
        let values = setting_values(&settings, &[STRIPE_CONNECT_ACCOUNT_NAME, STRIPE_CONNECT_LIVEMODE]);
        Ok(ConnectedAccount {
            account_name: values[0].and_then(|v| v.as_str()).map(str::to_string),
            livemode: is_truthy(values[1]),
        })
    }

    /// Remove the processor link. Refused while paid members exist.
    pub async fn disconnect(&self) -> Result<(), ConnectError> {
        let count = self.api.count_paid_members().await?;
        if count > 0 {
            return Err(ConnectError::ActiveSubscriptions { count });
        }
        self.api.delete_stripe_settings().await?;
        tracing::info!("Stripe disconnected");
        Ok(())
    }

    /// Save processor keys entered directly.
    pub async fn save_direct_keys(&self, publishable_key: &str, secret_key: &str) -> Result<(), ConnectError> {
        let settings = [
            SettingsKeyValue::new(STRIPE_PUBLISHABLE_KEY, publishable_key),
            SettingsKeyValue::new(STRIPE_SECRET_KEY, secret_key),
        ];
        match self.api.edit_settings(&settings).await {
            Ok(_) => Ok(()),
            Err(ClientError::Api(api)) => Err(ConnectError::InvalidDirectKeys(api)),
            Err(other) => Err(other.into()),
        }
    }

    pub async fn current_view(&self, config: &SiteConfig, step: ConnectStep) -> Result<ConnectView, ClientError> {
        let settings = self.api.browse_settings().await?;
        Ok(select_view(config, &settings, step))
    }
}
