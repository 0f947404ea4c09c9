use crate::api::MembershipApi;
use crate::error::ClientError;
use crate::types::ClientConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tierpay_types::models::BrowseMeta;
use tierpay_types::{ApiError, ApiErrorEntry, PricingTier, Setting, SettingsKeyValue};
use url::Url;

const PAID_ACTIVE_TIERS: &str = "type:paid+active:true";
const PAID_MEMBERS: &str = "status:paid";

/// Which processor environment the connect URL generates a key for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectMode {
    Test,
    Live,
}

impl ConnectMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Live => "live",
        }
    }
}

#[derive(Serialize)]
struct SettingsEnvelope<'a> {
    settings: &'a [SettingsKeyValue],
}

#[derive(Deserialize)]
struct SettingsResponse {
    settings: Vec<Setting>,
}

#[derive(Serialize)]
struct TierEnvelope<'a> {
    tiers: [&'a PricingTier; 1],
}

#[derive(Deserialize)]
struct TiersResponse {
    tiers: Vec<PricingTier>,
}

#[derive(Deserialize)]
struct MembersResponse {
    #[serde(default)]
    meta: BrowseMeta,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ApiErrorEntry>,
}

/// HTTP implementation of [`MembershipApi`].
pub struct AdminClient {
    client: Client,
    config: ClientConfig,
    api_root: String,
}

impl AdminClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let parsed = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }
        let api_root = parsed.as_str().trim_end_matches('/').to_string();
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, config, api_root })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Page where the user generates the secure key to paste into `connect`.
    pub fn stripe_connect_url(&self, mode: ConnectMode) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.endpoint("members/stripe_connect"))
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut().append_pair("mode", mode.as_str());
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("Authorization", format!("Ghost {}", self.config.api_token))
            .header("Accept", "application/json")
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let resp = checked(self.authorized(builder).send().await?).await?;
        resp.json().await.map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

/// Turn a non-success response into `Api` when the body carries errors,
/// `Status` otherwise.
async fn checked(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&message) {
        Ok(body) if !body.errors.is_empty() => {
            Err(ClientError::Api(ApiError { status: status.as_u16(), errors: body.errors }))
        },
        _ => Err(ClientError::Status { status: status.as_u16(), message }),
    }
}

#[async_trait]
impl MembershipApi for AdminClient {
    async fn browse_settings(&self) -> Result<Vec<Setting>, ClientError> {
        let resp: SettingsResponse = self.send_json(self.client.get(self.endpoint("settings/"))).await?;
        Ok(resp.settings)
    }

    async fn edit_settings(&self, settings: &[SettingsKeyValue]) -> Result<Vec<Setting>, ClientError> {
        let keys: Vec<&str> = settings.iter().map(|s| s.key.as_str()).collect();
        tracing::info!(?keys, "Saving settings");
        let body = SettingsEnvelope { settings };
        let resp: SettingsResponse =
            self.send_json(self.client.put(self.endpoint("settings/")).json(&body)).await?;
        Ok(resp.settings)
    }

    async fn delete_stripe_settings(&self) -> Result<(), ClientError> {
        tracing::info!("Deleting Stripe settings");
        let builder = self.client.delete(self.endpoint("settings/stripe/connect/"));
        checked(self.authorized(builder).send().await?).await?;
        Ok(())
    }

    async fn browse_active_paid_tiers(&self) -> Result<Vec<PricingTier>, ClientError> {
        let builder = self.client.get(self.endpoint("tiers/")).query(&[("filter", PAID_ACTIVE_TIERS)]);
        let resp: TiersResponse = self.send_json(builder).await?;
        Ok(resp.tiers)
    }

    async fn edit_tier(&self, tier: &PricingTier) -> Result<PricingTier, ClientError> {
        tracing::debug!(tier = %tier.id, "Saving tier");
        let builder = self
            .client
            .put(self.endpoint(&format!("tiers/{}/", tier.id)))
            .json(&TierEnvelope { tiers: [tier] });
        let resp: TiersResponse = self.send_json(builder).await?;
        resp.tiers
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::InvalidResponse("tier edit returned no tiers".to_string()))
    }

    async fn count_paid_members(&self) -> Result<u64, ClientError> {
        let builder =
            self.client.get(self.endpoint("members/")).query(&[("filter", PAID_MEMBERS), ("limit", "0")]);
        let resp: MembersResponse = self.send_json(builder).await?;
        Ok(resp.meta.pagination.total)
    }
}
