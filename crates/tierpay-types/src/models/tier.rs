//! Pricing tier model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Monthly price (minor units) applied to the first paid tier on connect.
pub const DEFAULT_MONTHLY_PRICE: u64 = 500;
/// Yearly price (minor units) applied to the first paid tier on connect.
pub const DEFAULT_YEARLY_PRICE: u64 = 5000;
pub const DEFAULT_CURRENCY: &str = "USD";

/// A priced membership plan.
///
/// Only the pricing fields are typed; every other field the backend returns
/// is kept in `extra` so a write sends the record back whole.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingTier {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub monthly_price: Option<u64>,
    #[serde(default)]
    pub yearly_price: Option<u64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PricingTier {
    /// Create a tier with only an id set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            monthly_price: None,
            yearly_price: None,
            currency: None,
            extra: Map::new(),
        }
    }

    /// Overwrite the price fields with the defaults used for a fresh connection.
    pub fn apply_default_prices(&mut self) {
        self.monthly_price = Some(DEFAULT_MONTHLY_PRICE);
        self.yearly_price = Some(DEFAULT_YEARLY_PRICE);
        self.currency = Some(DEFAULT_CURRENCY.to_string());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let value = json!({
            "id": "t1",
            "name": "Supporter",
            "monthly_price": null,
            "active": true,
            "benefits": ["Early access"],
            "visibility": "public"
        });
        let mut tier: PricingTier = serde_json::from_value(value).unwrap();
        tier.apply_default_prices();

        let out = serde_json::to_value(&tier).unwrap();
        assert_eq!(out["monthly_price"], 500);
        assert_eq!(out["yearly_price"], 5000);
        assert_eq!(out["currency"], "USD");
        assert_eq!(out["active"], true);
        assert_eq!(out["benefits"][0], "Early access");
        assert_eq!(out["visibility"], "public");
    }

    #[test]
    fn test_new_tier_has_no_prices() {
        let tier = PricingTier::new("t1");
        assert_eq!(tier.monthly_price, None);
        assert_eq!(tier.yearly_price, None);
        assert_eq!(tier.currency, None);
    }
}
