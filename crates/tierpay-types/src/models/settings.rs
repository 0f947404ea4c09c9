//! Site settings as read from and written to the admin API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const STRIPE_CONNECT_TOKEN: &str = "stripe_connect_integration_token";
pub const STRIPE_CONNECT_ACCOUNT_ID: &str = "stripe_connect_account_id";
pub const STRIPE_CONNECT_ACCOUNT_NAME: &str = "stripe_connect_account_name";
pub const STRIPE_CONNECT_LIVEMODE: &str = "stripe_connect_livemode";
pub const STRIPE_PUBLISHABLE_KEY: &str = "stripe_publishable_key";
pub const STRIPE_SECRET_KEY: &str = "stripe_secret_key";
pub const PORTAL_PLANS_KEY: &str = "portal_plans";

/// Plans offered in the member portal once payments are connected.
pub const PORTAL_PLANS: [&str; 3] = ["free", "monthly", "yearly"];

/// A setting as returned by the settings read. Values are arbitrary JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Setting {
    pub key: String,
    #[serde(default)]
    pub value: Value,
}

/// A key/value pair sent to the settings write. Last write wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsKeyValue {
    pub key: String,
    pub value: String,
}

impl SettingsKeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

/// Look up one setting value by key.
pub fn setting_value<'a>(settings: &'a [Setting], key: &str) -> Option<&'a Value> {
    settings.iter().find(|s| s.key == key).map(|s| &s.value)
}

/// Look up several setting values, in the order of `keys`.
pub fn setting_values<'a>(settings: &'a [Setting], keys: &[&str]) -> Vec<Option<&'a Value>> {
    keys.iter().map(|key| setting_value(settings, key)).collect()
}

/// Whether a setting value counts as "set".
///
/// Null, `false`, zero and the empty string are unset; everything else is set.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// `portal_plans` is stored as a JSON-encoded string.
pub fn portal_plans_value() -> String {
    let plans: Vec<Value> = PORTAL_PLANS.iter().map(|p| Value::String((*p).to_string())).collect();
    Value::Array(plans).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings() -> Vec<Setting> {
        vec![
            Setting { key: STRIPE_CONNECT_ACCOUNT_ID.into(), value: json!("acct_123") },
            Setting { key: STRIPE_CONNECT_LIVEMODE.into(), value: json!(false) },
            Setting { key: STRIPE_SECRET_KEY.into(), value: json!("") },
        ]
    }

    #[test]
    fn test_setting_values_preserve_key_order() {
        let settings = settings();
        let values = setting_values(&settings, &[STRIPE_CONNECT_LIVEMODE, "missing", STRIPE_CONNECT_ACCOUNT_ID]);
        assert_eq!(values, vec![Some(&json!(false)), None, Some(&json!("acct_123"))]);
    }

    #[test]
    fn test_truthiness() {
        let settings = settings();
        assert!(is_truthy(setting_value(&settings, STRIPE_CONNECT_ACCOUNT_ID)));
        assert!(!is_truthy(setting_value(&settings, STRIPE_CONNECT_LIVEMODE)));
        assert!(!is_truthy(setting_value(&settings, STRIPE_SECRET_KEY)));
        assert!(!is_truthy(setting_value(&settings, "missing")));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(is_truthy(Some(&json!(1))));
    }

    #[test]
    fn test_portal_plans_is_json_string() {
        assert_eq!(portal_plans_value(), r#"["free","monthly","yearly"]"#);
    }
}
