use std::time::Duration;

use tierpay_types::ConfigError;

use crate::retry::RetryPolicy;

pub const ENV_ADMIN_URL: &str = "TIERPAY_ADMIN_URL";
pub const ENV_ADMIN_TOKEN: &str = "TIERPAY_ADMIN_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "TIERPAY_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Admin API root, e.g. `https://example.com/ghost/api/admin`.
    pub base_url: String,
    /// Sent as `Authorization: Ghost <token>`.
    pub api_token: String,
    pub timeout_secs: u64,
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:2368/ghost/api/admin".to_string(),
            api_token: String::new(),
            timeout_secs: 30,
            retry: RetryPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `TIERPAY_ADMIN_URL`, `TIERPAY_ADMIN_TOKEN` and
    /// `TIERPAY_TIMEOUT_SECS`. The token is required.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_ADMIN_URL) {
            config.base_url = url;
        }
        config.api_token = lookup(ENV_ADMIN_TOKEN)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingValue { key: ENV_ADMIN_TOKEN.to_string() })?;
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = raw.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue { key: ENV_TIMEOUT_SECS.to_string(), message: e.to_string() }
            })?;
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_ADMIN_URL, "https://site.test/ghost/api/admin"),
            (ENV_ADMIN_TOKEN, "abc"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://site.test/ghost/api/admin");
        assert_eq!(config.api_token, "abc");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.retry, RetryPolicy::default());
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_ADMIN_TOKEN, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingValue { key: ENV_ADMIN_TOKEN.to_string() });
    }

    #[test]
    fn test_bad_timeout_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_ADMIN_TOKEN, "abc"), (ENV_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == ENV_TIMEOUT_SECS));
    }
}
