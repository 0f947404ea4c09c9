//! Which connection view applies to the current site state.
//!
//! Precedence: direct-key entry overrides an existing connection, and an
//! existing connection overrides the local step the user is on.

use serde::{Deserialize, Serialize};

use crate::models::{
    is_truthy, setting_value, Setting, SiteConfig, STRIPE_CONNECT_ACCOUNT_ID,
    STRIPE_PUBLISHABLE_KEY, STRIPE_SECRET_KEY,
};

/// Dialog width when an account is connected.
pub const CONNECTED_WIDTH: u32 = 740;
/// Dialog width for every other view.
pub const DEFAULT_WIDTH: u32 = 520;

/// Local step of the connect flow before an account exists.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConnectStep {
    #[default]
    Start,
    Connect,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConnectView {
    /// Publishable and secret keys are typed in directly.
    DirectEntry,
    /// A processor account is linked; show it and offer disconnect.
    Connected,
    /// Intro screen, nothing linked yet.
    NotStarted,
    /// Waiting for the user to paste a secure key.
    AwaitingKey,
}

fn has_setting(settings: &[Setting], key: &str) -> bool {
    is_truthy(setting_value(settings, key))
}

fn has_direct_keys(settings: &[Setting]) -> bool {
    has_setting(settings, STRIPE_SECRET_KEY) && has_setting(settings, STRIPE_PUBLISHABLE_KEY)
}

/// Payments are usable: a connected account exists or both direct keys are set.
///
/// In direct mode only the keys count.
pub fn stripe_enabled(config: &SiteConfig, settings: &[Setting]) -> bool {
    if config.stripe_direct {
        return has_direct_keys(settings);
    }
    has_setting(settings, STRIPE_CONNECT_ACCOUNT_ID) || has_direct_keys(settings)
}

/// Pick the view for the given configuration, stored settings and local step.
pub fn select_view(config: &SiteConfig, settings: &[Setting], step: ConnectStep) -> ConnectView {
    let connected = has_setting(settings, STRIPE_CONNECT_ACCOUNT_ID);

    // keys set up while direct mode was on stay editable after it is turned off
    if config.stripe_direct || (stripe_enabled(config, settings) && !connected) {
        return ConnectView::DirectEntry;
    }
    if connected {
        return ConnectView::Connected;
    }
    match step {
        ConnectStep::Start => ConnectView::NotStarted,
        ConnectStep::Connect => ConnectView::AwaitingKey,
    }
}

/// Width of the dialog hosting the views.
pub fn dialog_width(settings: &[Setting]) -> u32 {
    if has_setting(settings, STRIPE_CONNECT_ACCOUNT_ID) {
        CONNECTED_WIDTH
    } else {
        DEFAULT_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn setting(key: &str, value: serde_json::Value) -> Setting {
        Setting { key: key.to_string(), value }
    }

    fn connected() -> Vec<Setting> {
        vec![setting(STRIPE_CONNECT_ACCOUNT_ID, json!("acct_1"))]
    }

    fn direct_keys() -> Vec<Setting> {
        vec![setting(STRIPE_PUBLISHABLE_KEY, json!("pk_test")), setting(STRIPE_SECRET_KEY, json!("sk_test"))]
    }

    #[test]
    fn test_direct_mode_overrides_connected() {
        let config = SiteConfig { stripe_direct: true };
        assert_eq!(select_view(&config, &connected(), ConnectStep::Start), ConnectView::DirectEntry);
        assert_eq!(select_view(&config, &[], ConnectStep::Connect), ConnectView::DirectEntry);
    }

    #[test]
    fn test_leftover_direct_keys_keep_direct_view() {
        let config = SiteConfig::default();
        assert_eq!(select_view(&config, &direct_keys(), ConnectStep::Start), ConnectView::DirectEntry);
    }

    #[test]
    fn test_connected_overrides_step() {
        let config = SiteConfig::default();
        let mut settings = connected();
        settings.extend(direct_keys());
        assert_eq!(select_view(&config, &settings, ConnectStep::Connect), ConnectView::Connected);
        assert_eq!(select_view(&config, &connected(), ConnectStep::Start), ConnectView::Connected);
    }

    #[test]
    fn test_step_flag_when_nothing_linked() {
        let config = SiteConfig::default();
        let half_keys = vec![setting(STRIPE_PUBLISHABLE_KEY, json!("pk_test"))];
        assert_eq!(select_view(&config, &half_keys, ConnectStep::Start), ConnectView::NotStarted);
        assert_eq!(select_view(&config, &[], ConnectStep::Connect), ConnectView::AwaitingKey);
    }

    #[test]
    fn test_empty_account_id_is_not_connected() {
        let config = SiteConfig::default();
        let settings = vec![setting(STRIPE_CONNECT_ACCOUNT_ID, json!(null))];
        assert_eq!(select_view(&config, &settings, ConnectStep::Start), ConnectView::NotStarted);
        assert_eq!(dialog_width(&settings), DEFAULT_WIDTH);
        assert_eq!(dialog_width(&connected()), CONNECTED_WIDTH);
    }
}
