//! Site configuration relevant to payment setup.

use serde::{Deserialize, Serialize};

/// Platform configuration, as exposed by the site's config endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Processor keys are entered directly instead of through the connect flow.
    #[serde(default)]
    pub stripe_direct: bool,
}
