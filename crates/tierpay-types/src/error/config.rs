//! Configuration-related errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while building client or retry configuration.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ConfigError {
    /// Required value missing (env var or flag)
    #[error("Missing config value: {key}")]
    MissingValue {
        /// Name of the env var or flag
        key: String,
    },

    /// Value present but unparseable
    #[error("Invalid config value for {key}: {message}")]
    InvalidValue {
        /// Name of the env var or flag
        key: String,
        /// Description of the parse failure
        message: String,
    },

    /// Retry interval/budget combination cannot terminate or never attempts
    #[error("Invalid retry policy: {message}")]
    InvalidRetryPolicy {
        /// Description of the violated constraint
        message: String,
    },
}
