//! Error types for the admin API client.

use thiserror::Error;
use tierpay_types::{ApiError, ConfigError};

/// Errors that can occur when talking to the admin API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed before a response arrived.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a structured error body.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Backend answered with a non-success status and no error body.
    #[error("Unexpected status ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Base URL could not be parsed or extended.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// The structured API error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Processor configuration has not propagated yet; safe to retry.
    pub fn is_dependency_not_ready(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_stripe_not_configured)
    }
}
