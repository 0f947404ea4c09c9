#![doc = include_str!("../README.md")]

mod api;
mod client;
mod connect;
mod error;
mod retry;
mod types;

pub use api::MembershipApi;
pub use client::{AdminClient, ConnectMode};
pub use connect::{ConnectError, ConnectReport, ConnectedAccount, StripeConnect, TierSave};
pub use error::ClientError;
pub use retry::{retry_bounded, RetryOutcome, RetryPolicy, MAX_POLL_ATTEMPTS, POLL_INTERVAL};
pub use types::*;
