//! Fixed-interval retry bounded by a total wait budget.
//!
//! Every attempt is preceded by one interval of delay. Only failures the
//! caller marks retryable consume budget; any other failure ends the loop
//! with that same error. When the budget runs out the outcome is
//! [`RetryOutcome::Exhausted`], which is distinct from success so callers
//! decide whether giving up is an error.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tierpay_types::ConfigError;
use tokio_util::sync::CancellationToken;

/// Delay before each save attempt while waiting on processor provisioning.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1000);
/// Attempts that fit in the default wait budget.
pub const MAX_POLL_ATTEMPTS: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    interval: Duration,
    max_wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { interval: POLL_INTERVAL, max_wait: POLL_INTERVAL * MAX_POLL_ATTEMPTS }
    }
}

impl RetryPolicy {
    /// `interval` must be non-zero and no longer than `max_wait`.
    pub fn new(interval: Duration, max_wait: Duration) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::InvalidRetryPolicy {
                message: "interval must be non-zero".to_string(),
            });
        }
        if max_wait < interval {
            return Err(ConfigError::InvalidRetryPolicy {
                message: format!(
                    "max wait {}ms is shorter than one interval of {}ms",
                    max_wait.as_millis(),
                    interval.as_millis()
                ),
            });
        }
        Ok(Self { interval, max_wait })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn max_wait(&self) -> Duration {
        self.max_wait
    }

    /// Upper bound on attempts: `floor(max_wait / interval)`.
    pub fn max_attempts(&self) -> u32 {
        let attempts = self.max_wait.as_nanos() / self.interval.as_nanos();
        u32::try_from(attempts).unwrap_or(u32::MAX)
    }
}

/// How a bounded retry ended.
#[derive(Debug, PartialEq)]
pub enum RetryOutcome<T, E> {
    /// The action succeeded on attempt `attempts`.
    Succeeded { value: T, attempts: u32 },
    /// Every attempt failed retryably and the wait budget is spent.
    Exhausted { attempts: u32 },
    /// A non-retryable error ended the loop; `error` is the one the action returned.
    Failed { error: E, attempts: u32 },
    /// The cancellation token fired before the loop finished.
    Cancelled { attempts: u32 },
}

impl<T, E> RetryOutcome<T, E> {
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Succeeded { attempts, .. }
            | Self::Exhausted { attempts }
            | Self::Failed { attempts, .. }
            | Self::Cancelled { attempts } => *attempts,
        }
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Run `action` until it succeeds, fails non-retryably, the budget in
/// `policy` is spent, or `cancel` fires.
///
/// The action receives the 1-based attempt number. Cancellation is checked
/// during each delay; an attempt already in flight runs to completion.
#[tracing::instrument(
    skip_all,
    fields(interval_ms = policy.interval.as_millis() as u64, max_wait_ms = policy.max_wait.as_millis() as u64)
)]
pub async fn retry_bounded<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    is_retryable: P,
    mut action: F,
) -> RetryOutcome<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: Display,
{
    let mut elapsed = Duration::ZERO;
    let mut attempts = 0;

    while elapsed.saturating_add(policy.interval) <= policy.max_wait {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::warn!(attempts, "Retry cancelled");
                return RetryOutcome::Cancelled { attempts };
            },
            () = tokio::time::sleep(policy.interval) => {},
        }

        attempts += 1;
        match action(attempts).await {
            Ok(value) => return RetryOutcome::Succeeded { value, attempts },
            Err(error) if is_retryable(&error) => {
                elapsed += policy.interval;
                tracing::debug!(
                    attempt = attempts,
                    elapsed_ms = elapsed.as_millis() as u64,
                    %error,
                    "Dependency not ready, retrying"
                );
            },
            Err(error) => return RetryOutcome::Failed { error, attempts },
        }
    }

    tracing::warn!(attempts, "Retry budget exhausted without success");
    RetryOutcome::Exhausted { attempts }
}
