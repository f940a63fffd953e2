//! Bounded retry with exponential backoff.
//! Attempts are strictly sequential; the delay is a pure function of the
//! attempt index; after exhaustion the last real error is surfaced verbatim.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryOptions {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_max_retries() -> u32 {
    2
}
fn default_initial_delay_ms() -> u64 {
    1000
}
fn default_max_delay_ms() -> u64 {
    4000
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

/// Delay before the retry that follows failed attempt `attempt` (0-based):
/// `min(initial * 2^attempt, max)`.
pub fn backoff_delay(options: &RetryOptions, attempt: u32) -> Duration {
    let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
    let delay_ms = options
        .initial_delay_ms
        .saturating_mul(factor)
        .min(options.max_delay_ms);
    Duration::from_millis(delay_ms)
}

/// Executes fallible async operations with a bounded number of retries.
/// Callers are responsible for only handing it operations that are safe to
/// repeat (reads, or idempotent "set state" writes).
#[derive(Debug, Clone)]
pub struct RetryEngine {
    options: RetryOptions,
}

impl RetryEngine {
    pub fn new(options: RetryOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RetryOptions {
        &self.options
    }

    /// Run `op`, retrying on failures accepted by `should_retry` up to
    /// `max_retries` times. The error returned after exhaustion is the last
    /// one produced by `op`, never a synthetic wrapper, so callers can still
    /// classify the true cause.
    pub async fn execute<T, F, Fut, P>(&self, mut op: F, should_retry: P) -> AppResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = AppResult<T>>,
        P: Fn(&AppError) -> bool,
    {
        let mut attempt: u32 = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if attempt >= self.options.max_retries || !should_retry(&err) {
                        return Err(err);
                    }
                    let delay = backoff_delay(&self.options, attempt);
                    debug!(
                        attempt = attempt + 1,
                        delay_before_next_ms = delay.as_millis() as u64,
                        error = %err,
                        "transient failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
