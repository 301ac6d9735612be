use std::future::Future;
use std::time::Duration;

use bounded_integer::bounded_integer;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, warn};

bounded_integer! {
    /// Number of attempts a retry policy allows (1-255).
    /// A value of 1 means the operation runs once and is never retried.
    #[repr(u8)]
    pub struct Attempts { 1..=255 }
}

const DEFAULT_MAX_ATTEMPTS: Attempts = match Attempts::new(3) {
    Some(attempts) => attempts,
    None => unreachable!(),
};
const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(1000);
const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(5000);

/// Upper bound of the additive jitter, exclusive.
const MAX_JITTER_MS: u64 = 1000;

/// Backoff schedule for re-running a fallible asynchronous operation.
///
/// The schedule is exponential with additive jitter: after each retried
/// failure the delay doubles, gains a uniform random 0–1000 ms, and is
/// capped at `max_delay`. Which errors are worth retrying is not part of
/// the policy value; callers pass a predicate per invocation, so the same
/// policy can serve operations with different failure taxonomies.
///
/// Policies deserialize from configuration with human-readable durations
/// (e.g. `"250ms"`, `"2s"`); omitted fields fall back to the defaults of
/// 3 attempts, 1 s initial delay, and 5 s delay cap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempt budget, including the first call.
    pub max_attempts: Attempts,
    /// Delay before the first retry.
    #[serde(with = "humantime_serde")]
    pub initial_delay: Duration,
    /// Cap applied to the growing delay.
    #[serde(with = "humantime_serde")]
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay: DEFAULT_INITIAL_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Runs `operation` under this policy.
    ///
    /// The first attempt starts immediately. On failure, `should_retry`
    /// decides whether the error is worth another attempt; a `false`
    /// verdict or an exhausted attempt budget returns the error to the
    /// caller unchanged. Intermediate errors are logged, never surfaced.
    ///
    /// The executor adds nothing beyond scheduling: no caching, no
    /// deduplication. Whether `operation` is safe to re-run is the
    /// caller's contract.
    pub async fn run<T, E, Op, Fut, Retry>(
        &self,
        mut operation: Op,
        should_retry: Retry,
    ) -> Result<T, E>
    where
        Op: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        Retry: Fn(&E) -> bool,
        E: std::fmt::Display,
    {
        let max_attempts = u32::from(self.max_attempts.get());
        let mut delay = self.initial_delay;
        let mut attempt = 1u32;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if !should_retry(&error) {
                        debug!(attempt, error = %error, "error is not retryable, failing fast");
                        return Err(error);
                    }
                    if attempt >= max_attempts {
                        warn!(attempts = attempt, error = %error, "retry attempts exhausted");
                        return Err(error);
                    }
                    debug!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "retrying after transient failure"
                    );
                    sleep(delay).await;

                    let jitter = Duration::from_millis(rand::rng().random_range(0..MAX_JITTER_MS));
                    delay = (delay * 2 + jitter).min(self.max_delay);
                    attempt += 1;
                }
            }
        }
    }
}
