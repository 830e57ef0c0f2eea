use crate::report::{Event, Reporter};
use crate::scraper::ScraperError;
use std::time::Duration;

/// Bounded exponential backoff: `base`, `2 * base`, `4 * base`, ... capped at
/// `max_delay`, for at most `max_attempts` calls in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Wait after the `attempt`-th failure (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(31);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Runs `op` until it succeeds, fails with a non-transient error, or the
/// policy runs out of attempts. The last error is returned as is.
pub fn with_retry<T, F>(
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    reporter: &dyn Reporter,
    mut op: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Result<T, ScraperError>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < max_attempts => {
                let delay = policy.delay_after(attempt);
                reporter.report(Event::RetryScheduled {
                    attempt,
                    max_attempts,
                    delay,
                    error: e.to_string(),
                });
                sleeper.sleep(delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
