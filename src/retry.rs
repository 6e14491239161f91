/*!
 * Bounded retry with randomized exponential backoff.
 *
 * `RetryPolicy` is a plain value that can be wrapped around any async
 * operation. The wait after the n-th failed attempt grows as
 * `multiplier * 2^(n-1)` seconds, is clamped to `[min_wait, max_wait]`, and is
 * then jittered without ever leaving that range.
 */

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use rand::Rng;

use crate::app_config::RetryConfig;

/// Custom jitter: receives `(min_wait, ceiling)` and returns the wait
pub type JitterFn = Arc<dyn Fn(Duration, Duration) -> Duration + Send + Sync>;

/// How the exponential ceiling is randomized
#[derive(Clone, Default)]
pub enum Jitter {
    /// Wait exactly the exponential ceiling
    None,
    /// Uniformly random between the minimum wait and the ceiling
    #[default]
    Full,
    /// Caller-supplied function; the result is clamped to the policy bounds
    Custom(JitterFn),
}

impl Jitter {
    /// Build a custom jitter from a closure
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(Duration, Duration) -> Duration + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    fn apply(&self, min_wait: Duration, ceiling: Duration) -> Duration {
        match self {
            Self::None => ceiling,
            Self::Full => {
                let secs = rand::rng().random_range(min_wait.as_secs_f64()..=ceiling.as_secs_f64());
                Duration::try_from_secs_f64(secs).unwrap_or(ceiling)
            }
            Self::Custom(f) => f(min_wait, ceiling),
        }
    }
}

impl fmt::Debug for Jitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Full => f.write_str("Full"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Returned when every attempt failed
#[derive(Debug)]
pub struct RetryError<E> {
    /// Attempts made, always equal to the policy's `max_attempts`
    pub attempts: u32,
    /// Error from the final attempt
    pub last_error: E,
}

/// Retry policy: attempt cap, wait bounds and jitter
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    min_wait: Duration,
    max_wait: Duration,
    multiplier: f64,
    jitter: Jitter,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

impl RetryPolicy {
    /// Create a policy; the cap is at least one attempt and `max_wait` is
    /// raised to `min_wait` if it is smaller
    pub fn new(max_attempts: u32, min_wait: Duration, max_wait: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            min_wait,
            max_wait: max_wait.max(min_wait),
            multiplier: 1.0,
            jitter: Jitter::default(),
        }
    }

    /// Build the policy described by the configuration
    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_secs(config.min_wait_secs),
            Duration::from_secs(config.max_wait_secs),
        )
        .with_multiplier(config.multiplier)
    }

    /// Set the exponential multiplier in seconds; non-positive or non-finite
    /// values fall back to 1.0
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = if multiplier.is_finite() && multiplier > 0.0 {
            multiplier
        } else {
            1.0
        };
        self
    }

    /// Set the jitter
    pub fn with_jitter(mut self, jitter: Jitter) -> Self {
        self.jitter = jitter;
        self
    }

    /// Maximum number of attempts, including the first
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Lower bound of every wait
    pub fn min_wait(&self) -> Duration {
        self.min_wait
    }

    /// Upper bound of every wait
    pub fn max_wait(&self) -> Duration {
        self.max_wait
    }

    /// Exponential ceiling after the given failed attempt (1-based), before jitter
    pub fn ceiling_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let secs = self.multiplier * 2f64.powi(exponent);
        let secs = secs
            .min(self.max_wait.as_secs_f64())
            .max(self.min_wait.as_secs_f64());
        // f64 rounding can push a huge max_wait past what Duration holds
        Duration::try_from_secs_f64(secs).unwrap_or(self.max_wait)
    }

    /// Wait after the given failed attempt (1-based), jitter applied
    pub fn wait_for(&self, attempt: u32) -> Duration {
        let ceiling = self.ceiling_for(attempt);
        self.jitter
            .apply(self.min_wait, ceiling)
            .clamp(self.min_wait, self.max_wait)
    }

    /// Run `operation` until it succeeds or the attempt cap is reached
    ///
    /// The operation receives the 1-based attempt number. There is no wait
    /// after the final attempt.
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, RetryError<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let mut attempt = 1;
        loop {
            match operation(attempt).await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!("Succeeded on attempt {}/{}", attempt, self.max_attempts);
                    }
                    return Ok(value);
                }
                Err(e) => {
                    warn!("Attempt {}/{} failed: {}", attempt, self.max_attempts, e);
                    if attempt >= self.max_attempts {
                        return Err(RetryError {
                            attempts: attempt,
                            last_error: e,
                        });
                    }
                }
            }

            let wait = self.wait_for(attempt);
            debug!("Retrying in {:.2}s", wait.as_secs_f64());
            tokio::time::sleep(wait).await;
            attempt += 1;
        }
    }
}
