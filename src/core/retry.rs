//! Bounded-retry execution envelope shared by every access-layer operation.

use crate::core::sink::OutcomeSink;
use crate::errors::{AppError, AppResult, StoreError};
use crate::models::OperationOutcome;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::{Duration, Instant};

/// Fixed-interval retry policy: no exponential growth, no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_ms: u64,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, backoff_ms: u64) -> Self {
        Self {
            max_attempts,
            backoff_ms,
        }
    }

    /// Query-level policy: 3 attempts, 3 ms apart (transient lock contention).
    pub const fn query_default() -> Self {
        Self::new(3, 3)
    }

    /// Connect-level policy: 5 attempts, 5 s apart (server still starting).
    pub const fn connect_default() -> Self {
        Self::new(5, 5_000)
    }

    /// Attempt budget; a configured 0 still runs the call once.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::query_default()
    }
}

/// Run `call` until it succeeds or the policy's attempt budget is spent.
///
/// Each attempt is timed and reported to `sink` exactly once, success or
/// failure. After a failed attempt that is not the last one the calling
/// thread sleeps for the fixed backoff. Exhaustion returns
/// [`AppError::RetryExhausted`] carrying the last store error.
pub fn execute_with_retry<T, F>(
    operation: &'static str,
    policy: &RetryPolicy,
    sink: &dyn OutcomeSink,
    mut call: F,
) -> AppResult<T>
where
    F: FnMut() -> Result<T, StoreError>,
{
    let max_attempts = policy.attempts();
    let backoff = policy.backoff();
    let mut attempt = 1;

    loop {
        let started_at = Local::now();
        let clock = Instant::now();
        let result = call();
        let duration = clock.elapsed();
        let finished_at = Local::now();

        let mut outcome = OperationOutcome {
            operation,
            attempt,
            max_attempts,
            started_at,
            finished_at,
            duration,
            succeeded: result.is_ok(),
            error_detail: None,
            backoff: None,
        };

        match result {
            Ok(value) => {
                sink.record(&outcome);
                return Ok(value);
            }
            Err(err) => {
                let exhausted = attempt >= max_attempts;
                outcome.error_detail = Some(err.to_string());
                if !exhausted {
                    outcome.backoff = Some(backoff);
                }
                sink.record(&outcome);

                if exhausted {
                    return Err(AppError::RetryExhausted {
                        operation,
                        attempts: attempt,
                        source: err,
                    });
                }

                thread::sleep(backoff);
                attempt += 1;
            }
        }
    }
}
