//! Per-attempt record produced by the retry envelope.
//! Never persisted; handed to an `OutcomeSink` right after the attempt.

use chrono::{DateTime, Local};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct OperationOutcome {
    pub operation: &'static str,
    /// 1-based attempt number.
    pub attempt: u32,
    pub max_attempts: u32,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub duration: Duration,
    pub succeeded: bool,
    /// Present only on failure.
    pub error_detail: Option<String>,
    /// Wait scheduled before the next attempt; `None` on success and on the
    /// final failed attempt.
    pub backoff: Option<Duration>,
}

impl OperationOutcome {
    pub fn duration_ms(&self) -> f64 {
        self.duration.as_secs_f64() * 1000.0
    }

    pub fn is_final_failure(&self) -> bool {
        !self.succeeded && self.backoff.is_none()
    }
}
