use crate::models::OperationOutcome;
use chrono::{Local, SecondsFormat};
use tracing::{info, warn};

/// Receives one outcome per attempt made by the retry envelope.
pub trait OutcomeSink: Send + Sync {
    fn record(&self, outcome: &OperationOutcome);
}

/// Default sink: one structured `tracing` event per attempt.
///
/// Successes go out at INFO, failures at WARN, all on the
/// `rtimeclock::access` target. Timestamps are RFC 3339 with offset.
/// A failure with `exhausted = true` is the last attempt of its call.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl OutcomeSink for TracingSink {
    fn record(&self, outcome: &OperationOutcome) {
        let logged_at = Local::now().to_rfc3339_opts(SecondsFormat::Millis, false);
        let started_at = outcome
            .started_at
            .to_rfc3339_opts(SecondsFormat::Millis, false);
        let finished_at = outcome
            .finished_at
            .to_rfc3339_opts(SecondsFormat::Millis, false);

        if outcome.succeeded {
            info!(
                target: "rtimeclock::access",
                operation = outcome.operation,
                attempt = outcome.attempt,
                max_attempts = outcome.max_attempts,
                logged_at = %logged_at,
                started_at = %started_at,
                finished_at = %finished_at,
                duration_ms = outcome.duration_ms(),
                succeeded = true,
                "Success"
            );
        } else {
            warn!(
                target: "rtimeclock::access",
                operation = outcome.operation,
                attempt = outcome.attempt,
                max_attempts = outcome.max_attempts,
                logged_at = %logged_at,
                started_at = %started_at,
                finished_at = %finished_at,
                duration_ms = outcome.duration_ms(),
                succeeded = false,
                exhausted = outcome.is_final_failure(),
                error = outcome.error_detail.as_deref().unwrap_or(""),
                "Failure"
            );
        }
    }
}
