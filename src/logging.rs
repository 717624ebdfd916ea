//! Tracing subscriber setup. Logs go to stderr so command output on stdout
//! stays machine-readable.

use crate::config::LogFormat;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber. `RUST_LOG` wins over the `info` default.
/// A second call (or a failure) only prints a warning.
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if let Err(e) = result {
        eprintln!("⚠️ Failed to initialize logging: {e}");
    }
}
