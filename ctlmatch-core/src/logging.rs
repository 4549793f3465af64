//! Structured logging using **tracing**.
//!
//! The core emits `tracing` events with structured fields (row numbers,
//! evidence counts, set sizes). The JSON subscriber keeps them
//! machine-readable and on stderr, so stdout carries only the report.

use crate::report::InputDigest;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Installs the global JSON subscriber on stderr.
///
/// Filtering follows `RUST_LOG` (e.g. `RUST_LOG=ctlmatch_core=debug`) and
/// defaults to `warn`. Returns `false` if a subscriber was already set.
pub fn init_structured_logging() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_target(true)
        .with_current_span(true)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

pub fn log_warn(message: &str) {
    warn!(detail = %message);
}

pub fn log_info(message: &str) {
    info!(detail = %message);
}

pub fn log_error(message: &str) {
    error!(detail = %message);
}

/// Logs a named event; `error` and `warn` pick their level, anything else is info.
pub fn log_event(event: &str, detail: &str) {
    match event.to_ascii_lowercase().as_str() {
        "error" => error!(event = %event, detail = %detail),
        "warn" | "warning" => warn!(event = %event, detail = %detail),
        _ => info!(event = %event, detail = %detail),
    }
}

/// Records which input files a run used, one event per file.
pub fn log_inputs(inputs: &[InputDigest]) {
    for input in inputs {
        info!(
            role = input.role,
            path = %input.path,
            sha256 = %input.sha256,
            "input fingerprint"
        );
    }
}
