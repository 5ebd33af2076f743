//! Diagnostic sink for non-fatal errors raised while building views.
//!
//! Components take an `ErrorLog` instead of writing to a global stream, so the
//! events they emit can be asserted on directly.

use std::fmt;

pub trait ErrorLog: Send + Sync {
    fn log_error(&self, message: &str, details: &[&dyn fmt::Display]);
}

/// Production sink: forwards every event to `tracing` at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl ErrorLog for TracingLog {
    fn log_error(&self, message: &str, details: &[&dyn fmt::Display]) {
        let details = details
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        tracing::error!(details = %details, "{message}");
    }
}
