//! Logging setup.
//!
//! Installs a global tracing subscriber writing to `$FATIGUE_HOME/logs`.
//! The TUI owns the terminal, so by default nothing is written to it;
//! scripted commands can mirror logs to stderr.

use std::fs;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::config::paths;

/// Environment variable holding the log filter (e.g. `debug`, `fatigue_core=trace`).
pub const LOG_FILTER_ENV: &str = "FATIGUE_LOG";

const LOG_FILE_NAME: &str = "fatigue.log";
const DEFAULT_FILTER: &str = "info";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Where log lines go besides the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Log file only.
    File,
    /// Log file, plus stderr when `FATIGUE_LOG` is set explicitly.
    FileAndStderr,
}

/// Initializes tracing. Subsequent calls are no-ops.
///
/// Failures are returned so callers can continue without logging.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn init(output: LogOutput) -> Result<()> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    let log_dir = paths::logs_dir();
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::never(&log_dir, LOG_FILE_NAME));
    let file_layer = fmt::layer().with_ansi(false).with_writer(file_writer);

    let explicit_filter = std::env::var(LOG_FILTER_ENV).ok();
    let stderr_layer = (output == LogOutput::FileAndStderr && explicit_filter.is_some())
        .then(|| fmt::layer().with_writer(std::io::stderr));

    let filter = explicit_filter
        .as_deref()
        .and_then(|f| EnvFilter::try_new(f).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = Registry::default()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer);
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install global tracing subscriber")?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!(
        "Logging initialized; log file at {}",
        log_dir.join(LOG_FILE_NAME).display()
    );
    Ok(())
}
