use std::env;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::{LOG_ENV, LogSettings};
use crate::error::AppError;

/// Name of the log file inside the log directory
pub const LOG_FILE: &str = "duotype.log";

/// Picks the filter for this run, or `None` if logging is off
///
/// `DUOTYPE_LOG` always wins and turns logging on by itself.
pub fn filter_directives(settings: &LogSettings, env_value: Option<String>) -> Option<String> {
    env_value
        .filter(|value| !value.trim().is_empty())
        .or_else(|| settings.enabled.then(|| settings.filter.clone()))
}

/// Install the global subscriber, writing to a file in `directory`
///
/// The terminal belongs to the UI, so nothing is ever logged to stdout or stderr. Keep the
/// returned guard alive until exit, or buffered lines are lost.
pub fn init(settings: &LogSettings, directory: &Path) -> Result<Option<WorkerGuard>, AppError> {
    let Some(directives) = filter_directives(settings, env::var(LOG_ENV).ok()) else {
        return Ok(None);
    };

    let file_appender = tracing_appender::rolling::never(directory, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .with(EnvFilter::new(directives))
        .try_init()?;

    tracing::info!(directory = %directory.display(), "logging started");
    Ok(Some(guard))
}
