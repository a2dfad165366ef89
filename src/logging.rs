//! Tracing subscriber setup.
//!
//! Stdout carries the interview, so diagnostics only ever go to stderr and,
//! when `logging.file` is enabled, to rolling JSON files. `RUST_LOG` takes
//! precedence over the configured level.

use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Daily files kept before the oldest is removed.
const RETAINED_LOG_FILES: usize = 7;

/// Keeps the background file writer alive; drop it last.
pub struct LoggingGuard {
    _writer: WorkerGuard,
}

impl std::fmt::Debug for LoggingGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingGuard").finish_non_exhaustive()
    }
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the subscriber `settings` asks for.
///
/// Returns a guard only when file output is enabled.
///
/// # Errors
///
/// See [`init_file`].
pub fn init(settings: &LoggingConfig, logs_dir: &Path) -> anyhow::Result<Option<LoggingGuard>> {
    if settings.file {
        init_file(logs_dir, &settings.level).map(Some)
    } else {
        init_cli(&settings.level);
        Ok(None)
    }
}

/// Log to stderr and to `{logs_dir}/talentscout.YYYY-MM-DD.log` as JSON
/// lines, keeping the last week of files.
///
/// # Errors
///
/// Returns an error if the directory or appender cannot be created, or a
/// global subscriber is already installed.
pub fn init_file(logs_dir: &Path, level: &str) -> anyhow::Result<LoggingGuard> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("failed to create logs directory {}", logs_dir.display()))?;

    let appender = Builder::new()
        .rotation(Rotation::DAILY)
        .filename_prefix("talentscout")
        .filename_suffix("log")
        .max_log_files(RETAINED_LOG_FILES)
        .build(logs_dir)
        .context("failed to open rolling log file")?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter(level))
        .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("failed to install log subscriber")?;

    Ok(LoggingGuard { _writer: guard })
}

/// Log to stderr only. Later calls leave the first subscriber in place.
pub fn init_cli(level: &str) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
    if installed.is_err() {
        tracing::trace!("log subscriber already installed");
    }
}
