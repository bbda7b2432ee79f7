//! Tracing subscriber for the CLI
//!
//! stdout carries the layout document, so console logs go to stderr. File
//! logs are appended to one date-stamped file per day through a non-blocking
//! writer.

use anyhow::{Context, Result};
use playa_core::logging::LogConfig;
use std::fs::{File, OpenOptions};
use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

/// Keeps the file writer thread alive; drop it last so buffered lines flush
pub struct LogGuard {
    _guard: WorkerGuard,
}

/// Install the global subscriber described by `config`.
///
/// `RUST_LOG` overrides the configured level. Returns a guard only when file
/// output is enabled.
pub fn init(config: &LogConfig) -> Result<Option<LogGuard>> {
    let filter = EnvFilter::builder()
        .with_default_directive(config.parse_level().into())
        .from_env_lossy();

    let stderr_layer = config.console_output.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(filter.clone())
    });

    let (file_writer, guard) = match open_log_writer(config)? {
        Some((writer, guard)) => (Some(writer), Some(LogGuard { _guard: guard })),
        None => (None, None),
    };
    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_filter(filter)
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::debug!("Log level {}", config.level);
    if config.file_output {
        tracing::info!("Logging to {:?}", config.current_log_path());
    }

    Ok(guard)
}

/// Prepare the log directory, prune old files and open today's log.
fn open_log_writer(config: &LogConfig) -> Result<Option<(NonBlocking, WorkerGuard)>> {
    if !config.file_output {
        return Ok(None);
    }

    config
        .ensure_log_directory()
        .with_context(|| format!("Failed to create log directory {:?}", config.log_directory))?;

    // No subscriber yet, so this can only go to stderr.
    if let Err(e) = config.cleanup_old_logs() {
        eprintln!("Warning: could not prune old log files: {}", e);
    }

    let file = append_to(&config.current_log_path())?;
    Ok(Some(tracing_appender::non_blocking(file)))
}

fn append_to(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_writer_without_file_output() {
        let config = LogConfig {
            file_output: false,
            ..Default::default()
        };
        assert!(open_log_writer(&config).unwrap().is_none());
    }

    #[test]
    fn test_writer_creates_nested_log_directory() {
        let dir = TempDir::new().unwrap();
        let config = LogConfig {
            file_output: true,
            log_directory: dir.path().join("nested").join("logs"),
            ..Default::default()
        };

        let writer = open_log_writer(&config).unwrap();
        assert!(writer.is_some());
        assert!(config.current_log_path().is_file());
    }
}
