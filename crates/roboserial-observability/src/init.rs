// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Console output always; with `file-logging`, JSON files in a timestamped run
//! folder with run-count retention.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;

/// Runs kept when no retention is given
pub const DEFAULT_RETENTION_RUNS: usize = 10;

/// Logging initialization result
///
/// Hold on to it for the lifetime of the program: dropping it flushes and
/// stops the file writers.
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder receiving file logs, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Build the `EnvFilter` for the given flags and default level
pub fn build_filter(debug_flags: &CrateDebugFlags, default_level: &str) -> Result<EnvFilter> {
    let filter = debug_flags.to_filter_string(default_level);
    EnvFilter::try_new(&filter).with_context(|| format!("Invalid log filter: {}", filter))
}

/// Initialize logging with console output and optional file output
///
/// With `file-logging` and a `log_dir`, creates:
/// ```text
/// <log_dir>/
///   └── run_20250101_120000/
///       ├── roboserial-hal.log
///       ├── roboserial-config.log
///       └── roboserial.log (combined)
/// ```
///
/// # Arguments
/// * `debug_flags` - Per-crate debug flags for filtering
/// * `default_level` - Level applied to everything not raised by a flag
/// * `log_dir` - Base directory for file logs (ignored without `file-logging`)
/// * `retention_runs` - Keep N most recent runs (default: 10)
pub fn init_logging(
    debug_flags: &CrateDebugFlags,
    default_level: &str,
    log_dir: Option<PathBuf>,
    retention_runs: Option<usize>,
) -> Result<LoggingGuard> {
    let env_filter = build_filter(debug_flags, default_level)?;

    let mut layers = Vec::new();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_filter(env_filter);
    layers.push(console_layer.boxed());

    #[cfg(feature = "file-logging")]
    let mut file_guards = Vec::new();

    #[cfg(feature = "file-logging")]
    let run_folder = match log_dir {
        Some(base_log_dir) => {
            let run_folder = create_run_folder(&base_log_dir)?;
            cleanup_old_logs(
                &base_log_dir,
                retention_runs.unwrap_or(DEFAULT_RETENTION_RUNS),
            )?;

            for crate_name in crate::KNOWN_CRATES {
                let file_appender =
                    tracing_appender::rolling::never(&run_folder, format!("{}.log", crate_name));
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                file_guards.push(guard);

                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_filter(EnvFilter::new(format!(
                        "{}=trace",
                        crate::crate_target(crate_name)
                    )))
                    .boxed();
                layers.push(file_layer);
            }

            let combined_appender = tracing_appender::rolling::never(&run_folder, "roboserial.log");
            let (combined_non_blocking, combined_guard) =
                tracing_appender::non_blocking(combined_appender);
            file_guards.push(combined_guard);

            let combined_layer = tracing_subscriber::fmt::layer()
                .with_writer(combined_non_blocking)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_filter(build_filter(debug_flags, default_level)?)
                .boxed();
            layers.push(combined_layer);

            Some(run_folder)
        }
        None => None,
    };

    #[cfg(not(feature = "file-logging"))]
    let run_folder = {
        let _ = retention_runs;
        if let Some(dir) = log_dir {
            eprintln!(
                "Warning: file logging to {} requested but the file-logging feature is disabled",
                dir.display()
            );
        }
        None
    };

    Registry::default()
        .with(layers)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guards: file_guards,
        log_dir: run_folder,
    })
}

#[cfg(feature = "file-logging")]
const RUN_FOLDER_FORMAT: &str = "%Y%m%d_%H%M%S";

#[cfg(feature = "file-logging")]
fn create_run_folder(base_log_dir: &Path) -> Result<PathBuf> {
    let timestamp = chrono::Utc::now().format(RUN_FOLDER_FORMAT);
    let run_folder = base_log_dir.join(format!("run_{}", timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;
    Ok(run_folder)
}

/// Remove the oldest run folders so at most `retention_runs` remain
#[cfg(feature = "file-logging")]
fn cleanup_old_logs(base_log_dir: &Path, retention_runs: usize) -> Result<()> {
    use chrono::NaiveDateTime;

    if !base_log_dir.exists() {
        return Ok(());
    }

    let mut runs: Vec<(PathBuf, NaiveDateTime)> = Vec::new();
    for entry in std::fs::read_dir(base_log_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let stamp = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix("run_"))
            .and_then(|s| NaiveDateTime::parse_from_str(s, RUN_FOLDER_FORMAT).ok());
        if let Some(stamp) = stamp {
            runs.push((path, stamp));
        }
    }

    if runs.len() <= retention_runs {
        return Ok(());
    }

    // Oldest first
    runs.sort_by_key(|(_, stamp)| *stamp);
    let to_remove = runs.len() - retention_runs;
    for (path, _) in runs.iter().take(to_remove) {
        if let Err(e) = std::fs::remove_dir_all(path) {
            eprintln!(
                "Warning: Failed to remove old log directory {}: {}",
                path.display(),
                e
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_flags() {
        let mut flags = CrateDebugFlags::from_args(vec!["--debug-roboserial-hal".to_string()]);
        flags.enable_trace("roboserial_hal::monitor");
        assert!(build_filter(&flags, "warn").is_ok());
    }

    #[cfg(feature = "file-logging")]
    #[test]
    fn test_cleanup_keeps_most_recent_runs() {
        let dir = tempfile::tempdir().unwrap();
        for stamp in ["20240101_000000", "20240102_000000", "20240103_000000"] {
            std::fs::create_dir_all(dir.path().join(format!("run_{}", stamp))).unwrap();
        }
        std::fs::create_dir_all(dir.path().join("unrelated")).unwrap();

        cleanup_old_logs(dir.path(), 2).unwrap();

        assert!(!dir.path().join("run_20240101_000000").exists());
        assert!(dir.path().join("run_20240102_000000").exists());
        assert!(dir.path().join("run_20240103_000000").exists());
        assert!(dir.path().join("unrelated").exists());
    }
}
