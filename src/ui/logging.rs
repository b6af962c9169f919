//! Logging utilities
//!
//! Logs go to a size-rotated file in the platform cache directory, since
//! the terminal belongs to the UI while folio runs.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use env_logger::{Builder, Target, fmt::TimestampPrecision};
use file_rotate::compression::Compression;
use file_rotate::suffix::AppendCount;
use file_rotate::{ContentLimit, FileRotate};
use log::LevelFilter;
use std::fs;
use std::path::PathBuf;

/// Size at which the log file is rotated.
const LOG_FILE_LIMIT: usize = 1024 * 1024;

/// Number of rotated log files kept next to the live one.
const LOG_FILES_KEPT: usize = 3;

/// Path of the live log file.
///
/// # Errors
///
/// Returns an error if the cache directory cannot be determined.
pub fn log_file_path() -> Result<PathBuf>
{
    let project_dirs = ProjectDirs::from("", "folio", "folio")
        .context("Failed to determine project directories")?;

    Ok(project_dirs.cache_dir().join("folio.log"))
}

/// Initializes the logging system for the application.
///
/// `Info` globally, `Debug` for folio itself; `RUST_LOG` overrides both.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or a logger is
/// already installed.
pub fn init_logging() -> Result<()>
{
    let log_path = log_file_path()?;

    if let Some(dir) = log_path.parent()
    {
        fs::create_dir_all(dir).context("Failed to create log directory")?;
    }

    let log_file = FileRotate::new(
        &log_path,
        AppendCount::new(LOG_FILES_KEPT),
        ContentLimit::Bytes(LOG_FILE_LIMIT),
        Compression::None,
        #[cfg(unix)]
        None,
    );

    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("folio", LevelFilter::Debug)
        .parse_default_env()
        .format_timestamp(Some(TimestampPrecision::Millis))
        .target(Target::Pipe(Box::new(log_file)))
        .try_init()
        .context("Failed to initialize logger")
}

/// Removes the live log file, if any.
///
/// # Errors
///
/// Returns an error if the log path cannot be determined or the file
/// cannot be removed.
pub fn clear_log_file() -> Result<()>
{
    let log_path = log_file_path()?;

    if log_path.exists()
    {
        fs::remove_file(&log_path)
            .with_context(|| format!("Failed to remove {}", log_path.display()))?;
    }

    Ok(())
}
