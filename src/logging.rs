//! File logging setup
//!
//! The picker owns the terminal, so log output only ever goes to a daily
//! rolling file under the configured log directory.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "TWD_LOG";

const MAX_LOG_FILES: usize = 7;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open log file: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),

    #[error("Invalid log filter '{0}'")]
    Filter(String),

    #[error("Logging already initialized")]
    AlreadyInitialized,
}

/// Build the level filter from `TWD_LOG`, falling back to `default_level`
///
/// # Errors
///
/// Returns `LoggingError::Filter` if neither directive parses.
pub fn build_filter(default_level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|_| LoggingError::Filter(default_level.to_string()))
}

/// Install the global subscriber writing to `<dir>/twd.<date>.log`
///
/// # Errors
///
/// Returns `LoggingError` if the directory or log file cannot be created, the
/// filter is invalid, or a global subscriber is already set.
pub fn init(dir: &Path, default_level: &str) -> Result<(), LoggingError> {
    std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("twd")
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(dir)?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(default_level)?)
        .with_writer(appender)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)
}
