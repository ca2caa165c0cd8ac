use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, AppResult};

pub const LOG_ENV: &str = "PDFDROP_LOG";

pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("pdfdrop.log")
}

/// Routes `tracing` output to a file; the terminal belongs to the UI.
pub fn init_logging(path: &Path) -> AppResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| {
            AppError::io_with_context(source, format!("failed to open log file {}", path.display()))
        })?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| AppError::unsupported(format!("logging already initialized: {err}")))
}
