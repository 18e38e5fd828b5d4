//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins when set; otherwise this crate logs at `info`. The TUI owns
//! the terminal, so while it runs logs go to a file instead of stderr.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::AppError;

const DEFAULT_FILTER: &str = "hospital_dash=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(target: &LogTarget) -> Result<(), AppError> {
    let result = match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(env_filter())
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            tracing_subscriber::registry()
                .with(env_filter())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
    };

    if result.is_ok() {
        tracing::debug!(?target, "logging initialized");
    }
    Ok(())
}

fn open_log_file(path: &Path) -> Result<File, AppError> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::new(4, format!("Failed to open log file '{}': {e}", path.display())))
}
