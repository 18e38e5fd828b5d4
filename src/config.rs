//! Resolved run configuration.
//!
//! clap gives us raw arguments; this module turns them into the values the
//! pipeline and the front-ends actually use (data path after the optional
//! picker, animation on/off, log destination).

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::cli::{picker, DashArgs, DEFAULT_DATA_PATH};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub report_path: PathBuf,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub metric: Option<String>,
    /// `None` when the header animation is disabled.
    pub animation_url: Option<String>,
    pub log_file: PathBuf,
}

impl DashboardConfig {
    /// Resolve arguments, prompting for a CSV when the default one is absent.
    pub fn from_args(args: &DashArgs) -> Result<Self, AppError> {
        let data_path = resolve_data_path(&args.data, std::io::stdin().is_terminal())?;
        Ok(Self::with_data_path(args, data_path))
    }

    fn with_data_path(args: &DashArgs, data_path: PathBuf) -> Self {
        let url = args.animation_url.trim();
        let animation_url = (!args.no_animation && !url.is_empty()).then(|| url.to_string());

        Self {
            data_path,
            report_path: args.report.clone(),
            start: args.start,
            end: args.end,
            metric: args.metric.clone(),
            animation_url,
            log_file: args.log_file.clone(),
        }
    }
}

/// Only the default path falls back to the picker; an explicit `-f` that does
/// not exist is left for the loader to report.
fn resolve_data_path(path: &Path, interactive: bool) -> Result<PathBuf, AppError> {
    if path.exists() || path != Path::new(DEFAULT_DATA_PATH) || !interactive {
        return Ok(path.to_path_buf());
    }
    tracing::info!(path = %path.display(), "default data file missing, prompting");
    picker::prompt_for_data_path()
}
