//! Error types.
//!
//! - `AppError` is what the binary sees: a message plus a process exit code.
//! - The pipeline stages return their own `thiserror` enums so library callers
//!   (and tests) can match on the failure kind.
//!
//! Exit codes:
//! - 2: input/usage problems (data load, unknown metric, bad arguments)
//! - 3: the input has no usable rows
//! - 4: terminal/runtime failures
//! - 5: report download or export I/O

use std::path::PathBuf;

use thiserror::Error;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failure to turn the source CSV into a `Dataset`.
///
/// Always fatal for a run: no dashboard is rendered without valid data.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Failed to open data file '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: `{0}`")]
    MissingColumn(String),

    #[error("Line {line}: invalid date '{value}'")]
    InvalidDate { line: usize, value: String },

    #[error("Line {line}: invalid number '{value}' in column `{column}`")]
    InvalidNumber {
        line: usize,
        column: String,
        value: String,
    },

    #[error("No complete rows remain after dropping rows with missing values")]
    Empty,
}

/// A metric name that is not one of the known metric columns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown metric '{name}' (expected one of: {expected})")]
pub struct InvalidMetricError {
    pub name: String,
    pub expected: String,
}

/// Streaming the static PDF report failed.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Report file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read report '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report to '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writing a JSON/CSV export failed.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create export file '{}': {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write JSON export: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to flush export: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DataLoadError> for AppError {
    fn from(err: DataLoadError) -> Self {
        let code = match err {
            DataLoadError::Empty => 3,
            _ => 2,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<InvalidMetricError> for AppError {
    fn from(err: InvalidMetricError) -> Self {
        AppError::new(2, err.to_string())
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        AppError::new(5, err.to_string())
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::new(5, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_load_errors_map_to_exit_codes() {
        let app: AppError = DataLoadError::Empty.into();
        assert_eq!(app.exit_code(), 3);

        let app: AppError = DataLoadError::MissingColumn("state".to_string()).into();
        assert_eq!(app.exit_code(), 2);
        assert_eq!(app.to_string(), "Missing required column: `state`");
    }

    #[test]
    fn invalid_metric_message_lists_choices() {
        let err = InvalidMetricError {
            name: "icu_beds".to_string(),
            expected: "deaths_covid".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown metric 'icu_beds' (expected one of: deaths_covid)"
        );
        let app: AppError = err.into();
        assert_eq!(app.exit_code(), 2);
    }
}
