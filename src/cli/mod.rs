//! Command-line parsing for the hospital dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the loading/aggregation code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::data::animation::DEFAULT_ANIMATION_URL;

pub mod picker;

pub const DEFAULT_DATA_PATH: &str = "trimmed_data.csv";
pub const DEFAULT_REPORT_PATH: &str = "report.pdf";
pub const DEFAULT_LOG_PATH: &str = "hdash.log";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "hdash", version, about = "Impact of Covid on hospitals: terminal dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard (the default).
    Tui(DashArgs),
    /// Print load stats, the selection, the daily/state tables and an ASCII chart.
    Summary(SummaryArgs),
    /// List the selectable metrics and the dataset's date range.
    Metrics(DashArgs),
    /// Write the computed view as JSON (and optionally the tables as CSV).
    Export(ExportArgs),
    /// Save a copy of the static PDF report.
    Report(ReportArgs),
}

/// Options shared by every command that loads the dataset.
#[derive(Debug, Args, Clone)]
pub struct DashArgs {
    /// Input CSV.
    #[arg(short = 'f', long = "data", value_name = "CSV", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Static PDF report offered for download.
    #[arg(long, value_name = "PDF", default_value = DEFAULT_REPORT_PATH)]
    pub report: PathBuf,

    /// First date of the range (YYYY-MM-DD, defaults to the earliest date).
    #[arg(long, value_name = "DATE", value_parser = parse_date_arg)]
    pub start: Option<NaiveDate>,

    /// Last date of the range (YYYY-MM-DD, defaults to the latest date).
    #[arg(long, value_name = "DATE", value_parser = parse_date_arg)]
    pub end: Option<NaiveDate>,

    /// Metric to chart, by column or display name.
    #[arg(short = 'm', long, value_name = "NAME")]
    pub metric: Option<String>,

    /// Lottie asset played in the header.
    #[arg(long, value_name = "URL", env = "HDASH_ANIMATION_URL", default_value = DEFAULT_ANIMATION_URL)]
    pub animation_url: String,

    /// Skip fetching the header animation.
    #[arg(long)]
    pub no_animation: bool,

    /// Log file used while the dashboard owns the terminal.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_PATH)]
    pub log_file: PathBuf,
}

/// Options for the text summary.
#[derive(Debug, Args, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub dash: DashArgs,

    /// Disable the ASCII chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Show at most this many daily rows (first and last halves).
    #[arg(long, default_value_t = 20)]
    pub max_days: usize,
}

/// Options for exporting the view.
#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub dash: DashArgs,

    /// Dashboard view (selection, aggregates, chart frames) as JSON.
    #[arg(long, value_name = "JSON")]
    pub json: PathBuf,

    /// Daily medians as CSV.
    #[arg(long = "daily-csv", value_name = "CSV")]
    pub daily_csv: Option<PathBuf>,

    /// Per-state medians and labels as CSV.
    #[arg(long = "states-csv", value_name = "CSV")]
    pub states_csv: Option<PathBuf>,
}

/// Options for saving the report.
#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    /// Report to copy.
    #[arg(long, value_name = "PDF", default_value = DEFAULT_REPORT_PATH)]
    pub report: PathBuf,

    /// Destination path.
    #[arg(long, value_name = "PATH")]
    pub out: PathBuf,
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    crate::io::ingest::parse_date(s).ok_or_else(|| format!("invalid date '{s}' (expected YYYY-MM-DD)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_summary_with_selection() {
        let cli = Cli::try_parse_from([
            "hdash", "summary", "-f", "d.csv", "--start", "2021-01-02", "--end", "2021-02-01",
            "-m", "deaths_covid", "--no-plot",
        ])
        .unwrap();
        let Command::Summary(args) = cli.command else {
            panic!("expected summary");
        };
        assert_eq!(args.dash.data, PathBuf::from("d.csv"));
        assert_eq!(args.dash.start, NaiveDate::from_ymd_opt(2021, 1, 2));
        assert_eq!(args.dash.metric.as_deref(), Some("deaths_covid"));
        assert!(args.no_plot);
    }

    #[test]
    fn defaults_and_bad_dates() {
        let cli = Cli::try_parse_from(["hdash", "tui"]).unwrap();
        let Command::Tui(args) = cli.command else {
            panic!("expected tui");
        };
        assert_eq!(args.data, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(args.report, PathBuf::from(DEFAULT_REPORT_PATH));
        assert!(args.start.is_none());

        assert!(Cli::try_parse_from(["hdash", "tui", "--start", "soon"]).is_err());
        assert!(Cli::try_parse_from(["hdash", "export"]).is_err());
    }
}
