//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - runs the load -> filter -> aggregate pipeline
//! - prints reports/plots or hands over to the TUI
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, DashArgs, ExportArgs, ReportArgs, SummaryArgs};
use crate::config::DashboardConfig;
use crate::error::AppError;
use crate::logging::LogTarget;

pub mod pipeline;

/// Entry point for the `hdash` binary.
pub fn run() -> Result<(), AppError> {
    // Environment overrides (e.g. HDASH_ANIMATION_URL) must be visible to clap.
    dotenvy::dotenv().ok();

    // `hdash` and `hdash -m deaths_covid` behave like `hdash tui ...`.
    //
    // Clap requires a subcommand name, so we rewrite argv before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Summary(args) => handle_summary(args),
        Command::Metrics(args) => handle_metrics(args),
        Command::Export(args) => handle_export(args),
        Command::Report(args) => handle_report(args),
    }
}

fn handle_tui(args: DashArgs) -> Result<(), AppError> {
    let config = prepare_tui(&args)?;
    crate::tui::run(config)
}

/// Logging goes to the file first so the picker fallback is recorded too.
fn prepare_tui(args: &DashArgs) -> Result<DashboardConfig, AppError> {
    crate::logging::init(&LogTarget::File(args.log_file.clone()))?;
    DashboardConfig::from_args(args)
}

fn handle_summary(args: SummaryArgs) -> Result<(), AppError> {
    crate::logging::init(&LogTarget::Stderr)?;
    let config = DashboardConfig::from_args(&args.dash)?;
    let (loaded, view) = pipeline::run(
        &config.data_path,
        config.start,
        config.end,
        config.metric.as_deref(),
    )?;

    println!("{}", crate::report::format_load_summary(&config.data_path, &loaded));
    println!("{}", crate::report::format_selection(&view));

    if !args.no_plot {
        println!(
            "{}",
            crate::plot::render_line_chart(&view.line, args.width, args.height)
        );
    }

    println!("Daily medians:");
    println!("{}", crate::report::format_daily_table(&view.daily, Some(args.max_days)));
    println!("State medians:");
    print!("{}", crate::report::format_state_table(&view.states));

    Ok(())
}

fn handle_metrics(args: DashArgs) -> Result<(), AppError> {
    crate::logging::init(&LogTarget::Stderr)?;
    let config = DashboardConfig::from_args(&args)?;
    let loaded = crate::io::ingest::load(&config.data_path)?;
    print!("{}", crate::report::format_metrics(&loaded));
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    crate::logging::init(&LogTarget::Stderr)?;
    let config = DashboardConfig::from_args(&args.dash)?;
    let (_, view) = pipeline::run(
        &config.data_path,
        config.start,
        config.end,
        config.metric.as_deref(),
    )?;

    crate::io::export::write_view_json(&args.json, &view)?;
    println!("Wrote {}", args.json.display());

    if let Some(path) = &args.daily_csv {
        crate::io::export::write_daily_csv(path, &view.daily)?;
        println!("Wrote {}", path.display());
    }
    if let Some(path) = &args.states_csv {
        crate::io::export::write_states_csv(path, &view.states)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    crate::logging::init(&LogTarget::Stderr)?;
    let bytes = crate::io::download::save_report(&args.report, &args.out)?;
    println!("Saved {} ({bytes} bytes)", args.out.display());
    Ok(())
}

/// Rewrite argv so `hdash` defaults to `hdash tui`.
///
/// Rules:
/// - `hdash`                         -> `hdash tui`
/// - `hdash -m deaths_covid ...`     -> `hdash tui -m deaths_covid ...`
/// - `hdash --help/--version/-h`     -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "tui" | "summary" | "metrics" | "export" | "report"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
