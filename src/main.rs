//! timegrid - Entry Point

use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use timegrid::config::ResolvedConfig;
use timegrid::model::CalendarEvent;
use timegrid::{AppError, CalendarEventAccessors};
use tracing::{debug, error, info};

/// Output format for the computed layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON records
    Json,
    /// Text rendering of the day column
    Preview,
}

/// timegrid - lay out overlapping calendar events in a day column
#[derive(Parser, Debug)]
#[command(name = "timegrid")]
#[command(version)]
#[command(about = "Compute overlap-aware styles for events in a calendar day column")]
pub struct Args {
    /// Path to a JSON or JSONL event file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Day to lay out (defaults to the day of the first event)
    #[arg(short, long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,

    /// Proximity threshold in minutes for grouping events that start close together
    #[arg(short = 'm', long, value_name = "MIN")]
    pub min_start_diff: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Preview width in columns
    #[arg(long, value_parser = clap::value_parser!(u16).range(8..))]
    pub width: Option<u16>,

    /// Preview height in rows
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub height: Option<u16>,
}

fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config_file = timegrid::config::load_config_with_precedence(args.config.clone())?;
    let merged = timegrid::config::merge_config(config_file)?;
    let with_env = timegrid::config::apply_env_overrides(merged);

    Ok(timegrid::config::apply_cli_overrides(
        with_env,
        args.min_start_diff,
        args.width,
        args.height,
    ))
}

/// Day to lay out: the explicit date, else the first event's day, else today.
fn select_day(explicit: Option<NaiveDate>, events: &[CalendarEvent]) -> NaiveDate {
    explicit
        .or_else(|| events.first().map(|event| event.start.date()))
        .unwrap_or_else(|| Local::now().date_naive())
}

fn run(args: Args) -> Result<(), AppError> {
    let config = resolve_config(&args)?;

    if let Err(e) = timegrid::logging::init(&config.log_file_path) {
        eprintln!("warning: logging disabled: {}", e);
    }

    info!(config = ?config, "Configuration loaded and resolved");

    let source = timegrid::source::detect_event_source(args.file.clone())?;
    let events = source.read_events()?;

    let day = select_day(args.date, &events);
    let metrics = config.slot_metrics(day)?;
    let minimum_start_difference = config.minimum_start_difference_ms(&metrics);

    let visible: Vec<CalendarEvent> = events
        .into_iter()
        .filter(|event| metrics.overlaps_column(event.start, event.end))
        .collect();

    debug!(
        day = %day,
        visible = visible.len(),
        minimum_start_difference,
        "Laying out column"
    );

    let styled = timegrid::compute_layout(
        &visible,
        minimum_start_difference,
        &metrics,
        &CalendarEventAccessors,
    )?;

    let output = match args.format {
        OutputFormat::Json => timegrid::view::render_json(&styled)?,
        OutputFormat::Preview => timegrid::view::render_preview(
            &styled,
            &metrics.slot_labels(),
            config.preview_width,
            config.preview_height,
        ),
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output)?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "timegrid failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
