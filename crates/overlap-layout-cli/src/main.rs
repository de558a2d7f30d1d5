//! `daylayout` CLI — pack calendar events into day-view columns and pixel
//! geometry from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Column assignments for events on their own day (stdin → stdout)
//! echo '[{"start":"2026-03-01T10:00:00Z","end":"2026-03-01T11:00:00Z","title":"Sync"}]' \
//!   | daylayout pack
//!
//! # Full layout for a given day and container, with wrapped titles
//! daylayout layout -i events.json --date 2026-03-01 --width 400 --height 1200 --wrap
//!
//! # Explicit window in epoch milliseconds
//! daylayout layout -i events.json --window-start 1772323200000 --window-end 1772409599999
//!
//! # Debug logging to stderr
//! daylayout -v layout -i events.json
//! ```

mod config;
mod input;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use overlap_layout::{DisplayWindow, Event, Packing, TimeSpan};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::input::{parse_events, InstantInput};

#[derive(Parser)]
#[command(
    name = "daylayout",
    version,
    about = "Day-view column layout for overlapping calendar events"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file merged over the default config location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign each event a column index and column count
    Pack {
        /// Input events JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Compute rectangles and hour dividers inside a container
    Layout {
        /// Input events JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[command(flatten)]
        window: WindowArgs,
        #[command(flatten)]
        container: ContainerArgs,
        /// Include wrapped title lines for each rectangle
        #[arg(long)]
        wrap: bool,
    },
}

#[derive(Args)]
struct WindowArgs {
    /// Day to display (YYYY-MM-DD); defaults to the day of the earliest event
    #[arg(long, conflicts_with_all = ["window_start", "window_end"])]
    date: Option<NaiveDate>,
    /// Window start (epoch ms or ISO 8601)
    #[arg(long, requires = "window_end")]
    window_start: Option<String>,
    /// Window end (epoch ms or ISO 8601)
    #[arg(long, requires = "window_start")]
    window_end: Option<String>,
    /// IANA timezone for the day window and divider alignment
    #[arg(long)]
    timezone: Option<String>,
}

#[derive(Args)]
struct ContainerArgs {
    #[arg(long)]
    left: Option<f64>,
    #[arg(long)]
    top: Option<f64>,
    #[arg(long)]
    width: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
    #[arg(long)]
    padding: Option<f64>,
    /// Line height for --wrap
    #[arg(long)]
    text_size: Option<f64>,
    /// Character width for --wrap
    #[arg(long)]
    char_width: Option<f64>,
}

// ---------------------------------------------------------------------------
// Output DTOs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct PackOutput {
    window: DisplayWindow,
    span: Option<TimeSpan>,
    max_columns: u32,
    assignments: Vec<AssignmentDto>,
}

#[derive(Serialize)]
struct AssignmentDto {
    title: String,
    start_ms: i64,
    end_ms: i64,
    column_index: u32,
    column_count: u32,
}

#[derive(Serialize)]
struct LayoutOutput {
    rects: Vec<RectDto>,
    dividers: Vec<f64>,
}

#[derive(Serialize)]
struct RectDto {
    title: String,
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
    column_index: u32,
    column_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    lines: Option<Vec<LineDto>>,
}

#[derive(Serialize)]
struct LineDto {
    text: String,
    x: f64,
    y: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut settings =
        Settings::load_from(cli.config.as_deref()).context("Failed to load configuration")?;
    tracing::debug!(?settings, "loaded configuration");

    match cli.command {
        Commands::Pack {
            input,
            output,
            window,
        } => {
            if let Some(tz) = &window.timezone {
                settings.timezone = tz.clone();
            }
            let events = parse_events(&read_input(input.as_deref())?)?;
            let display = resolve_window(&window, &events, settings.zone()?)?;

            let packing =
                overlap_layout::pack(&events, &display).context("Failed to pack events")?;
            let out = pack_output(&events, display, &packing);

            write_output(output.as_deref(), &serde_json::to_string_pretty(&out)?)?;
        }
        Commands::Layout {
            input,
            output,
            window,
            container,
            wrap,
        } => {
            if let Some(tz) = &window.timezone {
                settings.timezone = tz.clone();
            }
            apply_container_args(&mut settings, &container);

            let events = parse_events(&read_input(input.as_deref())?)?;
            let display = resolve_window(&window, &events, settings.zone()?)?;
            let options = settings.layout_options()?;

            let layout = overlap_layout::compute_layout(
                &events,
                &display,
                &settings.container(),
                &options,
            )
            .context("Failed to lay out events")?;

            let metrics = settings.metrics();
            let rects = layout
                .rects
                .iter()
                .map(|r| RectDto {
                    title: r.event.title().to_string(),
                    left: r.rect.left,
                    top: r.rect.top,
                    right: r.rect.right,
                    bottom: r.rect.bottom,
                    column_index: r.column_index,
                    column_count: r.column_count,
                    lines: wrap.then(|| {
                        r.title_lines(&metrics, options.padding)
                            .map(|line| LineDto {
                                text: line.text.to_string(),
                                x: line.x,
                                y: line.y,
                            })
                            .collect()
                    }),
                })
                .collect();
            let out = LayoutOutput {
                rects,
                dividers: layout.dividers,
            };

            write_output(output.as_deref(), &serde_json::to_string_pretty(&out)?)?;
        }
    }

    Ok(())
}

fn pack_output(events: &[Event], window: DisplayWindow, packing: &Packing) -> PackOutput {
    PackOutput {
        window,
        span: packing.span,
        max_columns: packing.max_columns,
        assignments: packing
            .assignments
            .iter()
            .map(|a| AssignmentDto {
                title: events[a.event_index].title().to_string(),
                start_ms: a.interval.start_ms,
                end_ms: a.interval.end_ms,
                column_index: a.column_index,
                column_count: a.column_count,
            })
            .collect(),
    }
}

fn apply_container_args(settings: &mut Settings, args: &ContainerArgs) {
    let overrides = [
        (&mut settings.left, args.left),
        (&mut settings.top, args.top),
        (&mut settings.width, args.width),
        (&mut settings.height, args.height),
        (&mut settings.padding, args.padding),
        (&mut settings.text_size, args.text_size),
        (&mut settings.char_width, args.char_width),
    ];
    for (field, value) in overrides {
        if let Some(value) = value {
            *field = value;
        }
    }
}

/// Work out the display window from the flags.
///
/// - `--window-start`/`--window-end` give it directly
/// - `--date` selects that whole day in `zone`
/// - otherwise the day of the earliest event in `zone`, or today when there
///   are no events
fn resolve_window(args: &WindowArgs, events: &[Event], zone: Tz) -> Result<DisplayWindow> {
    if let (Some(start), Some(end)) = (&args.window_start, &args.window_end) {
        let start = input::resolve_instant(&instant_arg(start))?;
        let end = input::resolve_instant(&instant_arg(end))?;
        return DisplayWindow::new(start, end).context("Invalid display window");
    }

    let date = match args.date {
        Some(date) => date,
        None => match events.iter().map(Event::start_ms).min() {
            Some(earliest) => {
                let Some(utc) = chrono::DateTime::from_timestamp_millis(earliest) else {
                    bail!("Event start {} is out of range", earliest);
                };
                utc.with_timezone(&zone).date_naive()
            }
            None => Utc::now().with_timezone(&zone).date_naive(),
        },
    };
    tracing::debug!(%date, %zone, "using day window");
    Ok(DisplayWindow::for_day(date, zone))
}

/// Flags are strings; bare integers are epoch milliseconds.
fn instant_arg(raw: &str) -> InstantInput {
    match raw.parse::<i64>() {
        Ok(ms) => InstantInput::Millis(ms),
        Err(_) => InstantInput::Text(raw.to_string()),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
