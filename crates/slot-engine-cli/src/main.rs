//! `slots` CLI — compute free slots and split multi-day events from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Free slots for one day (events as a JSON array on stdin)
//! cat events.json | slots free --from 2024-01-01
//!
//! # Free slots over several days in a given timezone, as background markers
//! slots free --from 2024-01-01 --to 2024-01-07 --tz Europe/Berlin --markers -i events.json
//!
//! # First free slot of at least 45 minutes
//! slots free --from 2024-01-01 --min-minutes 45 -i events.json
//!
//! # Split multi-day events into single-day fragments
//! slots split -i events.json -o fragments.json
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Calendar free-slot computation and multi-day event splitting"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML configuration file (defaults to ./slots.toml if present)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log what the engine does to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute free slots between the first and last day of a range
    Free {
        /// First day of the range (YYYY-MM-DD or an ISO 8601 datetime)
        #[arg(long)]
        from: String,
        /// Last day of the range (defaults to --from)
        #[arg(long)]
        to: Option<String>,
        /// Input file with a JSON array of busy events (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// IANA timezone whose midnights delimit days (overrides the config file)
        #[arg(long)]
        tz: Option<String>,
        /// Emit background markers instead of plain intervals
        #[arg(long)]
        markers: bool,
        /// Only print the first slot lasting at least this many minutes
        #[arg(long)]
        min_minutes: Option<i64>,
    },
    /// Split events that span several days into single-day fragments
    Split {
        /// Input file with a JSON event or array of events (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// IANA timezone whose midnights delimit days (overrides the config file)
        #[arg(long)]
        tz: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Free {
            from,
            to,
            input,
            output,
            tz,
            markers,
            min_minutes,
        } => {
            let tz = config.timezone(tz.as_deref())?;
            let range_start = parse_bound(&from, &tz)?;
            let range_end = parse_bound(to.as_deref().unwrap_or(&from), &tz)?;
            let busy = read_events(input.as_deref())?;

            let rendered = if let Some(minutes) = min_minutes {
                let min_duration = Duration::try_minutes(minutes)
                    .with_context(|| format!("--min-minutes out of range: {}", minutes))?;
                let slot = slot_engine::first_free_slot(
                    range_start,
                    range_end,
                    &busy,
                    min_duration,
                    &tz,
                )
                .context("Failed to compute free slots")?;
                match slot {
                    Some(slot) if markers => to_json(&config.marker.mark(&slot))?,
                    Some(slot) => to_json(&slot)?,
                    None => to_json(&None::<()>)?,
                }
            } else if markers {
                let slots = slot_engine::free_slot_markers(
                    range_start,
                    range_end,
                    &busy,
                    &tz,
                    &config.marker,
                )
                .context("Failed to compute free slots")?;
                to_json(&slots)?
            } else {
                let slots = slot_engine::free_slots(range_start, range_end, &busy, &tz)
                    .context("Failed to compute free slots")?;
                to_json(&slots)?
            };

            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Split { input, output, tz } => {
            let tz = config.timezone(tz.as_deref())?;
            let events = read_events(input.as_deref())?;
            let fragments =
                slot_engine::split_all(&events, &tz).context("Failed to split events")?;
            tracing::info!(
                events = events.len(),
                fragments = fragments.len(),
                "split events"
            );
            write_output(output.as_deref(), &to_json(&fragments)?)?;
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `RUST_LOG` wins; otherwise `warn`, or `debug`
/// with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn parse_bound(raw: &str, tz: &Tz) -> Result<DateTime<Utc>> {
    slot_engine::json::parse_range_bound(raw, tz)
        .with_context(|| format!("Invalid range bound: {}", raw))
}

fn read_events(path: Option<&str>) -> Result<Vec<slot_engine::JsonEvent>> {
    let json = read_input(path)?;
    slot_engine::events_from_json(&json).context("Failed to parse events")
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
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
            print!("{}", content);
        }
    }
    Ok(())
}
