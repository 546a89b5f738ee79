//! schedulectl - inspect schedule windows from the command line
//!
//! Loads the schedule configuration and, for one record type:
//! - evaluates the window states of a record at an instant
//! - validates the record's start/end timestamps
//! - prints the filter descriptors a query layer would register

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use schedule_config::{Policy, load_config};
use schedule_core::{FieldErrors, MemoryRecord, ScheduleConfig, WindowState};
use schedule_util::{
    ScheduleError, default_config_path, format_timestamp, is_mock_time_active, parse_timestamp,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// schedulectl - Evaluate and validate schedule windows
#[derive(Parser, Debug)]
#[command(name = "schedulectl")]
#[command(about = "Evaluate and validate schedule windows", long_about = None)]
struct Args {
    /// Configuration file path (or set SCHEDULE_CONFIG env var)
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate and validate one record
    State {
        /// Record type, as named in the config
        #[arg(short, long)]
        record: String,

        /// Start timestamp (RFC 3339 or "YYYY-MM-DD HH:MM:SS", UTC)
        #[arg(long, value_parser = parse_instant)]
        start: Option<DateTime<Utc>>,

        /// End timestamp
        #[arg(long, value_parser = parse_instant)]
        end: Option<DateTime<Utc>>,

        /// Reference instant (default: now)
        #[arg(long, value_parser = parse_instant)]
        now: Option<DateTime<Utc>>,
    },

    /// Print the filter descriptors for a record type
    Filters {
        /// Record type, as named in the config
        #[arg(short, long)]
        record: String,
    },
}

/// Output of the `state` command
#[derive(Debug, Serialize)]
struct StateReport<'a> {
    record: &'a str,
    now: DateTime<Utc>,
    window: WindowState,
    /// States keyed by their derived names ("scheduled", "published", ...)
    states: BTreeMap<String, bool>,
    valid: bool,
    errors: FieldErrors,
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>, ScheduleError> {
    parse_timestamp(value)
}

/// Instant given on the command line, or the (possibly mocked) clock
fn reference_instant(given: Option<DateTime<Utc>>) -> DateTime<Utc> {
    if let Some(at) = given {
        return at;
    }
    let at = schedule_util::now();
    if is_mock_time_active() {
        info!(now = %format_timestamp(&at), "Using mock time as reference instant");
    } else {
        debug!(now = %format_timestamp(&at), "Using current time as reference instant");
    }
    at
}

/// Build a record holding the given start/end values
fn record_for(
    config: &ScheduleConfig,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> MemoryRecord {
    let mut record = MemoryRecord::new();
    record.set(config.start_field().as_str(), start);
    if let Some(end_field) = config.end_field() {
        record.set(end_field.as_str(), end);
    }
    record
}

fn state_report<'a>(
    record_type: &'a str,
    config: &ScheduleConfig,
    record: &mut MemoryRecord,
    now: DateTime<Utc>,
) -> StateReport<'a> {
    let states = config
        .state_kinds()
        .into_iter()
        .filter_map(|kind| {
            let name = config.state_name(kind)?;
            Some((name.to_string(), config.is(kind, &*record, now)))
        })
        .collect();

    let valid = record.valid(config);

    StateReport {
        record: record_type,
        now,
        window: config.snapshot(&*record, now),
        states,
        valid,
        errors: record.errors().clone(),
    }
}

fn run(args: &Args, policy: &Policy) -> Result<ExitCode> {
    match &args.command {
        Command::State {
            record,
            start,
            end,
            now,
        } => {
            let config = policy.require(record)?;
            if end.is_some() && config.end_field().is_none() {
                debug!(record = %record, "Ignoring --end: no end field configured");
            }

            let now = reference_instant(*now);
            let mut values = record_for(config, *start, *end);
            let report = state_report(record, config, &mut values, now);

            info!(
                record = %record,
                valid = report.valid,
                error_count = report.errors.len(),
                "Record evaluated"
            );

            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(if report.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
        Command::Filters { record } => {
            let config = policy.require(record)?;
            let filters = config.filters();
            debug!(record = %record, filter_count = filters.len(), "Filters generated");
            println!("{}", serde_json::to_string_pretty(&filters)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays machine-readable
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "schedulectl starting");

    let policy = load_config(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    run(&args, &policy)
}
