//! `stride` CLI — parse, format, shift and step through datetimes from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Current instant, default or custom format
//! stride now
//! stride now -f "%FT%T%z"
//!
//! # Best-effort parsing (falls back to the epoch), or strict
//! stride parse "08/07/1987"
//! stride parse "not-a-date" --strict
//! stride parse "08/07/1987 23:45:12" --input-format "%d/%m/%Y %H:%M:%S" -f %c
//!
//! # Arithmetic
//! stride add 2024-01-01 1d 12h
//! stride diff tomorrow now
//! stride convert 0.5y --to months
//!
//! # Stepping through a period
//! stride every 2024-01-01 2024-01-02 3h
//! stride every now tomorrow 1h --json
//!
//! # Override %c/%x/%X, the display pattern or the detection order
//! stride --formats formats.json now -f %c
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use stride::{days, Datetime, Duration, FormatTable, Unit};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "stride",
    version,
    about = "Datetime, duration and period arithmetic"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file overriding the format table (display, date_time, date, time, detect)
    #[arg(long, global = true)]
    formats: Option<String>,

    /// Log diagnostics (such as parse fallbacks) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current instant
    Now {
        /// strftime-style output format
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Print the current instant plus one day
    Tomorrow {
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Print the current instant minus one day
    Yesterday {
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Parse a datetime string and print it
    Parse {
        input: String,
        /// Explicit strftime-style input format (auto-detected if omitted)
        #[arg(long)]
        input_format: Option<String>,
        /// strftime-style output format
        #[arg(short, long)]
        format: Option<String>,
        /// Fail instead of falling back to the epoch
        #[arg(long)]
        strict: bool,
    },
    /// Add one or more durations to a datetime
    Add {
        datetime: String,
        #[arg(required = true)]
        durations: Vec<String>,
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Subtract one or more durations from a datetime
    Sub {
        datetime: String,
        #[arg(required = true)]
        durations: Vec<String>,
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Print END - START as a duration (seconds unless --unit is given)
    Diff {
        end: String,
        start: String,
        /// Unit to express the difference in (e.g. "hours", "d")
        #[arg(long)]
        unit: Option<String>,
    },
    /// Re-express a duration in another unit
    Convert {
        #[arg(allow_hyphen_values = true)]
        duration: String,
        /// Target unit (defaults to seconds)
        #[arg(long)]
        to: Option<String>,
    },
    /// List instants from START (inclusive) towards END (exclusive) by STEP
    Every {
        start: String,
        end: String,
        #[arg(allow_hyphen_values = true)]
        step: String,
        /// Print a JSON array of RFC 3339 strings
        #[arg(long)]
        json: bool,
        #[arg(short, long)]
        format: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let table = load_formats(cli.formats.as_deref())?;
    // One clock read per invocation, so `now` and `tomorrow` are exactly a day apart.
    let now = Datetime::now();

    match cli.command {
        Commands::Now { format } => {
            println!("{}", render(&table, now, format.as_deref())?);
        }
        Commands::Tomorrow { format } => {
            println!("{}", render(&table, now + days(1), format.as_deref())?);
        }
        Commands::Yesterday { format } => {
            println!("{}", render(&table, now - days(1), format.as_deref())?);
        }
        Commands::Parse {
            input,
            input_format,
            format,
            strict,
        } => {
            let parsed = match input_format.as_deref() {
                Some(fmt) => Datetime::try_parse_format_with(&table, &input, fmt),
                None => Datetime::try_parse_with(&table, &input),
            };
            let dt = if strict {
                parsed.with_context(|| format!("Failed to parse datetime: {}", input))?
            } else {
                parsed.unwrap_or_else(|e| {
                    debug!(error = %e, "falling back to epoch");
                    Datetime::EPOCH
                })
            };
            println!("{}", render(&table, dt, format.as_deref())?);
        }
        Commands::Add {
            datetime,
            durations,
            format,
        } => {
            let dt = resolve_datetime(&table, now, &datetime)?;
            let shift = sum_durations(&durations)?;
            let shifted = dt
                .checked_add(shift)
                .context("Result is outside the representable range")?;
            println!("{}", render(&table, shifted, format.as_deref())?);
        }
        Commands::Sub {
            datetime,
            durations,
            format,
        } => {
            let dt = resolve_datetime(&table, now, &datetime)?;
            let shift = sum_durations(&durations)?;
            let shifted = dt
                .checked_sub(shift)
                .context("Result is outside the representable range")?;
            println!("{}", render(&table, shifted, format.as_deref())?);
        }
        Commands::Diff { end, start, unit } => {
            let end = resolve_datetime(&table, now, &end)?;
            let start = resolve_datetime(&table, now, &start)?;
            let mut diff = end - start;
            if let Some(unit) = unit.as_deref() {
                diff = diff.to_unit(parse_unit(unit)?);
            }
            println!("{}", diff);
        }
        Commands::Convert { duration, to } => {
            let duration: Duration = duration
                .parse()
                .with_context(|| format!("Invalid duration: {}", duration))?;
            let unit = match to.as_deref() {
                Some(unit) => parse_unit(unit)?,
                None => Unit::Second,
            };
            let converted = duration.to_unit(unit);
            println!("{} {}", converted.amount(), converted.unit());
        }
        Commands::Every {
            start,
            end,
            step,
            json,
            format,
        } => {
            let start = resolve_datetime(&table, now, &start)?;
            let end = resolve_datetime(&table, now, &end)?;
            let step: Duration = step
                .parse()
                .with_context(|| format!("Invalid step: {}", step))?;
            let every = start
                .until(end)
                .every(step)
                .context("Cannot step through period")?;

            if json {
                let values: Vec<Datetime> = every.iter().collect();
                println!("{}", serde_json::to_string(&values)?);
            } else {
                for dt in &every {
                    println!("{}", render(&table, dt, format.as_deref())?);
                }
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_formats(path: Option<&str>) -> Result<FormatTable> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path))?;
            serde_json::from_str(&raw).with_context(|| format!("Invalid format table: {}", path))
        }
        None => Ok(FormatTable::default()),
    }
}

/// Accepts `now`, `tomorrow`, `yesterday`, or any string the format table can detect.
///
/// Unlike the library's lenient constructors, a CLI argument that cannot be parsed is
/// an error rather than the epoch.
fn resolve_datetime(table: &FormatTable, now: Datetime, input: &str) -> Result<Datetime> {
    match input {
        "now" => Ok(now),
        "tomorrow" => Ok(now + days(1)),
        "yesterday" => Ok(now - days(1)),
        other => Datetime::try_parse_with(table, other)
            .with_context(|| format!("Failed to parse datetime: {}", other)),
    }
}

/// Sum durations in the first one's unit.
fn sum_durations(inputs: &[String]) -> Result<Duration> {
    let mut total: Option<Duration> = None;
    for raw in inputs {
        let d: Duration = raw
            .parse()
            .with_context(|| format!("Invalid duration: {}", raw))?;
        total = Some(match total {
            Some(acc) => acc + d,
            None => d,
        });
    }
    total.context("At least one duration is required")
}

fn parse_unit(raw: &str) -> Result<Unit> {
    raw.parse::<Unit>().with_context(|| {
        format!(
            "Unknown unit: '{}'. Available units: seconds, minutes, hours, days, months, years",
            raw
        )
    })
}

fn render(table: &FormatTable, dt: Datetime, format: Option<&str>) -> Result<String> {
    let fmt = format.unwrap_or(&table.display);
    dt.format_with(table, fmt)
        .with_context(|| format!("Failed to format datetime with '{}'", fmt))
}
