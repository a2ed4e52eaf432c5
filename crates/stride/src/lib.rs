//! # stride
//!
//! Datetime, duration and period arithmetic with fixed calendar conventions.
//!
//! Durations carry their own granularity and convert with a fixed table (a month is
//! 30 days, a year is 365 days). Datetimes are absolute instants that accept durations,
//! parse strings on a best-effort basis, and render with strftime directives. Periods
//! step from one datetime towards another.
//!
//! ## Quick start
//!
//! ```rust
//! use stride::{days, hours, years, Datetime, DurationExt};
//!
//! let d = Datetime::parse("08/07/1987");
//! assert_eq!(d.to_string(), "08-07-1987 00:00:00");
//!
//! let later = d + days(1) + 1.hour();
//! assert_eq!(later.format("%F %T"), "1987-07-09 01:00:00");
//!
//! // Six months, two days and twelve hours: a year is 365 days, a month 30.
//! assert_eq!(years(0.5).to_string(), "6 months, 2 days, 12 hours");
//!
//! let day = Datetime::from_ymd(2024, 0, 1).until(Datetime::from_ymd(2024, 0, 2));
//! assert_eq!(day.every(hours(3)).unwrap().iter().count(), 8);
//! ```
//!
//! ## Modules
//!
//! - [`duration`] — `Duration`, `Unit`, and the `seconds` … `years` factories
//! - [`literals`] — `DurationExt` numeric shorthands (`1.day()`, `0.5.years()`)
//! - [`datetime`] — `Datetime` construction, arithmetic and formatting
//! - [`period`] — `Period` and stepped iteration
//! - [`format`] — `FormatTable` and strftime rendering
//! - [`parse`] — explicit-format and auto-detected parsing
//! - [`clock`] — injectable clock sources
//! - [`error`] — Error types

pub mod clock;
pub mod datetime;
pub mod duration;
pub mod error;
pub mod format;
pub mod literals;
pub mod parse;
pub mod period;

pub use clock::{Clock, FixedClock, SystemClock};
pub use datetime::{now, tomorrow, yesterday, Datetime};
pub use duration::{
    day, days, hour, hours, minute, minutes, month, months, second, seconds, year, years,
    Duration, Unit,
};
pub use error::StrideError;
pub use format::FormatTable;
pub use literals::DurationExt;
pub use period::{Every, EveryIter, Period};
