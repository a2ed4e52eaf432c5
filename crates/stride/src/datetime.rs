//! Absolute instants with duration arithmetic, parsing and formatting.
//!
//! Instants are stored in UTC with nanosecond resolution. Strings without an offset
//! are read as UTC, and rendering is always in UTC.
//!
//! The lenient constructors ([`Datetime::parse`], [`Datetime::parse_format`],
//! [`Datetime::from_ymd_hms`]) never fail: input they cannot make sense of yields
//! [`Datetime::EPOCH`]. The `try_*` constructors and [`FromStr`] return the error
//! instead.

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::duration::{self, Duration};
use crate::error::{Result, StrideError};
use crate::format::{FormatTable, DEFAULT_DISPLAY};
use crate::parse;
use crate::period::Period;

/// An absolute point in time.
///
/// Serializes as an RFC 3339 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Datetime {
    instant: DateTime<Utc>,
}

impl Datetime {
    /// 1970-01-01 00:00:00 UTC. Also the fallback for unparseable input.
    pub const EPOCH: Datetime = Datetime {
        instant: DateTime::<Utc>::UNIX_EPOCH,
    };

    /// The earliest representable instant. `-` saturates here.
    pub const MIN: Datetime = Datetime {
        instant: DateTime::<Utc>::MIN_UTC,
    };

    /// The latest representable instant. `+` saturates here.
    pub const MAX: Datetime = Datetime {
        instant: DateTime::<Utc>::MAX_UTC,
    };

    /// The current instant from the system clock.
    pub fn now() -> Self {
        Datetime::now_with(&SystemClock)
    }

    pub fn now_with(clock: &impl Clock) -> Self {
        Datetime {
            instant: clock.now(),
        }
    }

    /// `now + 1 day` for a single read of `clock`.
    pub fn tomorrow_with(clock: &impl Clock) -> Self {
        Datetime::now_with(clock) + duration::days(1)
    }

    /// `now - 1 day` for a single read of `clock`.
    pub fn yesterday_with(clock: &impl Clock) -> Self {
        Datetime::now_with(clock) - duration::days(1)
    }

    /// Build from broken-down fields at midnight. `month0` is zero-based (0 = January).
    pub fn from_ymd(year: i32, month0: i32, day: i32) -> Self {
        Datetime::from_ymd_hms(year, month0, day, 0, 0, 0)
    }

    /// Build from broken-down fields. `month0` is zero-based (0 = January).
    ///
    /// Out-of-range fields carry into the next larger field, so `month0 = 12` is
    /// January of the following year and `day = 0` is the last day of the previous
    /// month. Results outside the representable range yield [`Datetime::EPOCH`].
    pub fn from_ymd_hms(
        year: i32,
        month0: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
    ) -> Self {
        match normalize_fields(year, month0, day, hour, minute, second) {
            Some(instant) => Datetime { instant },
            None => {
                debug!(
                    year,
                    month0,
                    day,
                    hour,
                    minute,
                    second,
                    "broken-down time out of range, using epoch"
                );
                Datetime::EPOCH
            }
        }
    }

    /// Seconds since the Unix epoch. `None` if out of range.
    pub fn from_timestamp(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(|instant| Datetime { instant })
    }

    pub fn timestamp(&self) -> i64 {
        self.instant.timestamp()
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.instant
    }

    pub fn is_epoch(&self) -> bool {
        *self == Datetime::EPOCH
    }

    /// Best-effort parse using the default [`FormatTable`]. Falls back to
    /// [`Datetime::EPOCH`] when no format matches.
    pub fn parse(input: &str) -> Self {
        Datetime::parse_with(&FormatTable::default(), input)
    }

    /// Best-effort parse trying the formats of `table`. Falls back to
    /// [`Datetime::EPOCH`] when no format matches.
    pub fn parse_with(table: &FormatTable, input: &str) -> Self {
        or_epoch(Datetime::try_parse_with(table, input))
    }

    /// Parse with an explicit strftime-style format, falling back to
    /// [`Datetime::EPOCH`] on mismatch.
    pub fn parse_format(input: &str, fmt: &str) -> Self {
        or_epoch(Datetime::try_parse_format_with(
            &FormatTable::default(),
            input,
            fmt,
        ))
    }

    /// Strict counterpart of [`Datetime::parse`].
    ///
    /// # Errors
    /// Returns `StrideError::Parse` when no format matches.
    pub fn try_parse(input: &str) -> Result<Self> {
        Datetime::try_parse_with(&FormatTable::default(), input)
    }

    /// Strict counterpart of [`Datetime::parse_with`].
    ///
    /// # Errors
    /// Returns `StrideError::Parse` when no format of `table` matches.
    pub fn try_parse_with(table: &FormatTable, input: &str) -> Result<Self> {
        parse::detect(table, input).map(|instant| Datetime { instant })
    }

    /// Strict counterpart of [`Datetime::parse_format`].
    ///
    /// # Errors
    /// Returns `StrideError::Parse` when `input` does not match `fmt`.
    pub fn try_parse_format(input: &str, fmt: &str) -> Result<Self> {
        Datetime::try_parse_format_with(&FormatTable::default(), input, fmt)
    }

    /// Parse with an explicit format whose `%c`, `%x`, `%X` come from `table`.
    ///
    /// # Errors
    /// Returns `StrideError::Parse` when `input` does not match `fmt`.
    pub fn try_parse_format_with(table: &FormatTable, input: &str, fmt: &str) -> Result<Self> {
        parse::parse_with_format(table, input, fmt).map(|instant| Datetime { instant })
    }

    /// Render with a strftime-style format.
    ///
    /// An invalid format string is logged and returned verbatim.
    pub fn format(&self, fmt: &str) -> String {
        match self.try_format(fmt) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "rendering format string verbatim");
                fmt.to_string()
            }
        }
    }

    /// # Errors
    /// Returns `StrideError::InvalidFormat` for unknown directives.
    pub fn try_format(&self, fmt: &str) -> Result<String> {
        self.format_with(&FormatTable::default(), fmt)
    }

    /// Render with `table` supplying `%c`, `%x` and `%X`.
    ///
    /// # Errors
    /// Returns `StrideError::InvalidFormat` for unknown directives.
    pub fn format_with(&self, table: &FormatTable, fmt: &str) -> Result<String> {
        table.render(&self.instant, fmt)
    }

    /// `self + duration`, or `None` if the result leaves the representable range.
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        let delta = duration.to_time_delta()?;
        self.checked_add_delta(delta)
    }

    /// `self - duration`, or `None` if the result leaves the representable range.
    pub fn checked_sub(&self, duration: Duration) -> Option<Self> {
        self.checked_add(-duration)
    }

    /// `self + duration`, clamped to [`Datetime::MIN`] / [`Datetime::MAX`].
    ///
    /// A NaN duration leaves `self` unchanged.
    pub fn saturating_add(&self, duration: Duration) -> Self {
        let secs = duration.as_seconds();
        if secs.is_nan() {
            return *self;
        }
        self.checked_add(duration).unwrap_or(if secs > 0.0 {
            Datetime::MAX
        } else {
            Datetime::MIN
        })
    }

    /// `self - duration`, clamped to [`Datetime::MIN`] / [`Datetime::MAX`].
    pub fn saturating_sub(&self, duration: Duration) -> Self {
        self.saturating_add(-duration)
    }

    pub(crate) fn checked_add_delta(&self, delta: TimeDelta) -> Option<Self> {
        self.instant
            .checked_add_signed(delta)
            .map(|instant| Datetime { instant })
    }

    /// `self - earlier`, in seconds.
    pub fn difference(&self, earlier: &Datetime) -> Duration {
        Duration::from(self.instant - earlier.instant)
    }

    /// The half-open period `[self, end)`.
    pub fn until(&self, end: Datetime) -> Period {
        Period::new(*self, end)
    }
}

fn or_epoch(result: Result<Datetime>) -> Datetime {
    result.unwrap_or_else(|e| {
        debug!(error = %e, "datetime parse failed, using epoch");
        Datetime::EPOCH
    })
}

fn normalize_fields(
    year: i32,
    month0: i32,
    day: i32,
    hour: i32,
    minute: i32,
    second: i32,
) -> Option<DateTime<Utc>> {
    let total_months = i64::from(year) * 12 + i64::from(month0);
    let y = i32::try_from(total_months.div_euclid(12)).ok()?;
    let m = total_months.rem_euclid(12) as u32 + 1;
    let first_of_month = NaiveDate::from_ymd_opt(y, m, 1)?;

    let offset = TimeDelta::try_days(i64::from(day) - 1)?
        .checked_add(&TimeDelta::try_hours(i64::from(hour))?)?
        .checked_add(&TimeDelta::try_minutes(i64::from(minute))?)?
        .checked_add(&TimeDelta::try_seconds(i64::from(second))?)?;

    first_of_month
        .and_time(NaiveTime::MIN)
        .checked_add_signed(offset)
        .map(|naive| naive.and_utc())
}

/// The current instant from the system clock.
pub fn now() -> Datetime {
    Datetime::now()
}

/// `now() + days(1)`.
pub fn tomorrow() -> Datetime {
    Datetime::tomorrow_with(&SystemClock)
}

/// `now() - days(1)`.
pub fn yesterday() -> Datetime {
    Datetime::yesterday_with(&SystemClock)
}

impl Default for Datetime {
    fn default() -> Self {
        Datetime::now()
    }
}

impl From<DateTime<Utc>> for Datetime {
    fn from(instant: DateTime<Utc>) -> Self {
        Datetime { instant }
    }
}

impl From<Datetime> for DateTime<Utc> {
    fn from(dt: Datetime) -> Self {
        dt.instant
    }
}

/// Strict parse: format detection without the epoch fallback.
impl FromStr for Datetime {
    type Err = StrideError;

    fn from_str(s: &str) -> Result<Self> {
        Datetime::try_parse(s)
    }
}

/// `day-month-year hour:minute:second`, e.g. `08-07-1987 23:45:12`.
impl fmt::Display for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.instant.format(DEFAULT_DISPLAY))
    }
}

/// Saturating: see [`Datetime::saturating_add`]. Use [`Datetime::checked_add`] to
/// detect overflow.
impl Add<Duration> for Datetime {
    type Output = Datetime;

    fn add(self, rhs: Duration) -> Datetime {
        self.saturating_add(rhs)
    }
}

/// Saturating: see [`Datetime::saturating_sub`].
impl Sub<Duration> for Datetime {
    type Output = Datetime;

    fn sub(self, rhs: Duration) -> Datetime {
        self.saturating_sub(rhs)
    }
}

impl AddAssign<Duration> for Datetime {
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl SubAssign<Duration> for Datetime {
    fn sub_assign(&mut self, rhs: Duration) {
        *self = *self - rhs;
    }
}

/// Elapsed time in seconds.
impl Sub for Datetime {
    type Output = Duration;

    fn sub(self, rhs: Datetime) -> Duration {
        self.difference(&rhs)
    }
}
