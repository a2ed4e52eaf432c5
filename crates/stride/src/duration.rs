//! Durations at a chosen granularity, with fixed-day conversion conventions.
//!
//! A [`Duration`] is a signed, possibly fractional amount of a [`Unit`]. Conversion
//! between units is approximate by design of the calendar conventions used here:
//!
//! | unit   | seconds      |
//! |--------|--------------|
//! | second | 1            |
//! | minute | 60           |
//! | hour   | 3 600        |
//! | day    | 86 400       |
//! | month  | 30 days      |
//! | year   | 365 days     |
//!
//! A year is *not* twelve months: `years(0.5)` is 182.5 days while `months(6)` is
//! 180 days, so the two are not equal.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StrideError};

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const SECONDS_PER_MONTH: f64 = 30.0 * SECONDS_PER_DAY;
const SECONDS_PER_YEAR: f64 = 365.0 * SECONDS_PER_DAY;

/// Granularity of a [`Duration`], ordered from finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "seconds", alias = "second")]
    Second,
    #[serde(rename = "minutes", alias = "minute")]
    Minute,
    #[serde(rename = "hours", alias = "hour")]
    Hour,
    #[serde(rename = "days", alias = "day")]
    Day,
    #[serde(rename = "months", alias = "month")]
    Month,
    #[serde(rename = "years", alias = "year")]
    Year,
}

impl Unit {
    /// All units, coarsest first.
    pub const DESCENDING: [Unit; 6] = [
        Unit::Year,
        Unit::Month,
        Unit::Day,
        Unit::Hour,
        Unit::Minute,
        Unit::Second,
    ];

    /// Number of seconds in one of this unit.
    pub const fn seconds(self) -> f64 {
        match self {
            Unit::Second => 1.0,
            Unit::Minute => SECONDS_PER_MINUTE,
            Unit::Hour => SECONDS_PER_HOUR,
            Unit::Day => SECONDS_PER_DAY,
            Unit::Month => SECONDS_PER_MONTH,
            Unit::Year => SECONDS_PER_YEAR,
        }
    }

    pub const fn singular(self) -> &'static str {
        match self {
            Unit::Second => "second",
            Unit::Minute => "minute",
            Unit::Hour => "hour",
            Unit::Day => "day",
            Unit::Month => "month",
            Unit::Year => "year",
        }
    }

    pub const fn plural(self) -> &'static str {
        match self {
            Unit::Second => "seconds",
            Unit::Minute => "minutes",
            Unit::Hour => "hours",
            Unit::Day => "days",
            Unit::Month => "months",
            Unit::Year => "years",
        }
    }

    /// Look up a unit by name or abbreviation (`"h"`, `"hr"`, `"hour"`, `"hours"`, ...).
    ///
    /// Matching is case-insensitive. `"m"` is minutes; months are `"mo"` or longer.
    pub fn from_name(name: &str) -> Option<Unit> {
        let unit = match name.to_ascii_lowercase().as_str() {
            "s" | "sec" | "secs" | "second" | "seconds" => Unit::Second,
            "m" | "min" | "mins" | "minute" | "minutes" => Unit::Minute,
            "h" | "hr" | "hrs" | "hour" | "hours" => Unit::Hour,
            "d" | "day" | "days" => Unit::Day,
            "mo" | "mon" | "mons" | "month" | "months" => Unit::Month,
            "y" | "yr" | "yrs" | "year" | "years" => Unit::Year,
            _ => return None,
        };
        Some(unit)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

impl FromStr for Unit {
    type Err = StrideError;

    fn from_str(s: &str) -> Result<Self> {
        Unit::from_name(s.trim()).ok_or_else(|| StrideError::parse(s, "unknown unit"))
    }
}

/// An amount of calendar time expressed in a single [`Unit`].
///
/// Equality and ordering compare the amount of time in seconds, so
/// `hours(24) == days(1)` while `years(0.5) != months(6)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Duration {
    amount: f64,
    unit: Unit,
}

impl Duration {
    pub fn new(unit: Unit, amount: impl Into<f64>) -> Self {
        Duration {
            amount: amount.into(),
            unit,
        }
    }

    pub fn zero(unit: Unit) -> Self {
        Duration::new(unit, 0.0)
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Canonical conversion used for comparisons and datetime arithmetic.
    pub fn as_seconds(&self) -> f64 {
        self.amount * self.unit.seconds()
    }

    /// The same amount of time re-expressed in `unit`, using the fixed conversion table.
    pub fn to_unit(&self, unit: Unit) -> Duration {
        Duration {
            amount: self.as_seconds() / unit.seconds(),
            unit,
        }
    }

    /// `self + other`, with `other` converted to `self`'s unit first.
    #[allow(clippy::should_implement_trait)]
    pub fn add(self, other: Duration) -> Duration {
        Duration {
            amount: self.amount + other.to_unit(self.unit).amount,
            unit: self.unit,
        }
    }

    /// `self - other`, with `other` converted to `self`'s unit first.
    #[allow(clippy::should_implement_trait)]
    pub fn sub(self, other: Duration) -> Duration {
        Duration {
            amount: self.amount - other.to_unit(self.unit).amount,
            unit: self.unit,
        }
    }

    pub fn abs(&self) -> Duration {
        Duration {
            amount: self.amount.abs(),
            unit: self.unit,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.as_seconds() > 0.0
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0.0
    }

    /// Convert to a chrono [`TimeDelta`] with nanosecond resolution.
    ///
    /// Returns `None` for non-finite amounts and for durations beyond chrono's range.
    pub fn to_time_delta(&self) -> Option<TimeDelta> {
        let secs = self.as_seconds();
        if !secs.is_finite() {
            return None;
        }
        let whole = secs.trunc();
        if whole.abs() >= i64::MAX as f64 {
            return None;
        }
        let nanos = ((secs - whole) * 1e9).round() as i64;
        TimeDelta::try_seconds(whole as i64)?.checked_add(&TimeDelta::nanoseconds(nanos))
    }
}

impl From<TimeDelta> for Duration {
    fn from(delta: TimeDelta) -> Self {
        let secs = delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1e9;
        Duration::new(Unit::Second, secs)
    }
}

impl PartialEq for Duration {
    fn eq(&self, other: &Self) -> bool {
        self.as_seconds() == other.as_seconds()
    }
}

impl PartialOrd for Duration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_seconds().partial_cmp(&other.as_seconds())
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration::add(self, rhs)
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        Duration::sub(self, rhs)
    }
}

impl Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        Duration {
            amount: -self.amount,
            unit: self.unit,
        }
    }
}

impl Mul<f64> for Duration {
    type Output = Duration;

    fn mul(self, rhs: f64) -> Duration {
        Duration {
            amount: self.amount * rhs,
            unit: self.unit,
        }
    }
}

impl Div<f64> for Duration {
    type Output = Duration;

    fn div(self, rhs: f64) -> Duration {
        Duration {
            amount: self.amount / rhs,
            unit: self.unit,
        }
    }
}

/// Renders the whole part in the duration's own unit, then decomposes the
/// fractional remainder into smaller units: `years(0.5)` prints as
/// `6 months, 2 days, 12 hours`. Resolution is one millisecond.
impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_ms = (self.amount.abs() * self.unit.seconds() * 1000.0).round();
        // Beyond u128 milliseconds the decomposition would saturate.
        if !total_ms.is_finite() || total_ms >= u128::MAX as f64 {
            return write!(f, "{} {}", self.amount, self.unit.plural());
        }

        let mut rest = total_ms as u128;
        let mut parts = Vec::new();
        for unit in Unit::DESCENDING.into_iter().filter(|u| *u <= self.unit) {
            let unit_ms = (unit.seconds() * 1000.0) as u128;
            let count = rest / unit_ms;
            rest %= unit_ms;

            if unit == Unit::Second {
                if count > 0 || rest > 0 {
                    parts.push(format_seconds(count, rest));
                }
            } else if count > 0 {
                parts.push(format!("{} {}", count, label(unit, count)));
            }
        }

        if parts.is_empty() {
            return write!(f, "0 {}", self.unit.plural());
        }
        if self.amount < 0.0 {
            f.write_str("-")?;
        }
        f.write_str(&parts.join(", "))
    }
}

fn label(unit: Unit, count: u128) -> &'static str {
    if count == 1 {
        unit.singular()
    } else {
        unit.plural()
    }
}

fn format_seconds(whole: u128, millis: u128) -> String {
    if millis == 0 {
        return format!("{} {}", whole, label(Unit::Second, whole));
    }
    let frac = format!("{:03}", millis);
    format!("{}.{} seconds", whole, frac.trim_end_matches('0'))
}

/// Parses `"90s"`, `"1.5h"`, `"3 days"`, `"1d12h"` or `"1 day, 12 hours"`.
///
/// Compound terms are summed in the first term's unit. A leading `-` negates the
/// whole expression.
impl FromStr for Duration {
    type Err = StrideError;

    fn from_str(s: &str) -> Result<Self> {
        let input = s.trim();
        let (negative, mut rest) = match input.strip_prefix('-') {
            Some(tail) => (true, tail.trim_start()),
            None => (false, input.strip_prefix('+').unwrap_or(input).trim_start()),
        };
        if rest.is_empty() {
            return Err(StrideError::parse(s, "empty duration string"));
        }

        let mut total: Option<Duration> = None;
        while !rest.is_empty() {
            let num_len = rest
                .find(|c: char| !(c.is_ascii_digit() || c == '.'))
                .unwrap_or(rest.len());
            if num_len == 0 {
                return Err(StrideError::parse(
                    s,
                    format!("expected a number at '{}'", rest),
                ));
            }
            let number = &rest[..num_len];
            let amount: f64 = number
                .parse()
                .map_err(|_| StrideError::parse(s, format!("invalid number '{}'", number)))?;
            rest = rest[num_len..].trim_start();

            let unit_len = rest
                .find(|c: char| !c.is_ascii_alphabetic())
                .unwrap_or(rest.len());
            if unit_len == 0 {
                return Err(StrideError::parse(
                    s,
                    format!("missing unit after '{}'", number),
                ));
            }
            let name = &rest[..unit_len];
            let unit = Unit::from_name(name)
                .ok_or_else(|| StrideError::parse(s, format!("unknown unit '{}'", name)))?;
            rest = rest[unit_len..].trim_start_matches(|c: char| c.is_whitespace() || c == ',');

            let term = Duration::new(unit, amount);
            total = Some(match total {
                Some(acc) => acc + term,
                None => term,
            });
        }

        let total = total.ok_or_else(|| StrideError::parse(s, "no duration terms found"))?;
        Ok(if negative { -total } else { total })
    }
}

pub fn seconds(amount: impl Into<f64>) -> Duration {
    Duration::new(Unit::Second, amount)
}

pub fn minutes(amount: impl Into<f64>) -> Duration {
    Duration::new(Unit::Minute, amount)
}

pub fn hours(amount: impl Into<f64>) -> Duration {
    Duration::new(Unit::Hour, amount)
}

pub fn days(amount: impl Into<f64>) -> Duration {
    Duration::new(Unit::Day, amount)
}

/// Months of exactly 30 days.
pub fn months(amount: impl Into<f64>) -> Duration {
    Duration::new(Unit::Month, amount)
}

/// Years of exactly 365 days.
pub fn years(amount: impl Into<f64>) -> Duration {
    Duration::new(Unit::Year, amount)
}

pub fn second(amount: impl Into<f64>) -> Duration {
    seconds(amount)
}

pub fn minute(amount: impl Into<f64>) -> Duration {
    minutes(amount)
}

pub fn hour(amount: impl Into<f64>) -> Duration {
    hours(amount)
}

pub fn day(amount: impl Into<f64>) -> Duration {
    days(amount)
}

pub fn month(amount: impl Into<f64>) -> Duration {
    months(amount)
}

pub fn year(amount: impl Into<f64>) -> Duration {
    years(amount)
}
