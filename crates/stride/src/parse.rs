//! Datetime string parsing -- explicit format or best-effort format detection.
//!
//! Strings without an offset are read as UTC. A format that only carries a date
//! yields midnight of that date.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::{Result, StrideError};
use crate::format::FormatTable;

/// Parse `input` with an explicit strftime-style `fmt`.
///
/// The format is tried as offset-aware first, then as a naive datetime, then as a
/// bare date.
///
/// # Errors
/// Returns `StrideError::Parse` with chrono's reason when none of the three readings
/// match.
pub fn parse_with_format(table: &FormatTable, input: &str, fmt: &str) -> Result<DateTime<Utc>> {
    let pattern = table.expand(fmt);
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_str(input, &pattern) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive_err = match NaiveDateTime::parse_from_str(input, &pattern) {
        Ok(naive) => return Ok(naive.and_utc()),
        Err(e) => e,
    };

    match NaiveDate::parse_from_str(input, &pattern) {
        Ok(date) => Ok(date.and_time(NaiveTime::MIN).and_utc()),
        Err(_) => Err(StrideError::parse(
            input,
            format!("does not match '{}': {}", fmt, naive_err),
        )),
    }
}

/// Detect the format of `input` and parse it.
///
/// Order: RFC 3339, then each entry of [`FormatTable::detect`], then RFC 2822. The
/// first successful reading wins.
///
/// # Errors
/// Returns `StrideError::Parse` when no format matches.
pub fn detect(table: &FormatTable, input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(StrideError::parse(input, "empty datetime string"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Some(dt) = table
        .detect
        .iter()
        .find_map(|fmt| parse_with_format(table, trimmed, fmt).ok())
    {
        return Ok(dt);
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    Err(StrideError::parse(input, "no known datetime format matched"))
}
