//! Format table and strftime-style rendering.
//!
//! Rendering uses chrono's directive set (`%Y %m %d %H %M %S %F %T %z` and the rest of
//! the strftime table). The locale-dependent directives `%c`, `%x` and `%X` are
//! expanded from a [`FormatTable`] before chrono sees the pattern, so output never
//! depends on the host locale.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StrideError};

/// Default display pattern: `day-month-year hour:minute:second`.
pub const DEFAULT_DISPLAY: &str = "%d-%m-%Y %H:%M:%S";

/// Patterns for the locale-dependent directives, the default display pattern, and the
/// ordered list of formats tried by lenient parsing.
///
/// Deserializes with defaults for missing fields, so a config file may override only
/// what it needs:
///
/// ```rust
/// use stride::FormatTable;
///
/// let table: FormatTable = serde_json::from_str(r#"{"display":"%Y/%m/%d"}"#).unwrap();
/// assert_eq!(table.display, "%Y/%m/%d");
/// assert_eq!(table.time, "%H:%M:%S");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatTable {
    /// Default pattern for [`Datetime::format_with`](crate::Datetime::format_with)
    /// callers such as the CLI. `Display for Datetime` always uses `DEFAULT_DISPLAY`.
    pub display: String,
    /// Expansion of `%c`.
    pub date_time: String,
    /// Expansion of `%x`.
    pub date: String,
    /// Expansion of `%X`.
    pub time: String,
    /// Formats tried in order by lenient parsing, after RFC 3339 and before RFC 2822.
    pub detect: Vec<String>,
}

impl Default for FormatTable {
    fn default() -> Self {
        FormatTable {
            display: DEFAULT_DISPLAY.to_string(),
            date_time: "%a %b %e %H:%M:%S %Y".to_string(),
            date: "%m/%d/%y".to_string(),
            time: "%H:%M:%S".to_string(),
            detect: [
                "%Y-%m-%dT%H:%M:%S",
                "%Y-%m-%dT%H:%M:%S%.f",
                "%Y-%m-%d %H:%M:%S",
                "%Y-%m-%d %H:%M:%S%.f",
                "%Y-%m-%dT%H:%M",
                "%Y-%m-%d %H:%M",
                "%Y-%m-%d",
                "%d/%m/%Y %H:%M:%S",
                "%d/%m/%Y %H:%M",
                "%d/%m/%Y",
                "%d-%m-%Y %H:%M:%S",
                "%d-%m-%Y %H:%M",
                "%d-%m-%Y",
                "%d.%m.%Y %H:%M:%S",
                "%d.%m.%Y",
                "%Y%m%dT%H%M%S",
                "%a %b %e %H:%M:%S %Y",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl FormatTable {
    /// Replace `%c`, `%x` and `%X` with this table's patterns. `%%` is left intact.
    pub fn expand(&self, fmt: &str) -> String {
        let mut out = String::with_capacity(fmt.len());
        let mut chars = fmt.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('c') => out.push_str(&self.date_time),
                Some('x') => out.push_str(&self.date),
                Some('X') => out.push_str(&self.time),
                Some(other) => {
                    out.push('%');
                    out.push(other);
                }
                None => out.push('%'),
            }
        }
        out
    }

    /// Render `instant` with `fmt`.
    ///
    /// # Errors
    /// Returns `StrideError::InvalidFormat` if `fmt` contains a directive chrono
    /// does not recognize.
    pub fn render(&self, instant: &DateTime<Utc>, fmt: &str) -> Result<String> {
        let pattern = self.expand(fmt);
        let mut out = String::new();
        write!(out, "{}", instant.format(&pattern))
            .map_err(|_| StrideError::InvalidFormat(fmt.to_string()))?;
        Ok(out)
    }
}
