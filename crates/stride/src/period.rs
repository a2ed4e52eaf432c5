//! Half-open periods and stepped iteration over them.
//!
//! `start.until(end).every(step)` yields `start, start + step, start + 2·step, …` while
//! the value is strictly before `end`. The end instant itself is never emitted, even
//! when a step lands exactly on it.

use std::iter::FusedIterator;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::datetime::Datetime;
use crate::duration::Duration;
use crate::error::{Result, StrideError};

/// The interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub start: Datetime,
    pub end: Datetime,
}

impl Period {
    pub fn new(start: Datetime, end: Datetime) -> Self {
        Period { start, end }
    }

    /// `end - start`, in seconds. Negative when the period is inverted.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True when no instant satisfies `start <= t < end`.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, instant: &Datetime) -> bool {
        self.start <= *instant && *instant < self.end
    }

    /// Step through the period by `step`.
    ///
    /// The returned [`Every`] is a lazy, restartable sequence: each iteration starts a
    /// fresh cursor at `start`.
    ///
    /// # Errors
    /// Returns `StrideError::InvalidArgument` if `step` is zero, negative, not finite,
    /// shorter than one nanosecond, or too large to represent.
    pub fn every(&self, step: Duration) -> Result<Every> {
        let delta = step.to_time_delta().ok_or_else(|| {
            StrideError::InvalidArgument(format!("step {} is not representable", step))
        })?;
        if delta <= TimeDelta::zero() {
            return Err(StrideError::InvalidArgument(format!(
                "step must be positive, got {:?} seconds",
                step.as_seconds()
            )));
        }
        Ok(Every {
            start: self.start,
            end: self.end,
            step: delta,
        })
    }
}

/// A stepped walk through a [`Period`]. Iterate it as often as needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Every {
    start: Datetime,
    end: Datetime,
    step: TimeDelta,
}

impl Every {
    pub fn iter(&self) -> EveryIter {
        EveryIter {
            next: Some(self.start),
            end: self.end,
            step: self.step,
        }
    }

    /// Number of instants the sequence yields.
    pub fn len(&self) -> usize {
        remaining(self.start, self.end, self.step)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn step(&self) -> Duration {
        Duration::from(self.step)
    }
}

impl IntoIterator for Every {
    type Item = Datetime;
    type IntoIter = EveryIter;

    fn into_iter(self) -> EveryIter {
        self.iter()
    }
}

impl IntoIterator for &Every {
    type Item = Datetime;
    type IntoIter = EveryIter;

    fn into_iter(self) -> EveryIter {
        self.iter()
    }
}

/// Cursor over an [`Every`] sequence.
#[derive(Debug, Clone)]
pub struct EveryIter {
    next: Option<Datetime>,
    end: Datetime,
    step: TimeDelta,
}

impl Iterator for EveryIter {
    type Item = Datetime;

    fn next(&mut self) -> Option<Datetime> {
        let current = self.next?;
        if current >= self.end {
            self.next = None;
            return None;
        }
        // Overflow past the representable range means we are already past `end`.
        self.next = current.checked_add_delta(self.step);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = match self.next {
            Some(current) => remaining(current, self.end, self.step),
            None => 0,
        };
        (n, Some(n))
    }
}

impl ExactSizeIterator for EveryIter {}

impl FusedIterator for EveryIter {}

/// `ceil((end - from) / step)`, or 0 when `from >= end`.
fn remaining(from: Datetime, end: Datetime, step: TimeDelta) -> usize {
    if from >= end {
        return 0;
    }
    let span = total_nanos(*end.as_datetime() - *from.as_datetime());
    let step = total_nanos(step);
    let count = (span + step - 1) / step;
    usize::try_from(count).unwrap_or(usize::MAX)
}

fn total_nanos(delta: TimeDelta) -> i128 {
    i128::from(delta.num_seconds()) * 1_000_000_000 + i128::from(delta.subsec_nanos())
}
