//! Numeric shorthands for building durations: `1.day() + 1.hour()`.
//!
//! Every method is a thin call into the matching factory in [`crate::duration`];
//! singular and plural spellings are interchangeable.

use crate::duration::{Duration, Unit};

pub trait DurationExt: Copy {
    fn to_amount(self) -> f64;

    fn seconds(self) -> Duration {
        Duration::new(Unit::Second, self.to_amount())
    }

    fn minutes(self) -> Duration {
        Duration::new(Unit::Minute, self.to_amount())
    }

    fn hours(self) -> Duration {
        Duration::new(Unit::Hour, self.to_amount())
    }

    fn days(self) -> Duration {
        Duration::new(Unit::Day, self.to_amount())
    }

    fn months(self) -> Duration {
        Duration::new(Unit::Month, self.to_amount())
    }

    fn years(self) -> Duration {
        Duration::new(Unit::Year, self.to_amount())
    }

    fn second(self) -> Duration {
        self.seconds()
    }

    fn minute(self) -> Duration {
        self.minutes()
    }

    fn hour(self) -> Duration {
        self.hours()
    }

    fn day(self) -> Duration {
        self.days()
    }

    fn month(self) -> Duration {
        self.months()
    }

    fn year(self) -> Duration {
        self.years()
    }
}

macro_rules! impl_duration_ext {
    ($($t:ty),*) => {
        $(
            impl DurationExt for $t {
                #[inline]
                fn to_amount(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

// One integer and one float type so that bare literals (`3.hours()`, `0.5.years()`)
// resolve without annotations.
impl_duration_ext!(i64, f64);
