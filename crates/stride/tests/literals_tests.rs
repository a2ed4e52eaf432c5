//! Tests for the numeric shorthands in `DurationExt`.

use stride::{days, hours, minutes, months, seconds, years, Datetime, DurationExt, Unit};

#[test]
fn shorthands_match_factories() {
    assert_eq!(30.seconds(), seconds(30));
    assert_eq!(5.minutes(), minutes(5));
    assert_eq!(3.hours(), hours(3));
    assert_eq!(2.days(), days(2));
    assert_eq!(6.months(), months(6));
    assert_eq!(10.years(), years(10));
}

#[test]
fn singular_and_plural_spellings_agree() {
    assert_eq!(1.second(), 1.seconds());
    assert_eq!(1.minute(), 1.minutes());
    assert_eq!(1.hour(), 1.hours());
    assert_eq!(1.day(), 1.days());
    assert_eq!(1.month(), 1.months());
    assert_eq!(1.year(), 1.years());
    assert_eq!(3.hour().unit(), Unit::Hour);
}

#[test]
fn fractional_literals() {
    assert_eq!(0.5.years(), years(0.5));
    assert_eq!(1.5.hours().to_string(), "1 hour, 30 minutes");
}

#[test]
fn shorthands_combine_like_durations() {
    assert_eq!((1.day() + 1.hour()).to_string(), "1 day, 1 hour");
    assert_eq!(
        (1.day() - (1.hour() + 1.minute())).to_string(),
        "22 hours, 59 minutes"
    );
}

#[test]
fn shorthands_apply_to_datetimes() {
    let d = Datetime::from_ymd(2024, 0, 1);
    assert_eq!(d + 1.day(), Datetime::from_ymd(2024, 0, 2));
}
