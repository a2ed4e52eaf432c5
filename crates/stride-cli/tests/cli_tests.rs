//! Integration tests for the `stride` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise every subcommand through
//! the actual binary, including the format-table override and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the formats.json fixture.
fn formats_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/formats.json")
}

/// Helper: path to a format table with a wrongly-typed field.
fn broken_formats_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/broken_formats.json")
}

fn stride() -> Command {
    Command::cargo_bin("stride").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// now / tomorrow / yesterday
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn now_prints_default_form() {
    let pattern = r"^\d{2}-\d{2}-\d{4} \d{2}:\d{2}:\d{2}\n$";
    stride()
        .arg("now")
        .assert()
        .success()
        .stdout(predicate::str::is_match(pattern).unwrap());
}

#[test]
fn tomorrow_accepts_custom_format() {
    stride()
        .args(["tomorrow", "-f", "%F"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d{4}-\d{2}-\d{2}\n$").unwrap());
}

#[test]
fn yesterday_succeeds() {
    stride().arg("yesterday").assert().success();
}

// ─────────────────────────────────────────────────────────────────────────────
// parse
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn parse_detects_day_month_year() {
    stride()
        .args(["parse", "08/07/1987"])
        .assert()
        .success()
        .stdout("08-07-1987 00:00:00\n");
}

#[test]
fn parse_with_explicit_formats() {
    stride()
        .args([
            "parse",
            "08/07/1987 23:45:12",
            "--input-format",
            "%d/%m/%Y %H:%M:%S",
            "-f",
            "date: %d/%m/%Y time: %H:%M",
        ])
        .assert()
        .success()
        .stdout("date: 08/07/1987 time: 23:45\n");
}

#[test]
fn parse_c_directive() {
    stride()
        .args(["parse", "08/07/1987", "-f", "%c"])
        .assert()
        .success()
        .stdout("Wed Jul  8 00:00:00 1987\n");
}

#[test]
fn parse_unrecognized_falls_back_to_epoch() {
    stride()
        .args(["parse", "not-a-date"])
        .assert()
        .success()
        .stdout("01-01-1970 00:00:00\n");
}

#[test]
fn parse_fallback_is_logged_when_verbose() {
    stride()
        .args(["parse", "not-a-date", "--verbose"])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout("01-01-1970 00:00:00\n")
        .stderr(predicate::str::contains("falling back to epoch"));
}

#[test]
fn parse_strict_fails_on_unrecognized() {
    stride()
        .args(["parse", "not-a-date", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse datetime"));
}

#[test]
fn parse_invalid_output_format_fails() {
    stride()
        .args(["parse", "2024-01-01", "-f", "%Q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to format datetime"));
}

// ─────────────────────────────────────────────────────────────────────────────
// add / sub / diff / convert
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn add_sums_durations() {
    stride()
        .args(["add", "2024-01-01", "1d", "12h"])
        .assert()
        .success()
        .stdout("02-01-2024 12:00:00\n");
}

#[test]
fn sub_durations() {
    stride()
        .args(["sub", "2024-01-01", "30m", "-f", "%F %T"])
        .assert()
        .success()
        .stdout("2023-12-31 23:30:00\n");
}

#[test]
fn add_rejects_bad_duration() {
    stride()
        .args(["add", "2024-01-01", "3 fortnights"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn add_rejects_unparseable_datetime() {
    stride()
        .args(["add", "not-a-date", "1d"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse datetime"));
}

#[test]
fn diff_is_in_seconds() {
    stride()
        .args(["diff", "2024-01-02", "2024-01-01"])
        .assert()
        .success()
        .stdout("86400 seconds\n");
}

#[test]
fn diff_in_requested_unit() {
    stride()
        .args(["diff", "2024-01-02T12:00:00", "2024-01-01", "--unit", "days"])
        .assert()
        .success()
        .stdout("1 day, 12 hours\n");
}

#[test]
fn diff_tomorrow_now_is_one_day() {
    stride()
        .args(["diff", "tomorrow", "now", "--unit", "d"])
        .assert()
        .success()
        .stdout("1 day\n");
}

#[test]
fn diff_rejects_unknown_unit() {
    stride()
        .args(["diff", "2024-01-02", "2024-01-01", "--unit", "weeks"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown unit"));
}

#[test]
fn convert_defaults_to_seconds() {
    stride()
        .args(["convert", "1d"])
        .assert()
        .success()
        .stdout("86400 seconds\n");
}

#[test]
fn convert_half_year_to_days() {
    stride()
        .args(["convert", "0.5y", "--to", "days"])
        .assert()
        .success()
        .stdout("182.5 days\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// every
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn every_three_hours_lists_eight_values() {
    let output = stride()
        .args(["every", "2024-01-01", "2024-01-02", "3h", "-f", "%H:%M"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec!["00:00", "03:00", "06:00", "09:00", "12:00", "15:00", "18:00", "21:00"]
    );
}

#[test]
fn every_json_output() {
    let output = stride()
        .args(["every", "2024-01-01", "2024-01-01T03:00:00", "1h", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let values: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        values,
        vec![
            "2024-01-01T00:00:00Z",
            "2024-01-01T01:00:00Z",
            "2024-01-01T02:00:00Z"
        ]
    );
}

#[test]
fn every_rejects_zero_step() {
    stride()
        .args(["every", "2024-01-01", "2024-01-02", "0h"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("step must be positive"));
}

#[test]
fn every_rejects_negative_step() {
    stride()
        .args(["every", "2024-01-01", "2024-01-02", "-1h"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument"));
}

// ─────────────────────────────────────────────────────────────────────────────
// --formats
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn formats_file_overrides_display_and_detection() {
    // Month-first detection and a custom display pattern.
    stride()
        .args(["--formats", formats_path(), "parse", "08/07/1987"])
        .assert()
        .success()
        .stdout("1987/08/07 00:00\n");
}

#[test]
fn formats_file_overrides_c_directive() {
    stride()
        .args([
            "--formats",
            formats_path(),
            "parse",
            "1987-07-08T23:45:12Z",
            "-f",
            "%c",
        ])
        .assert()
        .success()
        .stdout("08.07.1987 23:45:12\n");
}

#[test]
fn missing_formats_file_fails() {
    stride()
        .args(["--formats", "/nonexistent/formats.json", "now"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn malformed_formats_file_fails() {
    stride()
        .args(["--formats", broken_formats_path(), "now"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format table"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Help / usage
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn no_subcommand_shows_usage() {
    stride()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_subcommands() {
    stride()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("every"))
        .stdout(predicate::str::contains("convert"));
}
