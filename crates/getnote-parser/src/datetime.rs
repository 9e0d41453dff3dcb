//! Date-time normalization
//!
//! Exported notes carry timestamps in several shapes: ISO-8601 with a `T`
//! designator, `Y-M-D`/`Y/M/D` with an optional clock time, and US-style
//! `M/D/Y`. All of them are rewritten into the canonical
//! `YYYY-MM-DD HH:MM:SS` form. Anything unrecognized is passed through
//! verbatim.

use chrono::{DateTime, Local, NaiveDateTime};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::trace;

/// `chrono` format string for the canonical timestamp.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static YMD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})[-/](\d{1,2})[-/](\d{1,2})(?:[\sT]+(\d{1,2}):(\d{1,2})(?::(\d{1,2}))?)?")
        .expect("y-m-d regex")
});

static MDY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})/(\d{1,2})/(\d{4})(?:\s+(\d{1,2}):(\d{1,2})(?::(\d{1,2}))?)?")
        .expect("m/d/y regex")
});

/// ISO layouts without an offset, tried after RFC 3339.
const NAIVE_ISO_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Current local time in canonical form.
pub fn now_canonical() -> String {
    Local::now().format(CANONICAL_FORMAT).to_string()
}

/// Normalize a raw date-time string into `YYYY-MM-DD HH:MM:SS`.
///
/// Strings with a `T` designator are parsed as ISO-8601 first; values with an
/// offset are converted to local time. Numeric `Y-M-D`/`Y/M/D` and `M/D/Y`
/// shapes are padded field by field with missing clock fields set to `00`.
/// Values are not range-checked. Unrecognized input is returned unchanged.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();

    if trimmed.contains('T') {
        if let Some(parsed) = parse_iso(trimmed) {
            return parsed;
        }
        trace!(raw = %trimmed, "ISO parse failed, trying numeric patterns");
    }

    if let Some(caps) = YMD_REGEX.captures(trimmed) {
        return canonical_from_parts(&caps, 1, 2, 3);
    }

    if let Some(caps) = MDY_REGEX.captures(trimmed) {
        return canonical_from_parts(&caps, 3, 1, 2);
    }

    trace!(raw = %raw, "no date pattern recognized, passing through");
    raw.to_string()
}

fn parse_iso(value: &str) -> Option<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).format(CANONICAL_FORMAT).to_string());
    }

    NAIVE_ISO_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.format(CANONICAL_FORMAT).to_string())
}

fn canonical_from_parts(caps: &Captures<'_>, year: usize, month: usize, day: usize) -> String {
    let field = |idx: usize| caps.get(idx).map(|m| m.as_str()).unwrap_or("0");

    format!(
        "{}-{}-{} {}:{}:{}",
        pad(field(year), 4),
        pad(field(month), 2),
        pad(field(day), 2),
        pad(field(4), 2),
        pad(field(5), 2),
        pad(field(6), 2),
    )
}

fn pad(value: &str, width: usize) -> String {
    format!("{value:0>width$}")
}
