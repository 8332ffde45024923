//! Permissive timestamp parsing.
//!
//! Source timestamps arrive in whatever shape the upstream system emits:
//! RFC 3339 with an offset, naive local-looking datetimes, bare dates.
//! Parsing tries an offset-aware route first when the token visibly carries
//! one, then falls through a chain of naive formats. A naive timestamp is
//! assumed to already be UTC; it is tagged, not shifted.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Trailing `Z` or numeric offset, e.g. `+02:00`, `-0500`.
static EXPLICIT_OFFSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([Zz]|[+-]\d{2}:?\d{2})\s*$").unwrap());

/// Formats carrying an explicit offset (`%z` accepts `+02:00` and `+0200`).
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%m/%d/%Y %H:%M:%S %z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M",
    "%d-%b-%Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y"];

/// Parse a raw timestamp and render it canonically: ISO-8601 UTC with a
/// literal trailing `Z`, fractional seconds only when nonzero.
///
/// Blank input and parse failures yield `None`; this function never fails
/// a record outright.
pub fn canonical_utc(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let utc = parse_permissive(trimmed)?;
    Some(utc.format("%Y-%m-%dT%H:%M:%S%.fZ").to_string())
}

fn parse_permissive(token: &str) -> Option<DateTime<Utc>> {
    if EXPLICIT_OFFSET.is_match(token) {
        if let Ok(dt) = DateTime::parse_from_rfc3339(token) {
            return Some(dt.with_timezone(&Utc));
        }
        for format in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(token, format) {
                return Some(dt.with_timezone(&Utc));
            }
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(token, format) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }
    for format in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(token, format) {
            let midnight = date.and_hms_opt(0, 0, 0)?;
            return Some(Utc.from_utc_datetime(&midnight));
        }
    }
    None
}
