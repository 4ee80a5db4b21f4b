//! GEDCOM date codec
//!
//! Decoding is best effort: qualifiers (`ABT`, `BEF`, ...) are dropped and
//! partial dates are pinned to the first day of their month or year.
//! Encoding always produces the exact `D MON YYYY` form, with a `B.C.`
//! suffix for years before 1 (chrono year 0 is 1 B.C.).

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

const QUALIFIERS: [&str; 9] = ["ABT", "BEF", "AFT", "EST", "CAL", "FROM", "TO", "BET", "AND"];

const ERA_MARKERS: [&str; 3] = ["B.C.", "BCE", "BC"];

// Three to six year digits: `ABT 850` up to the end of chrono's range
static DAY_MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})\s+([A-Z]{3})\s+(\d{3,6})\b").unwrap());
static MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]{3})\s+(\d{3,6})\b").unwrap());
static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{3,6})\b").unwrap());

fn month_number(abbrev: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|m| *m == abbrev)
        .and_then(|i| u32::try_from(i + 1).ok())
}

fn strip_qualifiers(value: &str) -> &str {
    let mut rest = value.trim_start();
    loop {
        let mut parts = rest.splitn(2, char::is_whitespace);
        let first = parts.next().unwrap_or_default();
        if !QUALIFIERS.iter().any(|q| first.eq_ignore_ascii_case(q)) {
            return rest;
        }
        rest = parts.next().unwrap_or_default().trim_start();
    }
}

/// Split off a trailing `B.C.`/`BC`/`BCE` era marker
fn strip_era(text: &str) -> (&str, bool) {
    let text = text.trim_end();
    for marker in ERA_MARKERS {
        if let Some(rest) = text.strip_suffix(marker) {
            if rest.ends_with(char::is_whitespace) {
                return (rest.trim_end(), true);
            }
        }
    }
    (text, false)
}

/// Astronomical year for a written year; there is no year 0 B.C.
fn year_of(digits: &str, before_christ: bool) -> Option<i32> {
    let written: i32 = digits.parse().ok()?;
    match (before_christ, written) {
        (true, 0) => None,
        (true, n) => Some(1 - n),
        (false, n) => Some(n),
    }
}

/// Decode a GEDCOM date value. Years of three to six digits are read,
/// optionally followed by `B.C.`. Unrecognized text yields `None`.
pub fn decode(value: &str) -> Option<NaiveDate> {
    let upper = value.to_uppercase();
    let (text, bc) = strip_era(strip_qualifiers(&upper));

    if let Some(caps) = DAY_MONTH_YEAR.captures(text) {
        if let Some(month) = month_number(&caps[2]) {
            let day = caps[1].parse().ok()?;
            return NaiveDate::from_ymd_opt(year_of(&caps[3], bc)?, month, day);
        }
    }

    if let Some(caps) = MONTH_YEAR.captures(text) {
        if let Some(month) = month_number(&caps[1]) {
            return NaiveDate::from_ymd_opt(year_of(&caps[2], bc)?, month, 1);
        }
    }

    let caps = YEAR.captures(text)?;
    NaiveDate::from_ymd_opt(year_of(&caps[1], bc)?, 1, 1)
}

/// Encode a date as `D MON YYYY` (at least four year digits). Years
/// before 1 are written as `D MON YYYY B.C.`, so every `NaiveDate`
/// decodes back to itself.
pub fn encode(date: NaiveDate) -> String {
    let day = date.day();
    let month = MONTHS[date.month0() as usize];
    if date.year() <= 0 {
        format!("{} {} {:04} B.C.", day, month, 1 - date.year())
    } else {
        format!("{} {} {:04}", day, month, date.year())
    }
}
