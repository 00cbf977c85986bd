//! Expiration date normalization.
//!
//! GS1 AI 17 carries `YYMMDD` with a two-digit year. The century is chosen
//! with a pivot: years below it are 20xx, the rest 19xx.

use chrono::NaiveDate;

use super::patterns::{DATE_ISO, DATE_YYMMDD};

/// Default century pivot for two-digit years.
pub const DEFAULT_CENTURY_PIVOT: u8 = 50;

/// Expand a two-digit year using the century pivot.
pub fn expand_two_digit_year(yy: u32, pivot: u8) -> i32 {
    if yy < u32::from(pivot) {
        2000 + yy as i32
    } else {
        1900 + yy as i32
    }
}

/// Parse a GS1 `YYMMDD` date. Returns `None` for anything that is not six
/// digits or does not name a real calendar day.
pub fn parse_yymmdd(raw: &str, pivot: u8) -> Option<NaiveDate> {
    let caps = DATE_YYMMDD.captures(raw)?;
    let yy: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;

    NaiveDate::from_ymd_opt(expand_two_digit_year(yy, pivot), month, day)
}

/// Parse an expiration value as either `YYMMDD` or ISO `YYYY-MM-DD`.
pub fn parse_expiration(raw: &str, pivot: u8) -> Option<NaiveDate> {
    let raw = raw.trim();
    parse_yymmdd(raw, pivot).or_else(|| parse_iso(raw))
}

fn parse_iso(raw: &str) -> Option<NaiveDate> {
    let caps = DATE_ISO.captures(raw)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}
