//! Field comparisons between a scan and a candidate record.
//!
//! Each takes the scanned value as an `Option` and is total: an absent value
//! never matches.

use chrono::NaiveDate;

/// Exact string equality, used for GTIN and serial number.
pub fn exact_equal(scanned: Option<&str>, expected: &str) -> bool {
    scanned.is_some_and(|value| value == expected)
}

/// Case-insensitive equality for lot numbers.
pub fn lot_equal(scanned: Option<&str>, expected: &str) -> bool {
    scanned.is_some_and(|value| value.to_lowercase() == expected.to_lowercase())
}

/// Calendar-date equality for expirations.
pub fn dates_equal(scanned: Option<NaiveDate>, expected: NaiveDate) -> bool {
    scanned == Some(expected)
}
