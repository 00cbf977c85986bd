//! Common regex patterns for scan text extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Labeled free-text values: "<Label>: <value>", value ends at whitespace or comma
    pub static ref GTIN_LABEL: Regex = Regex::new(
        r"(?i)\bGTIN\s*:\s*([^\s,]+)"
    ).unwrap();

    pub static ref SERIAL_LABEL: Regex = Regex::new(
        r"(?i)\b(?:serial(?:\s+(?:number|no\.?))?|SN)\s*:\s*([^\s,]+)"
    ).unwrap();

    pub static ref LOT_LABEL: Regex = Regex::new(
        r"(?i)\b(?:lot|batch)(?:\s+(?:number|no\.?))?\s*:\s*([^\s,]+)"
    ).unwrap();

    pub static ref EXPIRY_LABEL: Regex = Regex::new(
        r"(?i)\bexp(?:iration|iry)?(?:\s+date)?\s*:\s*([^\s,]+)"
    ).unwrap();

    // GTIN-14
    pub static ref GTIN14: Regex = Regex::new(
        r"^[0-9]{14}$"
    ).unwrap();

    // GS1 date (AI 17)
    pub static ref DATE_YYMMDD: Regex = Regex::new(
        r"^([0-9]{2})([0-9]{2})([0-9]{2})$"
    ).unwrap();

    // ISO date, as printed next to an "Expiry:" label
    pub static ref DATE_ISO: Regex = Regex::new(
        r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$"
    ).unwrap();
}
