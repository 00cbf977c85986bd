//! Structured result of decoding a scanned GS1 element string.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Product identity recovered from one scan event.
///
/// Every field is optional from the start so that downstream matching can
/// treat an absent value as a non-match instead of special-casing it. A scan
/// returned by the decoder always carries a GTIN.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedScan {
    /// Global Trade Item Number, exactly 14 digits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,

    /// Lot / batch number (AI 10).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_number: Option<String>,

    /// Unit serial number (AI 21).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,

    /// Expiration date with the century already resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,

    /// US National Drug Code derived from a `003` GTIN, formatted `XXXXX-XXXX`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ndc: Option<String>,

    /// Whether the input matched one of the strict grammars
    /// (`KEY=VALUE` pairs or a complete AI element string).
    pub is_gs1_format: bool,
}

impl DecodedScan {
    /// Names of the optional fields that could not be recovered.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.gtin.is_none() {
            missing.push("gtin");
        }
        if self.lot_number.is_none() {
            missing.push("lot_number");
        }
        if self.serial_number.is_none() {
            missing.push("serial_number");
        }
        if self.expiration_date.is_none() {
            missing.push("expiration_date");
        }
        missing
    }
}
