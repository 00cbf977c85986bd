//! Expected serialized-inventory records and the field-level match report.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Expected values for one physical unit, as listed in an EPCIS document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Product GTIN.
    pub gtin: String,

    /// Lot / batch number.
    pub lot_number: String,

    /// Unit serial number.
    pub serial_number: String,

    /// Expiration date.
    pub expiration_date: NaiveDate,
}

impl CandidateRecord {
    pub fn new(
        gtin: impl Into<String>,
        lot_number: impl Into<String>,
        serial_number: impl Into<String>,
        expiration_date: NaiveDate,
    ) -> Self {
        Self {
            gtin: gtin.into(),
            lot_number: lot_number.into(),
            serial_number: serial_number.into(),
            expiration_date,
        }
    }
}

/// Priority level that selected the matched record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// GTIN, lot and serial all equal.
    Exact,
    /// GTIN and lot equal.
    GtinLot,
    /// Only the GTIN equal.
    GtinOnly,
    /// No candidate shares the GTIN.
    #[default]
    None,
}

impl MatchTier {
    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            MatchTier::Exact => "exact",
            MatchTier::GtinLot => "gtin+lot",
            MatchTier::GtinOnly => "gtin only",
            MatchTier::None => "none",
        }
    }
}

/// Outcome of resolving one scan against the candidate list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Record selected by the tiered search, if any.
    pub matched_record: Option<CandidateRecord>,

    /// Tier that produced the selection.
    pub tier: MatchTier,

    pub gtin_match: bool,
    pub lot_match: bool,
    pub serial_match: bool,
    pub expiration_match: bool,

    /// True iff a record was selected and the policy accepts its tier.
    pub matches: bool,
}

impl MatchReport {
    /// Report for a scan that shares no GTIN with any candidate.
    pub fn no_match() -> Self {
        Self::default()
    }

    /// Names of the fields that differ from the selected record.
    ///
    /// Empty when nothing was selected; the absence of a record is reported
    /// through `matches` instead.
    pub fn discrepancies(&self) -> Vec<&'static str> {
        if self.matched_record.is_none() {
            return Vec::new();
        }

        [
            ("gtin", self.gtin_match),
            ("lot_number", self.lot_match),
            ("serial_number", self.serial_match),
            ("expiration_date", self.expiration_match),
        ]
        .into_iter()
        .filter(|(_, matched)| !matched)
        .map(|(name, _)| name)
        .collect()
    }

    /// Whether every field agrees with the selected record.
    pub fn is_full_match(&self) -> bool {
        self.gtin_match && self.lot_match && self.serial_match && self.expiration_match
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CandidateRecord {
        CandidateRecord::new(
            "00301430957010",
            "24052241",
            "10016550749981",
            NaiveDate::from_ymd_opt(2026, 9, 30).unwrap(),
        )
    }

    #[test]
    fn test_discrepancies_empty_without_record() {
        assert!(MatchReport::no_match().discrepancies().is_empty());
        assert!(!MatchReport::no_match().matches);
    }

    #[test]
    fn test_discrepancies_lists_mismatched_fields() {
        let report = MatchReport {
            matched_record: Some(record()),
            tier: MatchTier::GtinLot,
            gtin_match: true,
            lot_match: true,
            serial_match: false,
            expiration_match: false,
            matches: true,
        };
        assert_eq!(report.discrepancies(), vec!["serial_number", "expiration_date"]);
        assert!(!report.is_full_match());
    }

    #[test]
    fn test_candidate_deserializes_iso_date() {
        let json = r#"{
            "gtin": "00301430957010",
            "lot_number": "24052241",
            "serial_number": "10016550749981",
            "expiration_date": "2026-09-30"
        }"#;
        let parsed: CandidateRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, record());
    }

    #[test]
    fn test_tier_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&MatchTier::GtinLot).unwrap(), "\"gtin_lot\"");
    }
}
