//! Labeled values in descriptive text, e.g. `Serial Number: ABC123`.

use regex::Regex;

use super::patterns::{EXPIRY_LABEL, GTIN_LABEL, LOT_LABEL, SERIAL_LABEL};
use super::{gtin, ExtractionMatch, FieldExtractor};

/// Extracts the value following a field label.
///
/// The first capture group of `pattern` is the value. Candidates rejected by
/// `accept` are passed over so a later, well-formed occurrence can still win.
pub struct LabeledFieldExtractor {
    pattern: &'static Regex,
    accept: fn(&str) -> bool,
}

impl LabeledFieldExtractor {
    /// `GTIN: <14 digits>`.
    pub fn gtin() -> Self {
        Self {
            pattern: &GTIN_LABEL,
            accept: gtin::is_gtin14,
        }
    }

    /// GTIN label whose value must also carry a valid check digit.
    pub fn checked_gtin() -> Self {
        Self {
            pattern: &GTIN_LABEL,
            accept: |value| gtin::is_gtin14(value) && gtin::has_valid_check_digit(value),
        }
    }

    /// `Serial Number: ...`, `Serial No: ...`, `SN: ...`.
    pub fn serial() -> Self {
        Self {
            pattern: &SERIAL_LABEL,
            accept: |_| true,
        }
    }

    /// `Lot Number: ...`, `Lot: ...`, `Batch: ...`.
    pub fn lot() -> Self {
        Self {
            pattern: &LOT_LABEL,
            accept: |_| true,
        }
    }

    /// `Expiration Date: ...`, `Expiry: ...`, `EXP: ...` holding `YYMMDD` or
    /// `YYYY-MM-DD`. Calendar validity is checked later, during normalization.
    pub fn expiration() -> Self {
        Self {
            pattern: &EXPIRY_LABEL,
            accept: looks_like_date,
        }
    }
}

/// Six digits, or eight digits with dashes.
fn looks_like_date(value: &str) -> bool {
    let digits = value.bytes().filter(u8::is_ascii_digit).count();
    (digits == 6 || digits == 8) && value.bytes().all(|b| b.is_ascii_digit() || b == b'-')
}

impl FieldExtractor for LabeledFieldExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.pattern
            .captures_iter(text)
            .filter(|caps| (self.accept)(&caps[1]))
            .filter_map(|caps| {
                let full_match = caps.get(0)?;
                Some(
                    ExtractionMatch::new(caps[1].to_string())
                        .with_position(full_match.start(), full_match.end()),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_labels() {
        let extractor = LabeledFieldExtractor::serial();

        for text in [
            "Serial Number: ABC123",
            "serial number:ABC123",
            "SERIAL: ABC123, next",
            "Serial No.: ABC123",
            "sn: ABC123\nLot: 1",
        ] {
            let found = extractor.extract(text);
            assert_eq!(found.map(|m| m.value), Some("ABC123".to_string()), "{text}");
        }
    }

    #[test]
    fn test_lot_labels() {
        let extractor = LabeledFieldExtractor::lot();

        assert_eq!(extractor.extract("Lot Number: 24052241").unwrap().value, "24052241");
        assert_eq!(extractor.extract("BATCH: x-7,").unwrap().value, "x-7");
        assert!(extractor.extract("Lottery: 5").is_none());
    }

    #[test]
    fn test_gtin_label_skips_malformed_value() {
        let extractor = LabeledFieldExtractor::gtin();
        let text = "GTIN: 1234567890123 (old) GTIN: 00301430957010";

        let found = extractor.extract(text).unwrap();
        assert_eq!(found.value, "00301430957010");
        let (start, end) = found.position.unwrap();
        assert_eq!(&text[start..end], "GTIN: 00301430957010");
    }

    #[test]
    fn test_checked_gtin_label() {
        assert!(LabeledFieldExtractor::checked_gtin()
            .extract("GTIN: 00301430957010")
            .is_none());
        assert!(LabeledFieldExtractor::checked_gtin()
            .extract("GTIN: 04006381333931")
            .is_some());
    }

    #[test]
    fn test_expiration_labels() {
        let extractor = LabeledFieldExtractor::expiration();

        assert_eq!(extractor.extract("Expiration Date: 260930").unwrap().value, "260930");
        assert_eq!(extractor.extract("Expiry: 2026-09-30").unwrap().value, "2026-09-30");
        assert_eq!(extractor.extract("EXP: 261399").unwrap().value, "261399");
        assert!(extractor.extract("Exp: soon").is_none());
        assert!(extractor.extract("Export: 260930").is_none());
    }
}
