//! Descriptive text: labeled values first, AI prefixes as a fallback.

use tracing::trace;

use super::{PartialScan, ScanStrategy};
use crate::decode::rules::{
    ElementStringSegmenter, FieldExtractor, LabeledFieldExtractor, SegmentMode,
};

/// Tolerant grammar for scanner dumps and pasted text.
///
/// Each field is looked up by label (`Serial Number: ...`) first. Fields that
/// have no label are then searched for as AI-prefixed runs anywhere in the
/// text, with the labeled spans blanked out so the two sources never overlap.
pub struct FreeTextStrategy {
    gtin: LabeledFieldExtractor,
    serial: LabeledFieldExtractor,
    lot: LabeledFieldExtractor,
    expiration: LabeledFieldExtractor,
    segmenter: ElementStringSegmenter,
}

impl FreeTextStrategy {
    pub fn new(max_variable_length: usize, validate_check_digit: bool) -> Self {
        Self {
            gtin: if validate_check_digit {
                LabeledFieldExtractor::checked_gtin()
            } else {
                LabeledFieldExtractor::gtin()
            },
            serial: LabeledFieldExtractor::serial(),
            lot: LabeledFieldExtractor::lot(),
            expiration: LabeledFieldExtractor::expiration(),
            segmenter: ElementStringSegmenter::new(max_variable_length),
        }
    }
}

impl Default for FreeTextStrategy {
    fn default() -> Self {
        Self::new(20, false)
    }
}

impl ScanStrategy for FreeTextStrategy {
    fn name(&self) -> &'static str {
        "free-text"
    }

    fn is_strict(&self) -> bool {
        false
    }

    fn parse(&self, raw: &str) -> Option<PartialScan> {
        let mut partial = PartialScan::default();
        let mut spans = Vec::new();

        for (extractor, slot) in [
            (&self.gtin, &mut partial.gtin),
            (&self.serial, &mut partial.serial_number),
            (&self.lot, &mut partial.lot_number),
            (&self.expiration, &mut partial.expiration),
        ] {
            if let Some(found) = extractor.extract(raw) {
                spans.extend(found.position);
                *slot = Some(found.value);
            }
        }

        partial.expiration_labeled = partial.expiration.is_some();

        let labeled = spans.len();
        if labeled < 4 {
            let masked = blank_spans(raw, &spans);
            if let Some(segmentation) = self.segmenter.segment(&masked, SegmentMode::Lenient) {
                trace!(
                    "AI fallback found {} fields, skipped {} chars",
                    segmentation.fields.len(),
                    segmentation.skipped
                );
                partial.fill_from(&segmentation);
            }
        }

        trace!("free text: {} labeled fields", labeled);
        partial.into_option()
    }
}

/// Replace every character inside `spans` (byte ranges) with a space.
fn blank_spans(text: &str, spans: &[(usize, usize)]) -> String {
    text.char_indices()
        .map(|(i, c)| {
            if spans.iter().any(|&(start, end)| i >= start && i < end) {
                ' '
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_labeled_fields() {
        let text = "Product scan\nGTIN: 00301430957010\nSerial Number: ABC123\nLot: L-77, Expiry: 2026-09-30";
        let partial = FreeTextStrategy::default().parse(text).unwrap();

        assert_eq!(
            partial,
            PartialScan {
                gtin: Some("00301430957010".to_string()),
                lot_number: Some("L-77".to_string()),
                serial_number: Some("ABC123".to_string()),
                expiration: Some("2026-09-30".to_string()),
                expiration_labeled: true,
            }
        );
    }

    #[test]
    fn test_ai_fallback_for_unlabeled_fields() {
        let text = "Serial Number: XYZ9 raw: 0100301430957010 17260930 10LOT5";
        let partial = FreeTextStrategy::default().parse(text).unwrap();

        assert_eq!(partial.gtin.as_deref(), Some("00301430957010"));
        assert_eq!(partial.serial_number.as_deref(), Some("XYZ9"));
        assert_eq!(partial.lot_number.as_deref(), Some("LOT5"));
        assert_eq!(partial.expiration.as_deref(), Some("260930"));
        assert!(!partial.expiration_labeled);
    }

    #[test]
    fn test_fallback_prefers_gtin_over_more_fields() {
        // "21" "0" "10" "0301..." would give two fields but no GTIN.
        for text in ["scan: 2101003014309570101", "Lot: X 2101003014309570101"] {
            let partial = FreeTextStrategy::default().parse(text).unwrap();
            assert_eq!(partial.gtin.as_deref(), Some("00301430957010"), "{text}");
        }

        let partial = FreeTextStrategy::default()
            .parse("Lot: X 2101003014309570101")
            .unwrap();
        assert_eq!(partial.lot_number.as_deref(), Some("X"));
        assert_eq!(partial.serial_number, None);
    }

    #[test]
    fn test_label_wins_over_ai_prefix() {
        let text = "0100301430957010 21FROMAI Serial: FROMLABEL";
        let partial = FreeTextStrategy::default().parse(text).unwrap();

        assert_eq!(partial.serial_number.as_deref(), Some("FROMLABEL"));
        assert_eq!(partial.gtin.as_deref(), Some("00301430957010"));
    }

    #[test]
    fn test_labeled_values_are_not_reused_by_fallback() {
        // The labeled serial contains "10" but must not also yield a lot.
        let text = "GTIN: 00301430957010 SN: 1021X";
        let partial = FreeTextStrategy::default().parse(text).unwrap();

        assert_eq!(partial.serial_number.as_deref(), Some("1021X"));
        assert_eq!(partial.lot_number, None);
    }

    #[test]
    fn test_nothing_recognizable() {
        assert_eq!(FreeTextStrategy::default().parse("hello world"), None);
        assert_eq!(FreeTextStrategy::default().parse(""), None);
    }

    #[test]
    fn test_blank_spans_handles_multibyte() {
        assert_eq!(blank_spans("żab 12", &[(0, 2)]), " ab 12");
    }
}
