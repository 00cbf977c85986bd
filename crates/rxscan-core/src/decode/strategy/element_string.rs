//! Raw GS1 element strings such as `0100301430957010211001...`.

use tracing::trace;

use super::{PartialScan, ScanStrategy};
use crate::decode::rules::{ElementStringSegmenter, SegmentMode};

/// Strict AI grammar: the whole input must be AI fields and separators.
#[derive(Debug, Clone, Default)]
pub struct ElementStringStrategy {
    segmenter: ElementStringSegmenter,
}

impl ElementStringStrategy {
    pub fn new(max_variable_length: usize) -> Self {
        Self {
            segmenter: ElementStringSegmenter::new(max_variable_length),
        }
    }
}

impl ScanStrategy for ElementStringStrategy {
    fn name(&self) -> &'static str {
        "element-string"
    }

    fn is_strict(&self) -> bool {
        true
    }

    fn parse(&self, raw: &str) -> Option<PartialScan> {
        let segmentation = self.segmenter.segment(raw.trim(), SegmentMode::Strict)?;
        trace!("element string split into {} fields", segmentation.fields.len());

        let mut partial = PartialScan::default();
        partial.fill_from(&segmentation);
        partial.into_option()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_line_endings() {
        let partial = ElementStringStrategy::default()
            .parse("0100301430957010\u{1d}10ABC\r\n")
            .unwrap();

        assert_eq!(partial.gtin.as_deref(), Some("00301430957010"));
        assert_eq!(partial.lot_number.as_deref(), Some("ABC"));
    }

    #[test]
    fn test_rejects_free_text() {
        assert!(ElementStringStrategy::default()
            .parse("GTIN: 00301430957010")
            .is_none());
    }
}
