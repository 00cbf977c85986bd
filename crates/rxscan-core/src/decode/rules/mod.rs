//! Rule-based field extractors for GS1 scan data.

pub mod dates;
pub mod element;
pub mod gtin;
pub mod labels;
pub mod patterns;

pub use dates::{expand_two_digit_year, parse_expiration, parse_yymmdd};
pub use element::{AiField, ApplicationIdentifier, ElementStringSegmenter, FieldLength, SegmentMode, Segmentation};
pub use gtin::{derive_ndc, gtin_check_digit, has_valid_check_digit, is_gtin14};
pub use labels::LabeledFieldExtractor;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value pulled out of free text, with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range of the whole match in the source text.
    pub position: Option<(usize, usize)>,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
