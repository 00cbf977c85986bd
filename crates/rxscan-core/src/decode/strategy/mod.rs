//! Input grammars, tried in order by the decoder.

mod element_string;
mod free_text;
mod key_value;

pub use element_string::ElementStringStrategy;
pub use free_text::FreeTextStrategy;
pub use key_value::KeyValueStrategy;

use super::rules::{ApplicationIdentifier, Segmentation};

/// Raw field values recovered by one grammar, before validation and date
/// normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialScan {
    pub gtin: Option<String>,
    pub lot_number: Option<String>,
    pub serial_number: Option<String>,
    /// Unparsed expiration, normally `YYMMDD`.
    pub expiration: Option<String>,
    /// The expiration came from a text label, which may also spell it
    /// `YYYY-MM-DD`.
    pub expiration_labeled: bool,
}

impl PartialScan {
    /// Whether no field at all was recovered.
    pub fn is_empty(&self) -> bool {
        self.gtin.is_none()
            && self.lot_number.is_none()
            && self.serial_number.is_none()
            && self.expiration.is_none()
    }

    /// Fill fields that are still absent from `segmentation`.
    pub fn fill_from(&mut self, segmentation: &Segmentation) {
        let take = |ai| segmentation.get(ai).map(str::to_string);

        if self.gtin.is_none() {
            self.gtin = take(ApplicationIdentifier::Gtin);
        }
        if self.lot_number.is_none() {
            self.lot_number = take(ApplicationIdentifier::Lot);
        }
        if self.serial_number.is_none() {
            self.serial_number = take(ApplicationIdentifier::Serial);
        }
        if self.expiration.is_none() {
            self.expiration = take(ApplicationIdentifier::Expiration);
        }
    }

    fn into_option(self) -> Option<Self> {
        if self.is_empty() { None } else { Some(self) }
    }
}

/// One input grammar.
///
/// Strategies are pure: the same input always yields the same partial result.
pub trait ScanStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether a GTIN recovered by this grammar marks the scan as GS1 format.
    fn is_strict(&self) -> bool;

    /// Recover whatever fields this grammar can find, or `None` if the input
    /// does not fit it at all.
    fn parse(&self, raw: &str) -> Option<PartialScan>;
}
