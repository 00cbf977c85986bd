//! GS1 scan decoder folding the input grammars in priority order.

use tracing::{debug, warn};

use crate::error::DecodeError;
use crate::models::config::DecoderConfig;
use crate::models::scan::DecodedScan;

use super::rules::{dates, gtin};
use super::strategy::{
    ElementStringStrategy, FreeTextStrategy, KeyValueStrategy, PartialScan, ScanStrategy,
};
use super::{Result, ScanDecoder};

/// Decode a raw scan with the default configuration.
pub fn decode(raw: &str) -> Result<DecodedScan> {
    Gs1Decoder::new().decode(raw)
}

/// Decoder for pharmaceutical GS1 scans.
///
/// Grammars are tried in order: `KEY=VALUE` pairs, a complete AI element
/// string, then tolerant free text. The first one that yields a usable GTIN
/// wins; its other fields are taken as-is, with no merging across grammars.
pub struct Gs1Decoder {
    config: DecoderConfig,
    strategies: Vec<Box<dyn ScanStrategy>>,
}

impl Gs1Decoder {
    /// Create a decoder with default settings.
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    /// Create a decoder from explicit settings.
    pub fn with_config(config: DecoderConfig) -> Self {
        let strategies: Vec<Box<dyn ScanStrategy>> = vec![
            Box::new(KeyValueStrategy),
            Box::new(ElementStringStrategy::new(config.max_variable_length)),
            Box::new(FreeTextStrategy::new(
                config.max_variable_length,
                config.validate_check_digit,
            )),
        ];

        Self { config, strategies }
    }

    /// Set the two-digit year pivot.
    pub fn with_century_pivot(mut self, pivot: u8) -> Self {
        self.config.century_pivot = pivot;
        self
    }

    /// Set NDC derivation.
    pub fn with_ndc(mut self, derive: bool) -> Self {
        self.config.derive_ndc = derive;
        self
    }

    fn usable_gtin(&self, candidate: &str) -> bool {
        gtin::is_gtin14(candidate)
            && (!self.config.validate_check_digit || gtin::has_valid_check_digit(candidate))
    }

    fn finish(&self, partial: PartialScan, gtin: String, is_gs1_format: bool) -> DecodedScan {
        let expiration_date = partial.expiration.as_deref().and_then(|raw| {
            let date = if partial.expiration_labeled {
                dates::parse_expiration(raw, self.config.century_pivot)
            } else {
                dates::parse_yymmdd(raw.trim(), self.config.century_pivot)
            };
            if date.is_none() {
                warn!("Discarding invalid expiration date {:?}", raw);
            }
            date
        });

        let ndc = if self.config.derive_ndc {
            gtin::derive_ndc(&gtin)
        } else {
            None
        };

        DecodedScan {
            gtin: Some(gtin),
            lot_number: partial.lot_number,
            serial_number: partial.serial_number,
            expiration_date,
            ndc,
            is_gs1_format,
        }
    }
}

impl Default for Gs1Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanDecoder for Gs1Decoder {
    fn decode(&self, raw: &str) -> Result<DecodedScan> {
        debug!("Decoding {} characters of scan data", raw.len());

        for strategy in &self.strategies {
            let Some(mut partial) = strategy.parse(raw) else {
                debug!("{}: no fields", strategy.name());
                continue;
            };

            match partial.gtin.take() {
                Some(gtin) if self.usable_gtin(&gtin) => {
                    debug!("{}: decoded GTIN {}", strategy.name(), gtin);
                    return Ok(self.finish(partial, gtin, strategy.is_strict()));
                }
                Some(gtin) => debug!("{}: rejected GTIN {:?}", strategy.name(), gtin),
                None => debug!("{}: fields found but no GTIN", strategy.name()),
            }
        }

        Err(DecodeError::Unrecognized(raw.to_string()))
    }
}
