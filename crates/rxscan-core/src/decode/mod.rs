//! Scan decoding: raw scanner text to [`DecodedScan`].

mod parser;
pub mod rules;
pub mod strategy;

pub use parser::{decode, Gs1Decoder};
pub use strategy::{PartialScan, ScanStrategy};

use crate::error::DecodeError;
use crate::models::scan::DecodedScan;

/// Result type for decode operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Trait for scan decoders.
pub trait ScanDecoder {
    /// Decode one raw scan.
    fn decode(&self, raw: &str) -> Result<DecodedScan>;
}
