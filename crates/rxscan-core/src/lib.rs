//! Core library for pharmaceutical package scan verification.
//!
//! This crate provides:
//! - GS1 element string decoding (key-value, raw AI concatenation, free text)
//! - Expiration date normalization and NDC derivation
//! - Tiered matching of decoded scans against expected EPCIS inventory records

pub mod error;
pub mod models;
pub mod decode;
pub mod matching;

pub use error::{DecodeError, Result, RxScanError};
pub use models::config::{DecoderConfig, MatchPolicy, RxScanConfig};
pub use models::record::{CandidateRecord, MatchReport, MatchTier};
pub use models::scan::DecodedScan;
pub use decode::{decode, Gs1Decoder, ScanDecoder};
pub use matching::{resolve, MatchResolver};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_then_resolve() {
        let exp = NaiveDate::from_ymd_opt(2026, 9, 30).unwrap();
        let candidates = vec![
            CandidateRecord::new("00301430957010", "24052241", "10016550749980", exp),
            CandidateRecord::new("00301430957010", "24052241", "10016550749981", exp),
        ];

        let scan = decode("01003014309570102110016550749981102405224117260930").unwrap();
        let report = resolve(&scan, &candidates);

        assert_eq!(report.tier, MatchTier::Exact);
        assert_eq!(report.matched_record.as_ref(), Some(&candidates[1]));
        assert!(report.is_full_match());
    }

    #[test]
    fn test_configured_pipeline() {
        let mut config = RxScanConfig::default();
        config.matching.accept_gtin_only = false;

        let decoder = Gs1Decoder::with_config(config.decoder.clone());
        let resolver = MatchResolver::with_policy(config.matching.clone());

        let exp = NaiveDate::from_ymd_opt(2026, 9, 30).unwrap();
        let candidates = vec![CandidateRecord::new("00301430957010", "OTHER", "1", exp)];

        let scan = decoder.decode("GTIN=00301430957010&LOT=24052241&SN=7").unwrap();
        let report = resolver.resolve(&scan, &candidates);

        assert_eq!(report.tier, MatchTier::GtinOnly);
        assert!(!report.matches);
        assert_eq!(report.discrepancies(), vec!["lot_number", "serial_number", "expiration_date"]);
    }
}
