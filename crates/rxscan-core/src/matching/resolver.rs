//! Tiered candidate selection.

use tracing::debug;

use crate::models::config::MatchPolicy;
use crate::models::record::{CandidateRecord, MatchReport, MatchTier};
use crate::models::scan::DecodedScan;

use super::compare::{dates_equal, exact_equal, lot_equal};

/// Resolve a scan with the default policy.
pub fn resolve(scan: &DecodedScan, candidates: &[CandidateRecord]) -> MatchReport {
    MatchResolver::new().resolve(scan, candidates)
}

/// Picks the best candidate for a scan.
///
/// Tiers are searched from most to least specific (GTIN+lot+serial, then
/// GTIN+lot, then GTIN alone). Within a tier the first candidate in input
/// order wins, so callers control tie-breaks through ordering.
#[derive(Debug, Clone, Default)]
pub struct MatchResolver {
    policy: MatchPolicy,
}

impl MatchResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    /// Set whether a GTIN-only hit counts as a match.
    pub fn with_gtin_only(mut self, accept: bool) -> Self {
        self.policy.accept_gtin_only = accept;
        self
    }

    pub fn resolve(&self, scan: &DecodedScan, candidates: &[CandidateRecord]) -> MatchReport {
        let Some(gtin) = scan.gtin.as_deref() else {
            debug!("Scan has no GTIN, skipping {} candidates", candidates.len());
            return MatchReport::no_match();
        };

        let lot = scan.lot_number.as_deref();
        let serial = scan.serial_number.as_deref();

        let gtin_hit = |c: &&CandidateRecord| exact_equal(Some(gtin), &c.gtin);
        let lot_hit = |c: &&CandidateRecord| lot_equal(lot, &c.lot_number);
        let serial_hit = |c: &&CandidateRecord| exact_equal(serial, &c.serial_number);

        let selection = candidates
            .iter()
            .find(|c| gtin_hit(c) && lot_hit(c) && serial_hit(c))
            .map(|c| (c, MatchTier::Exact))
            .or_else(|| {
                candidates
                    .iter()
                    .find(|c| gtin_hit(c) && lot_hit(c))
                    .map(|c| (c, MatchTier::GtinLot))
            })
            .or_else(|| {
                candidates
                    .iter()
                    .find(gtin_hit)
                    .map(|c| (c, MatchTier::GtinOnly))
            });

        let Some((record, tier)) = selection else {
            debug!("No candidate among {} shares GTIN {}", candidates.len(), gtin);
            return MatchReport::no_match();
        };

        let matches = match tier {
            MatchTier::GtinOnly => self.policy.accept_gtin_only,
            MatchTier::None => false,
            MatchTier::Exact | MatchTier::GtinLot => true,
        };

        debug!(
            "Selected {} {} via {} tier (matches: {})",
            record.gtin,
            record.serial_number,
            tier.label(),
            matches
        );

        MatchReport {
            matched_record: Some(record.clone()),
            tier,
            gtin_match: exact_equal(scan.gtin.as_deref(), &record.gtin),
            lot_match: lot_equal(lot, &record.lot_number),
            serial_match: exact_equal(serial, &record.serial_number),
            expiration_match: dates_equal(scan.expiration_date, record.expiration_date),
            matches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn exp() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 30).unwrap()
    }

    fn record(gtin: &str, lot: &str, serial: &str) -> CandidateRecord {
        CandidateRecord::new(gtin, lot, serial, exp())
    }

    fn scan(gtin: Option<&str>, lot: Option<&str>, serial: Option<&str>) -> DecodedScan {
        DecodedScan {
            gtin: gtin.map(str::to_string),
            lot_number: lot.map(str::to_string),
            serial_number: serial.map(str::to_string),
            expiration_date: Some(exp()),
            ndc: None,
            is_gs1_format: true,
        }
    }

    #[test]
    fn test_exact_match_selects_matching_serial() {
        let candidates = vec![record("X", "A", "1"), record("X", "A", "2")];
        let report = resolve(&scan(Some("X"), Some("A"), Some("2")), &candidates);

        assert_eq!(
            report,
            MatchReport {
                matched_record: Some(candidates[1].clone()),
                tier: MatchTier::Exact,
                gtin_match: true,
                lot_match: true,
                serial_match: true,
                expiration_match: true,
                matches: true,
            }
        );
    }

    #[test]
    fn test_exact_tier_beats_earlier_gtin_only() {
        let candidates = vec![record("X", "OTHER", "9"), record("X", "A", "2")];
        let report = resolve(&scan(Some("X"), Some("A"), Some("2")), &candidates);

        assert_eq!(report.matched_record.as_ref(), Some(&candidates[1]));
        assert_eq!(report.tier, MatchTier::Exact);
    }

    #[test]
    fn test_gtin_lot_tier_reports_serial_mismatch() {
        let candidates = vec![record("X", "B", "1"), record("X", "a", "7")];
        let report = resolve(&scan(Some("X"), Some("A"), Some("2")), &candidates);

        assert_eq!(report.matched_record.as_ref(), Some(&candidates[1]));
        assert_eq!(report.tier, MatchTier::GtinLot);
        assert!(report.matches);
        assert!(report.lot_match);
        assert!(!report.serial_match);
        assert_eq!(report.discrepancies(), vec!["serial_number"]);
    }

    #[test]
    fn test_gtin_only_tier_picks_first_in_order() {
        let candidates = vec![
            record("Y", "A", "2"),
            record("X", "B", "1"),
            record("X", "C", "2"),
        ];
        let report = resolve(&scan(Some("X"), Some("A"), Some("2")), &candidates);

        assert_eq!(report.matched_record.as_ref(), Some(&candidates[1]));
        assert_eq!(report.tier, MatchTier::GtinOnly);
        assert!(report.matches);
        assert!(report.gtin_match);
        assert!(!report.lot_match);
        assert!(!report.serial_match);
        assert!(report.expiration_match);
    }

    #[test]
    fn test_gtin_only_rejected_by_policy() {
        let candidates = vec![record("X", "B", "1")];
        let report = MatchResolver::new()
            .with_gtin_only(false)
            .resolve(&scan(Some("X"), None, None), &candidates);

        assert!(!report.matches);
        assert_eq!(report.tier, MatchTier::GtinOnly);
        assert_eq!(report.matched_record.as_ref(), Some(&candidates[0]));
    }

    #[test]
    fn test_no_gtin_never_matches() {
        let candidates = vec![record("X", "A", "2")];
        let report = resolve(&scan(None, Some("A"), Some("2")), &candidates);

        assert_eq!(report, MatchReport::no_match());
    }

    #[test]
    fn test_empty_candidates() {
        let report = resolve(&scan(Some("X"), Some("A"), Some("2")), &[]);
        assert_eq!(report, MatchReport::no_match());
    }

    #[test]
    fn test_no_shared_gtin() {
        let candidates = vec![record("Y", "A", "2")];
        let report = resolve(&scan(Some("X"), Some("A"), Some("2")), &candidates);

        assert!(!report.matches);
        assert!(report.matched_record.is_none());
        assert!(!report.gtin_match && !report.lot_match && !report.serial_match && !report.expiration_match);
    }

    #[test]
    fn test_missing_scan_fields_are_non_matches() {
        let candidates = vec![record("X", "A", "2")];
        let mut partial = scan(Some("X"), None, None);
        partial.expiration_date = None;
        let report = resolve(&partial, &candidates);

        assert_eq!(report.tier, MatchTier::GtinOnly);
        assert!(report.gtin_match);
        assert!(!report.lot_match);
        assert!(!report.serial_match);
        assert!(!report.expiration_match);
    }

    #[test]
    fn test_expiration_compared_by_date() {
        let mut candidate = record("X", "A", "2");
        candidate.expiration_date = NaiveDate::from_ymd_opt(2027, 1, 31).unwrap();
        let report = resolve(&scan(Some("X"), Some("A"), Some("2")), &[candidate]);

        assert_eq!(report.tier, MatchTier::Exact);
        assert!(!report.expiration_match);
        assert!(report.matches);
    }
}
