//! `GTIN=...&SN=...&LOT=...&EXP=...` as emitted by the scanning front end.

use super::{PartialScan, ScanStrategy};

/// Strict `KEY=VALUE&KEY=VALUE` grammar.
///
/// Keys are case-sensitive. Unknown keys are ignored, empty values count as
/// absent and the first occurrence of a key wins.
#[derive(Debug, Clone, Default)]
pub struct KeyValueStrategy;

impl ScanStrategy for KeyValueStrategy {
    fn name(&self) -> &'static str {
        "key-value"
    }

    fn is_strict(&self) -> bool {
        true
    }

    fn parse(&self, raw: &str) -> Option<PartialScan> {
        let raw = raw.trim();
        if !raw.contains('=') {
            return None;
        }

        let mut partial = PartialScan::default();

        for token in raw.split('&') {
            let Some((key, value)) = token.split_once('=') else {
                continue;
            };
            if value.is_empty() {
                continue;
            }

            let slot = match key {
                "GTIN" => &mut partial.gtin,
                "SN" => &mut partial.serial_number,
                "LOT" => &mut partial.lot_number,
                "EXP" => &mut partial.expiration,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }

        partial.into_option()
    }
}
