//! GTIN-14 validation and NDC derivation.

use super::patterns::GTIN14;

/// Whether `value` is exactly 14 ASCII digits. Shorter codes (UPC-A, EAN-13)
/// are not padded.
pub fn is_gtin14(value: &str) -> bool {
    GTIN14.is_match(value)
}

/// Compute the GS1 mod-10 check digit over the first 13 digits of a GTIN-14.
pub fn gtin_check_digit(gtin: &str) -> Option<u8> {
    if !is_gtin14(gtin) {
        return None;
    }

    let sum: u32 = gtin[..13]
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 0 { digit * 3 } else { digit }
        })
        .sum();

    Some(((10 - sum % 10) % 10) as u8)
}

/// Whether the last digit of `gtin` matches its computed check digit.
pub fn has_valid_check_digit(gtin: &str) -> bool {
    match (gtin_check_digit(gtin), gtin.bytes().last()) {
        (Some(expected), Some(last)) => expected == last - b'0',
        _ => false,
    }
}

/// Derive the US National Drug Code from a GTIN.
///
/// Only GTINs starting with `003` embed an NDC: digits 4 through 12 hold it,
/// rendered as `XXXXX-XXXX`.
pub fn derive_ndc(gtin: &str) -> Option<String> {
    if !is_gtin14(gtin) || !gtin.starts_with("003") {
        return None;
    }

    let ndc = &gtin[3..12];
    Some(format!("{}-{}", &ndc[..5], &ndc[5..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_gtin14() {
        assert!(is_gtin14("00301430957010"));
        assert!(!is_gtin14("0301430957010"));
        assert!(!is_gtin14("003014309570101"));
        assert!(!is_gtin14("0030143095701A"));
        assert!(!is_gtin14(""));
    }

    #[test]
    fn test_check_digit() {
        assert_eq!(gtin_check_digit("04006381333931"), Some(1));
        assert!(has_valid_check_digit("04006381333931"));
        assert!(!has_valid_check_digit("04006381333932"));
        // Real-world label data with a non-conforming check digit.
        assert!(!has_valid_check_digit("00301430957010"));
        assert_eq!(gtin_check_digit("123"), None);
    }

    #[test]
    fn test_derive_ndc() {
        assert_eq!(derive_ndc("00301430957010"), Some("01430-9570".to_string()));
        assert_eq!(derive_ndc("04006381333931"), None);
        assert_eq!(derive_ndc("003014"), None);
    }
}
