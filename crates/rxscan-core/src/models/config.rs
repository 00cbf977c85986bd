//! Configuration structures for decoding and matching.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::decode::rules::dates::DEFAULT_CENTURY_PIVOT;
use crate::error::{Result, RxScanError};

/// Main configuration for the rxscan pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RxScanConfig {
    /// Scan decoding configuration.
    pub decoder: DecoderConfig,

    /// Candidate matching policy.
    pub matching: MatchPolicy,
}

/// Decoder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Two-digit years below this value land in the 2000s, the rest in the 1900s.
    pub century_pivot: u8,

    /// Reject GTINs whose GS1 mod-10 check digit does not verify.
    pub validate_check_digit: bool,

    /// Derive an NDC from GTINs carrying the `003` prefix.
    pub derive_ndc: bool,

    /// Maximum length of a variable-length AI field (lot, serial).
    pub max_variable_length: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            century_pivot: DEFAULT_CENTURY_PIVOT,
            // Off: labels in the field are known to carry non-conforming check digits.
            validate_check_digit: false,
            derive_ndc: true,
            max_variable_length: 20,
        }
    }
}

/// Policy applied when resolving a scan against candidate records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPolicy {
    /// Treat a record sharing only the GTIN as a match.
    pub accept_gtin_only: bool,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            accept_gtin_only: true,
        }
    }
}

impl RxScanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.decoder.century_pivot > 100 {
            return Err(RxScanError::Config(format!(
                "decoder.century_pivot must be between 0 and 100, got {}",
                self.decoder.century_pivot
            )));
        }
        if self.decoder.max_variable_length == 0 {
            return Err(RxScanError::Config(
                "decoder.max_variable_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
