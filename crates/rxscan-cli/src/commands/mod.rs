//! Subcommand implementations and the helpers they share.

pub mod batch;
pub mod candidates;
pub mod config;
pub mod decode;
pub mod resolve;

use std::path::{Path, PathBuf};

use tracing::debug;

use rxscan_core::{DecodedScan, RxScanConfig};

/// Output format for single-scan commands.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON document per scan
    Json,
    /// Human-readable summary
    Text,
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rxscan")
        .join("config.json")
}

/// Load the config named by `--config`, else the default file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RxScanConfig> {
    if let Some(path) = config_path {
        debug!("Loading config from {}", path);
        return Ok(RxScanConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(RxScanConfig::from_file(&default_path)?)
    } else {
        Ok(RxScanConfig::default())
    }
}

pub fn format_scan_text(scan: &DecodedScan) -> String {
    let mut output = String::new();

    output.push_str(&format!("GTIN:       {}\n", or_dash(scan.gtin.as_deref())));
    if let Some(ndc) = &scan.ndc {
        output.push_str(&format!("NDC:        {}\n", ndc));
    }
    output.push_str(&format!("Lot:        {}\n", or_dash(scan.lot_number.as_deref())));
    output.push_str(&format!("Serial:     {}\n", or_dash(scan.serial_number.as_deref())));
    output.push_str(&format!(
        "Expiration: {}\n",
        scan.expiration_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string())
    ));
    output.push_str(&format!(
        "Format:     {}\n",
        if scan.is_gs1_format { "GS1" } else { "free text" }
    ));

    output
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_scan_text() {
        let scan = DecodedScan {
            gtin: Some("00301430957010".to_string()),
            lot_number: None,
            serial_number: Some("ABC".to_string()),
            expiration_date: NaiveDate::from_ymd_opt(2026, 9, 30),
            ndc: Some("01430-9570".to_string()),
            is_gs1_format: true,
        };

        let text = format_scan_text(&scan);
        assert!(text.contains("GTIN:       00301430957010"));
        assert!(text.contains("NDC:        01430-9570"));
        assert!(text.contains("Lot:        -"));
        assert!(text.contains("Expiration: 2026-09-30"));
        assert!(text.contains("Format:     GS1"));
    }

    #[test]
    fn test_load_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"matching": {"accept_gtin_only": false}}"#).unwrap();

        let config = load_config(path.to_str()).unwrap();
        assert!(!config.matching.accept_gtin_only);
        assert_eq!(config.decoder.century_pivot, 50);
    }
}
