//! Loading expected inventory records from flattened JSON or CSV files.

use std::fs;
use std::path::Path;

use tracing::debug;

use rxscan_core::CandidateRecord;

/// Read candidate records, keeping file order.
///
/// `.json` files hold an array of records; `.csv` files carry the header
/// `gtin,lot_number,serial_number,expiration_date` with ISO dates.
pub fn load_candidates(path: &Path) -> anyhow::Result<Vec<CandidateRecord>> {
    if !path.exists() {
        anyhow::bail!("Candidates file not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let records = match extension.as_str() {
        "json" => {
            let content = fs::read_to_string(path)?;
            serde_json::from_str::<Vec<CandidateRecord>>(&content)?
        }
        "csv" => {
            let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
            rdr.deserialize().collect::<Result<Vec<CandidateRecord>, _>>()?
        }
        _ => anyhow::bail!("Unsupported candidates format: {}", extension),
    };

    debug!("Loaded {} candidates from {}", records.len(), path.display());

    Ok(records)
}
