//! Match command - decode one scan and resolve it against candidates.

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use rxscan_core::{DecodedScan, Gs1Decoder, MatchReport, MatchResolver, ScanDecoder};

use super::candidates::load_candidates;
use super::{format_scan_text, load_config, OutputFormat};

/// Arguments for the match command.
#[derive(Args)]
pub struct MatchArgs {
    /// Raw scan to decode
    raw: String,

    /// Candidate records (.json or .csv)
    #[arg(long, required = true)]
    candidates: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct MatchOutput<'a> {
    scan: &'a DecodedScan,
    report: &'a MatchReport,
}

pub async fn run(args: MatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let candidates = load_candidates(&args.candidates)?;

    let scan = Gs1Decoder::with_config(config.decoder).decode(&args.raw)?;
    let report = MatchResolver::with_policy(config.matching).resolve(&scan, &candidates);

    info!(
        "Resolved against {} candidates: tier {}",
        candidates.len(),
        report.tier.label()
    );

    match args.format {
        OutputFormat::Json => {
            let output = MatchOutput { scan: &scan, report: &report };
            println!("{}", serde_json::to_string(&output)?);
        }
        OutputFormat::Text => print!("{}", format_match_text(&scan, &report)),
    }

    Ok(())
}

fn format_match_text(scan: &DecodedScan, report: &MatchReport) -> String {
    let mut output = format_scan_text(scan);
    output.push('\n');

    let verdict = if report.matches {
        style("MATCH").green()
    } else {
        style("NO MATCH").red()
    };
    output.push_str(&format!("Result:     {} ({})\n", verdict, report.tier.label()));

    if let Some(record) = &report.matched_record {
        output.push_str(&format!(
            "Record:     {} / {} / {} / {}\n",
            record.gtin, record.lot_number, record.serial_number, record.expiration_date
        ));
    }

    let discrepancies = report.discrepancies();
    if !discrepancies.is_empty() {
        output.push_str(&format!("Mismatched: {}\n", discrepancies.join(", ")));
    }

    output
}
