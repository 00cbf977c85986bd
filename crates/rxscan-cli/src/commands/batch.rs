//! Batch command - resolve every scan listed in one or more files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use rxscan_core::{DecodedScan, Gs1Decoder, MatchReport, MatchResolver, ScanDecoder};

use super::candidates::load_candidates;
use super::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Scan files or glob pattern (one raw scan per line)
    #[arg(required = true)]
    scans: String,

    /// Candidate records (.json or .csv)
    #[arg(long, required = true)]
    candidates: PathBuf,

    /// CSV report path
    #[arg(short, long, default_value = "rxscan-report.csv")]
    output: PathBuf,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// One raw scan and where it came from.
struct ScanLine {
    path: PathBuf,
    line: usize,
    raw: String,
}

/// Result of resolving a single scan line.
struct ScanResult {
    source: ScanLine,
    outcome: Result<(DecodedScan, MatchReport), String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let candidates = load_candidates(&args.candidates)?;

    let files: Vec<PathBuf> = glob(&args.scans)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.scans);
    }

    let mut lines = Vec::new();
    for path in &files {
        lines.extend(read_scan_lines(path)?);
    }

    println!(
        "{} Found {} scans in {} files, {} candidates",
        style("ℹ").blue(),
        lines.len(),
        files.len(),
        candidates.len()
    );

    let pb = ProgressBar::new(lines.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} scans")?
            .progress_chars("=>-"),
    );

    let decoder = Gs1Decoder::with_config(config.decoder);
    let resolver = MatchResolver::with_policy(config.matching);

    let mut results = Vec::with_capacity(lines.len());
    for source in lines {
        let outcome = match decoder.decode(&source.raw) {
            Ok(scan) => {
                let report = resolver.resolve(&scan, &candidates);
                Ok((scan, report))
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("{}:{}: {}", source.path.display(), source.line, error_msg);
                    Err(error_msg)
                } else {
                    pb.abandon();
                    error!("{}:{}: {}", source.path.display(), source.line, error_msg);
                    anyhow::bail!(
                        "Decoding failed at {}:{}: {}",
                        source.path.display(),
                        source.line,
                        error_msg
                    );
                }
            }
        };

        results.push(ScanResult { source, outcome });
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    write_report(&args.output, &results)?;
    println!(
        "{} Report written to {}",
        style("✓").green(),
        args.output.display()
    );

    let matched = results
        .iter()
        .filter(|r| matches!(&r.outcome, Ok((_, report)) if report.matches))
        .count();
    let failed: Vec<_> = results.iter().filter(|r| r.outcome.is_err()).collect();
    let unmatched = results.len() - matched - failed.len();

    println!();
    println!(
        "{} Processed {} scans in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} matched, {} unmatched, {} failed",
        style(matched).green(),
        style(unmatched).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed scans:").red());
        for result in &failed {
            if let Err(error_msg) = &result.outcome {
                println!(
                    "  - {}:{}: {}",
                    result.source.path.display(),
                    result.source.line,
                    error_msg
                );
            }
        }
    }

    Ok(())
}

fn read_scan_lines(path: &Path) -> anyhow::Result<Vec<ScanLine>> {
    let content = fs::read_to_string(path)?;

    let lines: Vec<ScanLine> = content
        .lines()
        .enumerate()
        .filter(|(_, raw)| !raw.trim().is_empty())
        .map(|(i, raw)| ScanLine {
            path: path.to_path_buf(),
            line: i + 1,
            raw: raw.to_string(),
        })
        .collect();

    debug!("Read {} scans from {}", lines.len(), path.display());

    Ok(lines)
}

fn write_report(path: &Path, results: &[ScanResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "file",
        "line",
        "status",
        "tier",
        "gtin",
        "lot_number",
        "serial_number",
        "expiration_date",
        "matched_serial",
        "discrepancies",
        "error",
    ])?;

    for result in results {
        let file = result.source.path.display().to_string();
        let line = result.source.line.to_string();

        match &result.outcome {
            Ok((scan, report)) => {
                let status = if report.matches { "matched" } else { "unmatched" };
                let expiration = scan.expiration_date.map(|d| d.to_string()).unwrap_or_default();
                let discrepancies = report.discrepancies().join(";");
                wtr.write_record([
                    file.as_str(),
                    line.as_str(),
                    status,
                    report.tier.label(),
                    scan.gtin.as_deref().unwrap_or(""),
                    scan.lot_number.as_deref().unwrap_or(""),
                    scan.serial_number.as_deref().unwrap_or(""),
                    expiration.as_str(),
                    report
                        .matched_record
                        .as_ref()
                        .map(|r| r.serial_number.as_str())
                        .unwrap_or(""),
                    discrepancies.as_str(),
                    "",
                ])?;
            }
            Err(error_msg) => {
                wtr.write_record([
                    file.as_str(),
                    line.as_str(),
                    "error",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    error_msg.as_str(),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
