//! Decode command - turn raw scanner text into structured fields.

use std::io::{self, BufRead};

use clap::Args;
use console::style;
use tracing::{info, warn};

use rxscan_core::{Gs1Decoder, ScanDecoder};

use super::{format_scan_text, load_config, OutputFormat};

/// Arguments for the decode command.
#[derive(Args)]
pub struct DecodeArgs {
    /// Raw scans to decode
    #[arg(required_unless_present = "stdin")]
    raw: Vec<String>,

    /// Read one scan per line from standard input
    #[arg(long)]
    stdin: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

pub async fn run(args: DecodeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let decoder = Gs1Decoder::with_config(config.decoder);

    let mut inputs = args.raw;
    if args.stdin {
        for line in io::stdin().lock().lines() {
            let line = line?;
            if !line.trim().is_empty() {
                inputs.push(line);
            }
        }
    }

    info!("Decoding {} scans", inputs.len());

    let mut failed = 0usize;
    for (index, raw) in inputs.iter().enumerate() {
        match decoder.decode(raw) {
            Ok(scan) => match args.format {
                OutputFormat::Json => println!("{}", serde_json::to_string(&scan)?),
                OutputFormat::Text => {
                    if index > 0 {
                        println!();
                    }
                    print!("{}", format_scan_text(&scan));
                }
            },
            Err(e) => {
                failed += 1;
                warn!("Scan {} failed to decode", index + 1);
                eprintln!("{} {}", style("✗").red(), e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} scans failed to decode", failed, inputs.len());
    }

    Ok(())
}
