use super::{read_input, write_output};
use crate::LinkArgs;
use anyhow::Result;
use linkframe_core::{scanner::scan_stream_with_stats, scanner::ScanStats, DecodeOutcome};
use tracing::info;

/// Recover payloads from a possibly damaged wire stream
///
/// Good payloads are concatenated in stream order and written to `output`;
/// rejected frames are skipped. With `stats_only` nothing is written.
pub fn execute(
    input: &str,
    output: Option<&str>,
    link: &LinkArgs,
    stats_only: bool,
) -> Result<ScanStats> {
    info!("Unpacking file: {}", input);

    let config = link.resolve()?;
    let data = read_input(input)?;

    info!("File size: {} bytes", data.len());

    let (outcomes, stats) = scan_stream_with_stats(&config.decoder()?, &data);

    // Stats go to stderr so `-o -` keeps stdout clean
    eprintln!("\n=== Unpack Results ===");
    eprintln!("Bytes scanned:        {} bytes", stats.bytes_scanned);
    eprintln!("Valid frames:         {}", stats.frames_found);
    eprintln!("Empty frames:         {}", stats.empty_frames);
    eprintln!("Corrupted delimiters: {}", stats.corrupted_delimiters);
    eprintln!("Integrity failures:   {}", stats.integrity_failures);
    eprintln!("Bytes pending:        {} bytes", stats.bytes_pending);
    eprintln!("Bytes recovered:      {} bytes", stats.payload_bytes);
    eprintln!("Recovery rate:        {:.2}%", stats.recovery_rate());
    eprintln!();

    if stats_only {
        return Ok(stats);
    }

    let mut recovered = Vec::with_capacity(stats.payload_bytes);
    for outcome in &outcomes {
        if let DecodeOutcome::Frame(payload) = outcome {
            recovered.extend_from_slice(payload);
        }
    }

    match output {
        Some(path) => {
            write_output(path, &recovered)?;
            info!("Recovered {} bytes written to: {}", recovered.len(), path);
        }
        None => {
            println!("=== Recovered Payloads ===");
            for (i, payload) in outcomes.iter().filter_map(DecodeOutcome::payload).enumerate() {
                println!("Frame {}: {}", i + 1, String::from_utf8_lossy(payload));
            }
        }
    }

    Ok(stats)
}
