use super::read_input;
use crate::LinkArgs;
use anyhow::Result;
use colored::*;
use linkframe_core::{scanner::scan_stream_with_stats, DecodeOutcome, FrameError};
use tracing::{info, warn};

/// Outcome counts from a verification run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifySummary {
    /// Frames that passed the integrity check
    pub valid: usize,
    /// Frames that were delimited but rejected
    pub rejected: usize,
    /// Bytes of an unterminated trailing frame
    pub bytes_pending: usize,
}

impl VerifySummary {
    /// True when every frame in the stream was intact
    pub fn is_clean(&self) -> bool {
        self.valid > 0 && self.rejected == 0 && self.bytes_pending == 0
    }
}

fn verdict(err: &FrameError) -> String {
    match err {
        FrameError::EmptyFrame => "empty frame".to_string(),
        FrameError::CorruptedDelimiter { len, required } => {
            format!("{} body bytes, code needs {}", len, required)
        }
        FrameError::IntegrityCheckFailed { residue } => {
            format!("integrity check failed (residue {:#x})", residue)
        }
        other => other.to_string(),
    }
}

/// Report a verdict for every frame in `input`
pub fn execute(input: &str, link: &LinkArgs) -> Result<VerifySummary> {
    info!("Verifying file: {}", input);

    let config = link.resolve()?;
    let data = read_input(input)?;

    let (outcomes, stats) = scan_stream_with_stats(&config.decoder()?, &data);
    let summary = VerifySummary {
        valid: stats.frames_found,
        rejected: stats.frames_rejected(),
        bytes_pending: stats.bytes_pending,
    };

    if outcomes.is_empty() {
        if summary.bytes_pending > 0 {
            println!(
                "{} No complete frames found, stream ends inside an unterminated frame ({} bytes)",
                "✗".red(),
                summary.bytes_pending
            );
        } else {
            println!("{} No frames found", "✗".red());
        }
        return Ok(summary);
    }

    println!("\n=== Frame Verdicts ===");
    for (i, outcome) in outcomes.iter().enumerate() {
        match outcome {
            DecodeOutcome::Frame(payload) => {
                println!("#{:<6} {} {} payload bytes", i + 1, "✓".green(), payload.len())
            }
            DecodeOutcome::Error(err) => {
                warn!("Frame #{} rejected: {}", i + 1, err);
                println!("#{:<6} {} {}", i + 1, "✗".red(), verdict(err))
            }
            DecodeOutcome::NoFrame => {}
        }
    }

    println!("\n=== Verification Results ===");
    println!("Total frames found: {}", outcomes.len());
    println!("Valid frames:       {}", summary.valid.to_string().green());
    if summary.rejected > 0 {
        println!("Rejected frames:    {}", summary.rejected.to_string().red());
    } else {
        println!("Rejected frames:    {}", summary.rejected);
    }

    println!("\n=== Summary ===");
    if summary.is_clean() {
        println!("{} Stream is fully valid", "✓".green());
    } else if summary.rejected > 0 {
        println!("{} Stream contains damaged frames", "✗".red());
    } else {
        println!(
            "{} Stream ends inside an unterminated frame ({} bytes)",
            "!".yellow(),
            summary.bytes_pending
        );
    }

    Ok(summary)
}
