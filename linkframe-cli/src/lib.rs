//! Library entry for linkframe-cli used by integration tests and embedding.

pub mod commands;

use anyhow::{bail, Context, Result};
use linkframe_core::{config::LinkConfig, integrity::SchemeConfig};
use std::fs;

/// Link settings shared by every subcommand
///
/// Flags override the matching fields of `--config`; anything not given on
/// the command line keeps the config file's value, or the default.
#[derive(Clone, Debug, Default, clap::Args)]
pub struct LinkArgs {
    /// JSON link configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Use a single even-parity byte instead of a CRC
    #[arg(long, conflicts_with = "generator")]
    pub parity: bool,

    /// CRC generator polynomial in hex, e.g. 0x11021
    #[arg(long, value_parser = parse_generator)]
    pub generator: Option<u64>,

    /// Payload bytes per frame (1-8)
    #[arg(long)]
    pub chunk_size: Option<usize>,
}

impl LinkArgs {
    /// Merge the config file and flags into a validated configuration
    pub fn resolve(&self) -> Result<LinkConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path))?;
                LinkConfig::from_json_str(&json)
                    .with_context(|| format!("Invalid config file: {}", path))?
            }
            None => LinkConfig::default(),
        };

        if self.parity {
            config.scheme = SchemeConfig::Parity;
        }
        if let Some(generator) = self.generator {
            config.scheme = SchemeConfig::Crc { generator };
        }
        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }

        config.validate().context("Invalid link settings")?;
        Ok(config)
    }
}

/// Parse a generator given as hex, with or without a `0x` prefix
pub fn parse_generator(s: &str) -> Result<u64> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
        .replace('_', "");
    if digits.is_empty() {
        bail!("empty generator");
    }
    u64::from_str_radix(&digits, 16).with_context(|| format!("not a hex generator: {}", s))
}
