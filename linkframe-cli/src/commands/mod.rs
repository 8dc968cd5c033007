//! Subcommand implementations

pub mod pack;
pub mod unpack;
pub mod verify;

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read, Write};

/// Read a whole input file, or stdin when `path` is `-`
pub(crate) fn read_input(path: &str) -> Result<Vec<u8>> {
    if path == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        fs::read(path).with_context(|| format!("Failed to read input file: {}", path))
    }
}

/// Write `data` to a file, or stdout when `path` is `-`
pub(crate) fn write_output(path: &str, data: &[u8]) -> Result<()> {
    if path == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(data).context("Failed to write stdout")?;
        stdout.flush().context("Failed to flush stdout")
    } else {
        fs::write(path, data).with_context(|| format!("Failed to write output file: {}", path))
    }
}
