use super::{read_input, write_output};
use crate::LinkArgs;
use anyhow::{Context, Result};
use tracing::info;

/// Chunk and frame `input` into a wire stream written to `output`
///
/// Returns the number of frames written.
pub fn execute(input: &str, output: &str, link: &LinkArgs) -> Result<usize> {
    info!("Packing data from {} to {}", input, output);

    let config = link.resolve()?;
    let data = read_input(input)?;

    info!(
        "Read {} bytes, framing with {} in chunks of {}",
        data.len(),
        config.integrity_scheme()?.name(),
        config.chunk_size
    );

    let mut sender = config.sender(Vec::<u8>::with_capacity(data.len() * 2))?;

    let frames = sender
        .send(&data)
        .with_context(|| format!("Failed to frame input: {}", input))?;
    let wire = sender.into_link();

    write_output(output, &wire)?;

    info!(
        "Successfully packed {} frames ({} bytes total)",
        frames,
        wire.len()
    );

    Ok(frames)
}
