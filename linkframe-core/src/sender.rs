//! Chunking sender: splits payloads into frames and hands them to the link

use crate::constants::MAX_CHUNK_SIZE;
use crate::encoder::FrameEncoder;
use crate::error::FrameError;
use crate::integrity::{IntegrityCheck, IntegrityScheme};
use bytes::BytesMut;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(feature = "logging")]
use tracing::debug;

/// Downstream sink that puts complete frames on the wire
pub trait Transmit {
    /// Transmit one complete wire frame
    fn transmit(&mut self, frame: &[u8]) -> Result<(), FrameError>;
}

#[cfg(feature = "std")]
impl<W: std::io::Write> Transmit for W {
    fn transmit(&mut self, frame: &[u8]) -> Result<(), FrameError> {
        self.write_all(frame)?;
        Ok(())
    }
}

#[cfg(not(feature = "std"))]
impl Transmit for Vec<u8> {
    fn transmit(&mut self, frame: &[u8]) -> Result<(), FrameError> {
        self.extend_from_slice(frame);
        Ok(())
    }
}

/// Splits payloads into chunks of at most [`MAX_CHUNK_SIZE`] bytes and
/// transmits one frame per chunk, in order
#[derive(Debug)]
pub struct Sender<T, S = IntegrityScheme> {
    encoder: FrameEncoder<S>,
    link: T,
    chunk_size: usize,
    scratch: BytesMut,
    frames_sent: u64,
}

impl<T: Transmit, S: IntegrityCheck> Sender<T, S> {
    /// Create a sender using the largest chunk size
    pub fn new(encoder: FrameEncoder<S>, link: T) -> Self {
        Self {
            encoder,
            link,
            chunk_size: MAX_CHUNK_SIZE,
            scratch: BytesMut::new(),
            frames_sent: 0,
        }
    }

    /// Create a sender with a chunk size in `1..=MAX_CHUNK_SIZE`
    pub fn with_chunk_size(
        encoder: FrameEncoder<S>,
        link: T,
        chunk_size: usize,
    ) -> Result<Self, FrameError> {
        if !(1..=MAX_CHUNK_SIZE).contains(&chunk_size) {
            return Err(FrameError::InvalidChunkSize(chunk_size));
        }
        Ok(Self {
            chunk_size,
            ..Self::new(encoder, link)
        })
    }

    /// Frame and transmit `payload`, returning the number of frames sent
    ///
    /// Each frame is fully built before any of it is transmitted. An empty
    /// payload sends nothing. If the link fails, frames already transmitted
    /// stay counted in [`Sender::frames_sent`].
    pub fn send(&mut self, payload: &[u8]) -> Result<usize, FrameError> {
        let mut sent = 0;
        for chunk in payload.chunks(self.chunk_size) {
            self.scratch.clear();
            self.encoder.encode_into(chunk, &mut self.scratch);
            self.link.transmit(&self.scratch)?;
            sent += 1;
            self.frames_sent += 1;
        }

        #[cfg(feature = "logging")]
        debug!(
            "Sent {} payload bytes in {} frames ({} chunk size)",
            payload.len(),
            sent,
            self.chunk_size
        );

        Ok(sent)
    }

    /// Chunk size in bytes
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Frames transmitted over the sender's lifetime
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    /// The encoder used for every chunk
    pub fn encoder(&self) -> &FrameEncoder<S> {
        &self.encoder
    }

    /// Borrow the downstream link
    pub fn link(&self) -> &T {
        &self.link
    }

    /// Give back the downstream link
    pub fn into_link(self) -> T {
        self.link
    }
}
