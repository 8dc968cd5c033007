//! Receive buffer shared between byte arrival and the frame decoder
//!
//! The producer only ever appends; the decoder only ever drops a prefix.
//! All state that survives between decoder calls lives here.

use bytes::{Buf, BytesMut};

#[cfg(feature = "std")]
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[cfg(feature = "std")]
use crate::{decoder::FrameDecoder, integrity::IntegrityCheck, types::DecodeOutcome};

/// FIFO byte queue consumed from the front
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiveBuffer {
    bytes: BytesMut,
}

impl ReceiveBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: BytesMut::with_capacity(capacity),
        }
    }

    /// Append newly arrived bytes
    pub fn extend_from_slice(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
    }

    /// Append a single arrived byte
    pub fn push(&mut self, byte: u8) {
        self.bytes.extend_from_slice(&[byte]);
    }

    /// Byte at `index` from the front, if buffered
    #[inline]
    pub fn peek(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    /// Drop the first `count` bytes (clamped to the buffer length)
    pub fn consume(&mut self, count: usize) {
        let count = count.min(self.bytes.len());
        self.bytes.advance(count);
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Buffered bytes, front first
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of buffered bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<&[u8]> for ReceiveBuffer {
    fn from(data: &[u8]) -> Self {
        Self {
            bytes: BytesMut::from(data),
        }
    }
}

impl Extend<u8> for ReceiveBuffer {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        self.bytes.extend(iter);
    }
}

/// Thread-safe handle to a [`ReceiveBuffer`]
///
/// Every append and every decode holds the lock for exactly one operation, so
/// a receiving thread and a decoding thread can share one buffer.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Default)]
pub struct SharedReceiveBuffer {
    inner: Arc<Mutex<ReceiveBuffer>>,
}

#[cfg(feature = "std")]
impl SharedReceiveBuffer {
    /// Create an empty shared buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append newly arrived bytes
    pub fn push(&self, data: &[u8]) {
        self.lock().extend_from_slice(data);
    }

    /// Run the decoder once against the buffered bytes
    pub fn poll<S: IntegrityCheck>(&self, decoder: &FrameDecoder<S>) -> DecodeOutcome {
        decoder.decode(&mut self.lock())
    }

    /// Number of buffered bytes
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock can only leave a prefix half-dropped;
    // the decoder treats whatever remains as ordinary input.
    fn lock(&self) -> MutexGuard<'_, ReceiveBuffer> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
