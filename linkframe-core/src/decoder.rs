//! Streaming frame decoder
//!
//! The decoder keeps no state of its own. Each call to [`FrameDecoder::decode`]
//! looks at the receive buffer, resolves at most one frame, and drops exactly
//! the bytes it resolved. Feeding the buffer one byte at a time or all at once
//! produces the same sequence of frames.

use crate::buffer::ReceiveBuffer;
use crate::error::FrameError;
use crate::integrity::{IntegrityCheck, IntegrityScheme};
use crate::types::{DecodeOutcome, TagSet};
use alloc::vec::Vec;
use bytes::{BufMut, BytesMut};

#[cfg(feature = "logging")]
use tracing::{debug, trace, warn};

/// Recovers frames from a [`ReceiveBuffer`] and checks their integrity code
#[derive(Debug, Clone, Default)]
pub struct FrameDecoder<S = IntegrityScheme> {
    tags: TagSet,
    scheme: S,
}

/// Result of walking the buffer from the first START tag
enum Extraction {
    /// No complete frame yet; everything before `keep_from` is dead
    Pending { keep_from: usize },
    /// A STOP tag closed the frame at `end - 1`
    Closed { end: usize, body: BytesMut },
}

impl<S: IntegrityCheck> FrameDecoder<S> {
    /// Create a decoder using the default tag set
    pub fn new(scheme: S) -> Self {
        Self::with_tags(TagSet::default(), scheme)
    }

    /// Create a decoder with custom tags
    pub fn with_tags(tags: TagSet, scheme: S) -> Self {
        Self { tags, scheme }
    }

    /// Tags recognised on the wire
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Integrity scheme used to check frames
    pub fn scheme(&self) -> &S {
        &self.scheme
    }

    /// Resolve at most one frame from the front of `buf`
    ///
    /// Returns [`DecodeOutcome::NoFrame`] when the buffered bytes cannot yet
    /// settle a frame. Leading bytes that can never belong to a frame are
    /// dropped even then. A resolved frame is removed from the buffer whether
    /// it is accepted or rejected.
    pub fn decode(&self, buf: &mut ReceiveBuffer) -> DecodeOutcome {
        match self.extract(buf.as_slice()) {
            Extraction::Pending { keep_from } => {
                #[cfg(feature = "logging")]
                if keep_from > 0 {
                    debug!("Discarding {} bytes outside any frame", keep_from);
                }

                buf.consume(keep_from);
                DecodeOutcome::NoFrame
            }
            Extraction::Closed { end, body } => {
                buf.consume(end);
                self.check_body(body)
            }
        }
    }

    /// Decode repeatedly until the buffer cannot resolve another frame
    pub fn decode_all(&self, buf: &mut ReceiveBuffer) -> Vec<DecodeOutcome> {
        let mut outcomes = Vec::new();
        loop {
            match self.decode(buf) {
                DecodeOutcome::NoFrame => break,
                outcome => outcomes.push(outcome),
            }
        }
        outcomes
    }

    /// Locate a frame and destuff its body without touching the buffer
    fn extract(&self, data: &[u8]) -> Extraction {
        let tags = &self.tags;

        let Some(mut frame_start) = memchr::memchr(tags.start(), data) else {
            return Extraction::Pending {
                keep_from: data.len(),
            };
        };

        let mut body = BytesMut::new();
        let mut pos = frame_start + 1;

        loop {
            // Copy the run of ordinary bytes up to the next tag in one go
            let run =
                memchr::memchr3(tags.start(), tags.stop(), tags.escape(), &data[pos..])
                    .unwrap_or(data.len() - pos);
            body.put_slice(&data[pos..pos + run]);
            pos += run;

            let Some(&tag) = data.get(pos) else {
                return Extraction::Pending {
                    keep_from: frame_start,
                };
            };

            if tag == tags.escape() {
                match data.get(pos + 1) {
                    Some(&literal) => {
                        body.put_u8(literal);
                        pos += 2;
                    }
                    None => {
                        // Escape is the last byte; wait for what it escapes
                        return Extraction::Pending {
                            keep_from: frame_start,
                        };
                    }
                }
            } else if tag == tags.stop() {
                #[cfg(feature = "logging")]
                trace!("Frame closed after {} wire bytes", pos + 1 - frame_start);

                return Extraction::Closed { end: pos + 1, body };
            } else {
                // A second START: what came before was damaged
                #[cfg(feature = "logging")]
                warn!(
                    "Unexpected start tag after {} body bytes, resynchronizing",
                    body.len()
                );

                body.clear();
                frame_start = pos;
                pos += 1;
            }
        }
    }

    /// Validate a destuffed body and strip its integrity code
    fn check_body(&self, body: BytesMut) -> DecodeOutcome {
        let len = body.len();
        let required = self.scheme.code_len();

        if len == 0 {
            return self.reject(FrameError::EmptyFrame);
        }

        if len < required {
            return self.reject(FrameError::CorruptedDelimiter { len, required });
        }

        let residue = self.scheme.validate(&body);
        if residue != 0 {
            return self.reject(FrameError::IntegrityCheckFailed { residue });
        }

        let mut payload = body.freeze();
        payload.truncate(len - required);

        #[cfg(feature = "logging")]
        debug!("Accepted frame with {} payload bytes", payload.len());

        DecodeOutcome::Frame(payload)
    }

    fn reject(&self, err: FrameError) -> DecodeOutcome {
        #[cfg(feature = "logging")]
        warn!("Dropped frame: {:?}", err);

        DecodeOutcome::Error(err)
    }
}
