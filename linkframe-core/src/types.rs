//! Core types shared by the encoder and decoder

use crate::constants::{ESCAPE_TAG, START_TAG, STOP_TAG};
use crate::error::FrameError;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// The three reserved byte values of the wire format
///
/// Built through [`TagSet::new`] or [`Default`]. A set read from JSON is
/// checked by [`LinkConfig::validate`](crate::config::LinkConfig::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagSet {
    start: u8,
    stop: u8,
    escape: u8,
}

impl TagSet {
    /// Create a tag set, rejecting duplicate values
    pub fn new(start: u8, stop: u8, escape: u8) -> Result<Self, FrameError> {
        let tags = Self {
            start,
            stop,
            escape,
        };
        tags.validate()?;
        Ok(tags)
    }

    /// Opens a frame
    #[inline]
    pub const fn start(&self) -> u8 {
        self.start
    }

    /// Closes a frame
    #[inline]
    pub const fn stop(&self) -> u8 {
        self.stop
    }

    /// Marks the following byte as literal data
    #[inline]
    pub const fn escape(&self) -> u8 {
        self.escape
    }

    /// Check that START, STOP and ESCAPE are pairwise distinct
    pub fn validate(&self) -> Result<(), FrameError> {
        if self.start == self.stop || self.start == self.escape {
            return Err(FrameError::DuplicateTag(self.start));
        }
        if self.stop == self.escape {
            return Err(FrameError::DuplicateTag(self.stop));
        }
        Ok(())
    }

    /// Whether `byte` must be escaped inside a frame body
    #[inline]
    pub const fn is_tag(&self, byte: u8) -> bool {
        byte == self.start || byte == self.stop || byte == self.escape
    }
}

impl Default for TagSet {
    fn default() -> Self {
        Self {
            start: START_TAG,
            stop: STOP_TAG,
            escape: ESCAPE_TAG,
        }
    }
}

/// Verdict of a single decoder invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// Not enough bytes buffered to resolve a frame
    NoFrame,

    /// A frame validated; carries the payload with the code stripped
    Frame(Bytes),

    /// A frame was resolved but rejected; its bytes are gone from the buffer
    Error(FrameError),
}

impl DecodeOutcome {
    /// Payload of an accepted frame
    pub fn payload(&self) -> Option<&Bytes> {
        match self {
            DecodeOutcome::Frame(payload) => Some(payload),
            _ => None,
        }
    }

    /// Consume the outcome, keeping only an accepted payload
    pub fn into_payload(self) -> Option<Bytes> {
        match self {
            DecodeOutcome::Frame(payload) => Some(payload),
            _ => None,
        }
    }

    /// Whether this call resolved nothing
    pub fn is_no_frame(&self) -> bool {
        matches!(self, DecodeOutcome::NoFrame)
    }
}
