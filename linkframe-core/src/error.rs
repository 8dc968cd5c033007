//! Error types for linkframe operations

use alloc::string::String;

/// Errors that can occur while framing, deframing or configuring a link
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// A START/STOP pair enclosed no bytes at all
    #[cfg_attr(feature = "std", error("Empty frame received"))]
    EmptyFrame,

    /// Frame body is shorter than the integrity code, so a tag byte was corrupted
    #[cfg_attr(
        feature = "std",
        error("Corrupted delimiter: frame body has {len} bytes, integrity code needs {required}")
    )]
    CorruptedDelimiter {
        /// Number of destuffed bytes between the tags.
        len: usize,
        /// Length of the integrity code for the active scheme.
        required: usize,
    },

    /// Integrity code did not validate
    #[cfg_attr(
        feature = "std",
        error("Integrity check failed: residue {residue:#x} should be 0")
    )]
    IntegrityCheckFailed {
        /// Non-zero CRC remainder or parity left after validation.
        residue: u64,
    },

    /// CRC generator has no usable degree
    #[cfg_attr(
        feature = "std",
        error("Invalid CRC generator {0:#x}: degree must be between 1 and 63")
    )]
    InvalidGenerator(u64),

    /// Two of START/STOP/ESCAPE share a byte value
    #[cfg_attr(feature = "std", error("Tag value {0:#04x} is used more than once"))]
    DuplicateTag(u8),

    /// Chunk size outside 1..=MAX_CHUNK_SIZE
    #[cfg_attr(feature = "std", error("Invalid chunk size {0}: must be between 1 and 8"))]
    InvalidChunkSize(usize),

    /// IO error while transmitting
    #[cfg_attr(feature = "std", error("IO error: {0}"))]
    Io(String),

    /// Configuration could not be parsed
    #[cfg_attr(feature = "std", error("Configuration error: {0}"))]
    Config(String),
}

impl FrameError {
    /// True for errors caused by damage on the wire rather than by misuse
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            FrameError::EmptyFrame
                | FrameError::CorruptedDelimiter { .. }
                | FrameError::IntegrityCheckFailed { .. }
        )
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for FrameError {
    fn from(err: std::io::Error) -> Self {
        FrameError::Io(err.to_string())
    }
}

#[cfg(feature = "std")]
impl From<serde_json::Error> for FrameError {
    fn from(err: serde_json::Error) -> Self {
        FrameError::Config(err.to_string())
    }
}
