//! Link configuration
//!
//! A [`LinkConfig`] describes everything both ends of a link must agree on:
//! the tag values, the integrity scheme and the chunk size. It deserializes
//! from JSON such as
//!
//! ```json
//! { "tags": { "start": 123, "stop": 125, "escape": 92 },
//!   "scheme": { "crc": { "generator": 69665 } },
//!   "chunk_size": 8 }
//! ```
//!
//! Missing fields take their defaults.

use crate::constants::MAX_CHUNK_SIZE;
use crate::decoder::FrameDecoder;
use crate::encoder::FrameEncoder;
use crate::error::FrameError;
use crate::integrity::{IntegrityScheme, SchemeConfig};
use crate::sender::{Sender, Transmit};
use crate::types::TagSet;
use serde::{Deserialize, Serialize};

/// Shared settings for both ends of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// START/STOP/ESCAPE byte values
    pub tags: TagSet,

    /// Integrity code appended to every chunk
    pub scheme: SchemeConfig,

    /// Payload bytes per frame
    pub chunk_size: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            tags: TagSet::default(),
            scheme: SchemeConfig::default(),
            chunk_size: MAX_CHUNK_SIZE,
        }
    }
}

impl LinkConfig {
    /// Parse a configuration from JSON
    #[cfg(feature = "std")]
    pub fn from_json_str(json: &str) -> Result<Self, FrameError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as pretty JSON
    #[cfg(feature = "std")]
    pub fn to_json_string(&self) -> Result<String, FrameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check tags, generator and chunk size
    pub fn validate(&self) -> Result<(), FrameError> {
        self.tags.validate()?;
        self.integrity_scheme()?;
        if !(1..=MAX_CHUNK_SIZE).contains(&self.chunk_size) {
            return Err(FrameError::InvalidChunkSize(self.chunk_size));
        }
        Ok(())
    }

    /// Resolve the configured integrity scheme
    pub fn integrity_scheme(&self) -> Result<IntegrityScheme, FrameError> {
        IntegrityScheme::try_from(self.scheme)
    }

    /// Build a frame encoder for this link
    pub fn encoder(&self) -> Result<FrameEncoder, FrameError> {
        self.tags.validate()?;
        Ok(FrameEncoder::with_tags(self.tags, self.integrity_scheme()?))
    }

    /// Build a frame decoder for this link
    pub fn decoder(&self) -> Result<FrameDecoder, FrameError> {
        self.tags.validate()?;
        Ok(FrameDecoder::with_tags(self.tags, self.integrity_scheme()?))
    }

    /// Build a chunking sender writing to `link`
    pub fn sender<T: Transmit>(&self, link: T) -> Result<Sender<T>, FrameError> {
        Sender::with_chunk_size(self.encoder()?, link, self.chunk_size)
    }
}
