//! # Linkframe Core
//!
//! Framing and integrity verification for a point-to-point byte link.
//!
//! Outgoing payloads are cut into chunks of at most eight bytes. Each chunk
//! gets a detachable integrity code (a CRC over a configurable generator, or a
//! single parity bit) and is wrapped as `START, stuffed(payload ‖ code), STOP`.
//! On the receiving side the decoder pulls frames out of a noisy byte stream
//! one at a time, resynchronizing on the next start tag after any damage.
//!
//! ## Modules
//!
//! - `constants`: Tag values, chunk limit and well-known generators
//! - `types`: Tag sets and decoder verdicts
//! - `integrity`: CRC long division and parity codes
//! - `encoder`: Frame building and byte stuffing
//! - `buffer`: Receive buffer and its thread-safe handle
//! - `decoder`: Incremental frame recovery
//! - `scanner`: Whole-stream scanning with statistics
//! - `sender`: Payload chunking and transmission
//! - `config`: Serializable link configuration

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod buffer;
pub mod config;
pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod integrity;
pub mod scanner;
pub mod sender;
pub mod types;

// Re-export commonly used types
pub use buffer::ReceiveBuffer;
#[cfg(feature = "std")]
pub use buffer::SharedReceiveBuffer;
pub use config::LinkConfig;
pub use decoder::FrameDecoder;
pub use encoder::FrameEncoder;
pub use error::FrameError;
pub use integrity::{Crc, IntegrityCheck, IntegrityScheme, Parity};
pub use sender::{Sender, Transmit};
pub use types::{DecodeOutcome, TagSet};

/// Result type alias for linkframe operations
pub type Result<T> = core::result::Result<T, FrameError>;
