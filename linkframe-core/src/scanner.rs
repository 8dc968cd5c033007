//! Stream scanner for damaged or noisy input

use crate::buffer::ReceiveBuffer;
use crate::decoder::FrameDecoder;
use crate::error::FrameError;
use crate::integrity::IntegrityCheck;
use crate::types::DecodeOutcome;
use alloc::vec::Vec;
use bytes::Bytes;

#[cfg(feature = "logging")]
use tracing::debug;

/// Run the decoder over `buf` until it cannot resolve another frame
///
/// Bytes of an unfinished trailing frame stay in the buffer so a later call
/// can complete them.
pub fn scan_buffer<S: IntegrityCheck>(
    decoder: &FrameDecoder<S>,
    buf: &mut ReceiveBuffer,
) -> Vec<DecodeOutcome> {
    decoder.decode_all(buf)
}

/// Scan a complete captured byte stream for frames
///
/// This function:
/// 1. Skips bytes until a start tag
/// 2. Destuffs and validates each delimited frame
/// 3. Reports rejected frames and keeps scanning after them
///
/// A trailing frame with no stop tag is ignored.
pub fn scan_stream<S: IntegrityCheck>(
    decoder: &FrameDecoder<S>,
    data: &[u8],
) -> Vec<DecodeOutcome> {
    let mut buf = ReceiveBuffer::from(data);
    scan_buffer(decoder, &mut buf)
}

/// Payloads of every accepted frame in `data`, in order
pub fn payloads<S: IntegrityCheck>(decoder: &FrameDecoder<S>, data: &[u8]) -> Vec<Bytes> {
    scan_stream(decoder, data)
        .into_iter()
        .filter_map(DecodeOutcome::into_payload)
        .collect()
}

/// Scan statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Total bytes scanned
    pub bytes_scanned: usize,

    /// Number of valid frames found
    pub frames_found: usize,

    /// Total payload bytes delivered by valid frames
    pub payload_bytes: usize,

    /// Frames with nothing between their tags
    pub empty_frames: usize,

    /// Frames too short to hold an integrity code
    pub corrupted_delimiters: usize,

    /// Frames whose integrity code did not validate
    pub integrity_failures: usize,

    /// Bytes left over in an unfinished trailing frame
    pub bytes_pending: usize,
}

impl ScanStats {
    /// Number of frames that were resolved but rejected
    pub fn frames_rejected(&self) -> usize {
        self.empty_frames + self.corrupted_delimiters + self.integrity_failures
    }

    /// Calculate recovery rate as a percentage of scanned bytes delivered as payload
    pub fn recovery_rate(&self) -> f64 {
        if self.bytes_scanned == 0 {
            0.0
        } else {
            (self.payload_bytes as f64 / self.bytes_scanned as f64) * 100.0
        }
    }

    /// Account for one decoder outcome
    pub fn record(&mut self, outcome: &DecodeOutcome) {
        match outcome {
            DecodeOutcome::NoFrame => {}
            DecodeOutcome::Frame(payload) => {
                self.frames_found += 1;
                self.payload_bytes += payload.len();
            }
            DecodeOutcome::Error(FrameError::EmptyFrame) => self.empty_frames += 1,
            DecodeOutcome::Error(FrameError::CorruptedDelimiter { .. }) => {
                self.corrupted_delimiters += 1
            }
            DecodeOutcome::Error(_) => self.integrity_failures += 1,
        }
    }
}

/// Scan stream with statistics
pub fn scan_stream_with_stats<S: IntegrityCheck>(
    decoder: &FrameDecoder<S>,
    data: &[u8],
) -> (Vec<DecodeOutcome>, ScanStats) {
    let mut stats = ScanStats {
        bytes_scanned: data.len(),
        ..Default::default()
    };

    #[cfg(feature = "logging")]
    debug!("Starting stream scan of {} bytes", data.len());

    let mut buf = ReceiveBuffer::from(data);
    let outcomes = scan_buffer(decoder, &mut buf);
    for outcome in &outcomes {
        stats.record(outcome);
    }
    stats.bytes_pending = buf.len();

    #[cfg(feature = "logging")]
    debug!(
        "Scan complete: {} valid frames, {} rejected, {} bytes pending",
        stats.frames_found,
        stats.frames_rejected(),
        stats.bytes_pending
    );

    (outcomes, stats)
}
