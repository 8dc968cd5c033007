//! Fuzz entry points for the linkframe decoder
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_decoder

use linkframe_core::{
    decoder::FrameDecoder, integrity::IntegrityScheme, scanner::scan_stream, DecodeOutcome,
    ReceiveBuffer,
};

/// Pick a scheme from the leading input bytes, returning it with the rest
///
/// A zero selector byte means parity; otherwise the next eight bytes form a
/// generator, falling back to CRC-16 when it is out of range.
fn split_scheme(data: &[u8]) -> (IntegrityScheme, &[u8]) {
    match data.split_first() {
        Some((&0, rest)) => (IntegrityScheme::parity(), rest),
        Some((_, rest)) if rest.len() >= 8 => {
            let (head, tail) = rest.split_at(8);
            let mut raw = [0u8; 8];
            raw.copy_from_slice(head);
            let scheme = IntegrityScheme::crc(u64::from_be_bytes(raw)).unwrap_or_default();
            (scheme, tail)
        }
        _ => (IntegrityScheme::default(), data),
    }
}

pub fn fuzz_decode(data: &[u8]) {
    let (scheme, wire) = split_scheme(data);
    let decoder = FrameDecoder::new(scheme);

    // Byte-at-a-time delivery must agree with a single bulk scan
    let mut buf = ReceiveBuffer::new();
    let mut trickle = Vec::new();
    for &b in wire {
        buf.push(b);
        match decoder.decode(&mut buf) {
            DecodeOutcome::NoFrame => {}
            outcome => trickle.push(outcome),
        }
    }

    assert_eq!(trickle, scan_stream(&decoder, wire));
}

pub fn fuzz_scan(data: &[u8]) {
    let (scheme, wire) = split_scheme(data);

    // Try to scan - should never panic
    let _ = scan_stream(&FrameDecoder::new(scheme), wire);
}
