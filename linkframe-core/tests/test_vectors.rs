//! Known-answer wire vectors
//!
//! Each vector pins the exact bytes a frame occupies on the link, so a change
//! to the division, the code serialization or the stuffing shows up here first.
//! The vectors are also written out as `.lf` files with a short description,
//! for checking other implementations against.

use linkframe_core::{
    constants::{CRC16_CCITT_GENERATOR, CRC32_GENERATOR},
    decoder::FrameDecoder,
    encoder::FrameEncoder,
    error::FrameError,
    integrity::{Crc, IntegrityCheck, IntegrityScheme},
    scanner::{scan_stream, scan_stream_with_stats},
    types::DecodeOutcome,
    ReceiveBuffer,
};
use std::fs;
use std::path::{Path, PathBuf};

struct Vector {
    name: &'static str,
    description: &'static str,
    scheme: IntegrityScheme,
    payload: &'static [u8],
    code: &'static str,
    wire: &'static str,
}

fn crc(generator: u64) -> IntegrityScheme {
    IntegrityScheme::crc(generator).unwrap()
}

fn vectors() -> Vec<Vector> {
    vec![
        Vector {
            name: "01_crc16_check",
            description: "CRC-16/XMODEM check string",
            scheme: crc(CRC16_CCITT_GENERATOR),
            payload: b"123456789",
            code: "31c3",
            wire: "7b31323334353637383931c37d",
        },
        Vector {
            name: "02_crc16_escaped_code",
            description: "CRC-16 code whose second byte is the start tag",
            scheme: crc(CRC16_CCITT_GENERATOR),
            payload: b"AB",
            code: "567b",
            wire: "7b4142565c7b7d",
        },
        Vector {
            name: "03_crc16_all_tags",
            description: "Payload made of the three tag bytes",
            scheme: crc(CRC16_CCITT_GENERATOR),
            payload: b"{}\\",
            code: "cd85",
            wire: "7b5c7b5c7d5c5ccd857d",
        },
        Vector {
            name: "04_crc16_empty",
            description: "Empty payload, all-zero code",
            scheme: crc(CRC16_CCITT_GENERATOR),
            payload: b"",
            code: "0000",
            wire: "7b00007d",
        },
        Vector {
            name: "05_crc32_check",
            description: "Non-reflected CRC-32 check string",
            scheme: crc(CRC32_GENERATOR),
            payload: b"123456789",
            code: "89a1897f",
            wire: "7b31323334353637383989a1897f7d",
        },
        Vector {
            name: "06_crc32_text",
            description: "Short text payload",
            scheme: crc(CRC32_GENERATOR),
            payload: b"hello",
            code: "a1de215e",
            wire: "7b68656c6c6fa1de215e7d",
        },
        Vector {
            name: "07_degree12_unaligned",
            description: "Degree 12 generator, four unused low bits in the code",
            scheme: crc(0x1021),
            payload: b"AB",
            code: "9650",
            wire: "7b414296507d",
        },
        Vector {
            name: "08_degree26_unaligned",
            description: "Degree 26 generator, six unused low bits in the code",
            scheme: crc(0x04C1_1DB7),
            payload: b"123456789",
            code: "aaf6d500",
            wire: "7b313233343536373839aaf6d5007d",
        },
        Vector {
            name: "09_parity_even",
            description: "Parity over an even number of set bits",
            scheme: IntegrityScheme::parity(),
            payload: b"AB",
            code: "00",
            wire: "7b4142007d",
        },
        Vector {
            name: "10_parity_odd",
            description: "Parity over an odd number of set bits",
            scheme: IntegrityScheme::parity(),
            payload: b"one",
            code: "01",
            wire: "7b6f6e65017d",
        },
        Vector {
            name: "11_parity_escaped",
            description: "Escape and stop tags inside a parity frame",
            scheme: IntegrityScheme::parity(),
            payload: b"\\}",
            code: "00",
            wire: "7b5c5c5c7d007d",
        },
        Vector {
            name: "12_parity_empty",
            description: "Empty payload under parity",
            scheme: IntegrityScheme::parity(),
            payload: b"",
            code: "00",
            wire: "7b007d",
        },
    ]
}

/// Write every vector as `<name>.lf` plus a `<name>.md` description
fn generate_all_test_vectors(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;

    for v in vectors() {
        let wire = FrameEncoder::new(v.scheme).encode(v.payload);
        fs::write(dir.join(format!("{}.lf", v.name)), &wire)?;

        let doc = format!(
            "# {name}

{description}

- Scheme: {scheme}
- Payload: {payload}
- Code: {code}
- Size: {size} bytes

## Hex Dump
```
{hex}
```
",
            name = v.name,
            description = v.description,
            scheme = v.scheme.name(),
            payload = hex::encode(v.payload),
            code = v.code,
            size = wire.len(),
            hex = hex::encode(&wire),
        );
        fs::write(dir.join(format!("{}.md", v.name)), doc)?;
    }

    Ok(())
}

fn vector_dir() -> PathBuf {
    std::env::temp_dir().join(format!("linkframe_vectors_{}", std::process::id()))
}

#[test]
fn test_integrity_codes_match_vectors() {
    for v in vectors() {
        assert_eq!(hex::encode(v.scheme.encode(v.payload)), v.code, "{}", v.name);
    }
}

#[test]
fn test_wire_bytes_match_vectors() {
    for v in vectors() {
        let wire = FrameEncoder::new(v.scheme).encode(v.payload);
        assert_eq!(hex::encode(&wire), v.wire, "{}", v.name);
    }
}

#[test]
fn test_vectors_decode_to_payload() {
    for v in vectors() {
        let wire = hex::decode(v.wire).unwrap();
        let mut buf = ReceiveBuffer::from(wire.as_slice());
        let outcome = FrameDecoder::new(v.scheme).decode(&mut buf);
        assert_eq!(outcome.payload().map(|p| &p[..]), Some(v.payload), "{}", v.name);
        assert!(buf.is_empty(), "{}", v.name);
    }
}

#[test]
fn test_vector_bodies_have_zero_residue() {
    for v in vectors() {
        let mut body = v.payload.to_vec();
        body.extend_from_slice(&hex::decode(v.code).unwrap());
        assert_eq!(v.scheme.validate(&body), 0, "{}", v.name);
    }
}

#[test]
fn test_crc_checksum_values() {
    assert_eq!(Crc::crc16().checksum(b"123456789"), 0x31C3);
    assert_eq!(Crc::crc32().checksum(b"123456789"), 0x89A1_897F);
}

#[test]
fn test_concatenated_vectors_scan_in_order() {
    let scheme = crc(CRC32_GENERATOR);
    let mut stream = Vec::new();
    for v in vectors().iter().filter(|v| v.scheme == scheme) {
        stream.extend_from_slice(b"\x00noise\xff");
        stream.extend_from_slice(&hex::decode(v.wire).unwrap());
    }

    let outcomes = scan_stream(&FrameDecoder::new(scheme), &stream);
    let found: Vec<&[u8]> = outcomes
        .iter()
        .filter_map(DecodeOutcome::payload)
        .map(|p| &p[..])
        .collect();
    assert_eq!(found, vec![&b"123456789"[..], &b"hello"[..]]);
}

#[test]
fn test_damaged_vectors_are_rejected() {
    let all = vectors();
    let v = &all[0];
    let mut wire = hex::decode(v.wire).unwrap();
    wire[3] ^= 0x10;

    let mut buf = ReceiveBuffer::from(wire.as_slice());
    let outcome = FrameDecoder::new(v.scheme).decode(&mut buf);
    assert!(matches!(
        outcome,
        DecodeOutcome::Error(FrameError::IntegrityCheckFailed { .. })
    ));

    // Dropping the stop tag leaves the frame pending
    let wire = hex::decode(v.wire).unwrap();
    let (outcomes, stats) =
        scan_stream_with_stats(&FrameDecoder::new(v.scheme), &wire[..wire.len() - 1]);
    assert!(outcomes.is_empty());
    assert_eq!(stats.bytes_pending, wire.len() - 1);
}

#[test]
fn test_generate_all_vectors() {
    let dir = vector_dir();
    generate_all_test_vectors(&dir).unwrap();

    for v in vectors() {
        let data = fs::read(dir.join(format!("{}.lf", v.name))).unwrap();
        assert_eq!(hex::encode(&data), v.wire);
        assert!(dir.join(format!("{}.md", v.name)).exists());
    }

    fs::remove_dir_all(&dir).unwrap();
}
