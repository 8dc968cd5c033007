use std::fs;
use std::path::Path;
use tempfile::tempdir;

use linkframe_cli::{
    commands::{pack, unpack},
    LinkArgs,
};

fn sample_data() -> Vec<u8> {
    (0..2000u32).map(|i| (i * 31 % 251) as u8).collect()
}

fn pack_file(dir: &Path, data: &[u8], args: &LinkArgs) -> String {
    let in_path = dir.join("in.bin");
    let out_path = dir.join("packed.lf");
    fs::write(&in_path, data).unwrap();
    pack::execute(in_path.to_str().unwrap(), out_path.to_str().unwrap(), args).unwrap();
    out_path.to_str().unwrap().to_string()
}

/// True if `needle` can be formed by deleting bytes from `haystack`
fn is_subsequence(needle: &[u8], haystack: &[u8]) -> bool {
    let mut it = haystack.iter();
    needle.iter().all(|b| it.any(|h| h == b))
}

#[test]
fn unpack_reproduces_packed_input() {
    let td = tempdir().unwrap();
    let data = sample_data();
    let args = LinkArgs::default();
    let packed = pack_file(td.path(), &data, &args);
    let out_path = td.path().join("out.bin");

    let stats = unpack::execute(&packed, Some(out_path.to_str().unwrap()), &args, false).unwrap();

    assert_eq!(fs::read(&out_path).unwrap(), data);
    assert_eq!(stats.frames_found, data.len().div_ceil(8));
    assert_eq!(stats.frames_rejected(), 0);
    assert_eq!(stats.bytes_pending, 0);
}

#[test]
fn unpack_round_trip_every_scheme() {
    let data = sample_data();
    let schemes = [
        LinkArgs {
            parity: true,
            ..Default::default()
        },
        LinkArgs {
            generator: Some(0x1021),
            chunk_size: Some(7),
            ..Default::default()
        },
        LinkArgs {
            generator: Some(0x1_04C1_1DB7),
            chunk_size: Some(1),
            ..Default::default()
        },
    ];

    for args in &schemes {
        let td = tempdir().unwrap();
        let packed = pack_file(td.path(), &data, args);
        let out_path = td.path().join("out.bin");
        unpack::execute(&packed, Some(out_path.to_str().unwrap()), args, false).unwrap();
        assert_eq!(fs::read(&out_path).unwrap(), data, "{:?}", args);
    }
}

#[test]
fn unpack_damaged_stream_drops_only_bad_frames() {
    let td = tempdir().unwrap();
    let data = sample_data();
    let args = LinkArgs {
        generator: Some(0x1_04C1_1DB7),
        ..Default::default()
    };
    let packed = pack_file(td.path(), &data, &args);

    let mut wire = fs::read(&packed).unwrap();
    for i in (100..wire.len()).step_by(500) {
        wire[i] ^= 0x08;
    }
    wire[1000..1040].fill(0xAA);
    fs::write(&packed, &wire).unwrap();

    let out_path = td.path().join("out.bin");
    let stats = unpack::execute(&packed, Some(out_path.to_str().unwrap()), &args, false).unwrap();

    let recovered = fs::read(&out_path).unwrap();
    assert!(stats.frames_found > 0);
    assert!(stats.frames_rejected() > 0 || stats.frames_found < data.len().div_ceil(8));
    assert!(recovered.len() < data.len());
    assert!(is_subsequence(&recovered, &data));
}

#[test]
fn unpack_stats_only_writes_nothing() {
    let td = tempdir().unwrap();
    let args = LinkArgs::default();
    let packed = pack_file(td.path(), b"hello, link", &args);
    let out_path = td.path().join("out.bin");

    let stats = unpack::execute(&packed, Some(out_path.to_str().unwrap()), &args, true).unwrap();
    assert_eq!(stats.frames_found, 2);
    assert_eq!(stats.payload_bytes, 11);
    assert!(!out_path.exists());
}

#[test]
fn unpack_with_wrong_scheme_recovers_nothing() {
    let td = tempdir().unwrap();
    let packed = pack_file(td.path(), &sample_data(), &LinkArgs::default());

    let crc32 = LinkArgs {
        generator: Some(0x1_04C1_1DB7),
        ..Default::default()
    };
    let stats = unpack::execute(&packed, None, &crc32, true).unwrap();
    assert_eq!(stats.frames_found, 0);
    assert_eq!(stats.integrity_failures, 250);
}
