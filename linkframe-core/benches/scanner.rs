use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use linkframe_core::{
    decoder::FrameDecoder,
    encoder::FrameEncoder,
    integrity::IntegrityScheme,
    scanner::{scan_stream, scan_stream_with_stats},
    ReceiveBuffer,
};

fn make_stream(num_frames: usize, chunk_len: usize) -> Vec<u8> {
    let encoder = FrameEncoder::new(IntegrityScheme::default());
    let mut stream = Vec::new();
    for i in 0..num_frames {
        let payload = vec![b'x'; chunk_len];
        stream.extend_from_slice(&encoder.encode(&payload));
        if i % 10 == 0 {
            // inject a bit of garbage periodically
            stream.extend_from_slice(b"GARBAGE");
        }
    }
    stream
}

fn bench_scanner(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner");
    let decoder = FrameDecoder::new(IntegrityScheme::default());

    for &chunk_len in &[1usize, 4, 8] {
        let stream = make_stream(5000, chunk_len);
        group.throughput(Throughput::Bytes(stream.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("scan_stream", chunk_len),
            &stream,
            |b, data| {
                b.iter(|| {
                    let res = scan_stream(&decoder, data);
                    criterion::black_box(res);
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("scan_stream_with_stats", chunk_len),
            &stream,
            |b, data| {
                b.iter(|| {
                    let res = scan_stream_with_stats(&decoder, data);
                    criterion::black_box(res);
                });
            },
        );

        // Same stream delivered one byte per decode call
        group.bench_with_input(
            BenchmarkId::new("byte_at_a_time", chunk_len),
            &stream,
            |b, data| {
                b.iter(|| {
                    let mut buf = ReceiveBuffer::with_capacity(64);
                    let mut frames = 0usize;
                    for &byte in data.iter() {
                        buf.push(byte);
                        if decoder.decode(&mut buf).payload().is_some() {
                            frames += 1;
                        }
                    }
                    criterion::black_box(frames);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_scanner);
criterion_main!(benches);
