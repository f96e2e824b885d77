//! Criterion benchmarks for the streaming frame adapters.
//!
//! Run with:
//!   cargo bench --bench frame

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use std::io::{Read, Write};

use lz4_stream::{CompressionLevel, Dictionary, Lz4Decoder, Lz4Encoder};

mod corpus {
    include!("corpus.rs");
}

fn bench_stream_adapters(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream_adapters");

    let dict = Dictionary::new(&corpus::synthetic_data(64 * 1024)).unwrap();

    for &chunk_size in &[65_536usize, 262_144, 4_194_304] {
        let text = corpus::synthetic_data(chunk_size);
        let mixed = corpus::mixed_data(chunk_size);

        // ── Lz4Encoder ───────────────────────────────────────────────────────
        // The sink is reused across iterations; a fresh encoder per iteration
        // is the adapter's real per-stream cost.
        {
            let mut sink = Vec::with_capacity(chunk_size);
            group.throughput(Throughput::Bytes(chunk_size as u64));
            group.bench_with_input(
                BenchmarkId::new("compress", chunk_size),
                &text,
                |b, text| {
                    b.iter(|| {
                        sink.clear();
                        let mut encoder =
                            Lz4Encoder::with_level(&mut sink, CompressionLevel::Fastest).unwrap();
                        encoder.write_all(text).unwrap();
                        encoder.finish().unwrap();
                    })
                },
            );
        }

        // ── Lz4Encoder with a dictionary ─────────────────────────────────────
        {
            let mut sink = Vec::with_capacity(chunk_size);
            group.throughput(Throughput::Bytes(chunk_size as u64));
            group.bench_with_input(
                BenchmarkId::new("compress_dict", chunk_size),
                &text,
                |b, text| {
                    b.iter(|| {
                        sink.clear();
                        let mut encoder = Lz4Encoder::with_dictionary(
                            &mut sink,
                            CompressionLevel::Fastest,
                            &dict,
                        )
                        .unwrap();
                        encoder.write_all(text).unwrap();
                        encoder.finish().unwrap();
                    })
                },
            );
        }

        // ── Lz4Decoder ───────────────────────────────────────────────────────
        {
            let mut encoder =
                Lz4Encoder::with_level(Vec::new(), CompressionLevel::Fastest).unwrap();
            encoder.write_all(&mixed).unwrap();
            let compressed = encoder.finish().unwrap();

            let mut out = Vec::with_capacity(chunk_size);
            group.throughput(Throughput::Bytes(chunk_size as u64));
            group.bench_with_input(
                BenchmarkId::new("decompress", chunk_size),
                &compressed,
                |b, compressed| {
                    b.iter(|| {
                        out.clear();
                        let mut decoder =
                            Lz4Decoder::with_capacity(64 * 1024, &compressed[..]).unwrap();
                        decoder.read_to_end(&mut out).unwrap();
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_stream_adapters);
criterion_main!(benches);
