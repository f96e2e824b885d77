//! E2E: property-based checks over the streaming adapters.
//!
//! Random payload shapes, write-chunking patterns, buffer capacities, and
//! truncation points, all driven by proptest:
//! - whatever goes in comes back out, at every level
//! - chunking and buffer sizes never leak into the decoded bytes
//! - every flush leaves a decodable prefix
//! - every strict prefix of a frame reports UnexpectedEof, never success

extern crate lz4_stream;

use std::cell::RefCell;
use std::io::{self, Read, Write};
use std::rc::Rc;

use proptest::prelude::*;

use lz4_stream::{CompressionLevel, Lz4Decoder, Lz4Encoder};

#[derive(Clone, Default)]
struct SharedSink(Rc<RefCell<Vec<u8>>>);

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Payload shapes: uniform noise, single-byte runs, and repetitive text.
fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..16_384),
        (any::<u8>(), 0..16_384usize).prop_map(|(byte, len)| vec![byte; len]),
        (0..400usize).prop_map(|n| b"structured, repetitive payload material. ".repeat(n)),
    ]
}

fn level_strategy() -> impl Strategy<Value = CompressionLevel> {
    prop_oneof![
        Just(CompressionLevel::Default),
        Just(CompressionLevel::Fastest),
        Just(CompressionLevel::Balanced),
        Just(CompressionLevel::Best),
    ]
}

fn encode(payload: &[u8], level: CompressionLevel) -> Vec<u8> {
    let mut encoder = Lz4Encoder::with_level(Vec::new(), level).expect("create encoder");
    encoder.write_all(payload).expect("write");
    encoder.finish().expect("finish")
}

fn decode(stream: &[u8], capacity: usize) -> io::Result<Vec<u8>> {
    let mut decoder = Lz4Decoder::with_capacity(capacity, stream)?;
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    /// Whatever goes in comes back out, at every level.
    #[test]
    fn prop_round_trip(payload in payload_strategy(), level in level_strategy()) {
        let stream = encode(&payload, level);
        let restored = decode(&stream, 4096).expect("decode");
        prop_assert_eq!(restored, payload);
    }

    /// Write-chunk sizes and decoder buffer capacity are invisible in the
    /// decoded bytes.
    #[test]
    fn prop_chunking_is_invisible(
        payload in payload_strategy(),
        chunks in prop::collection::vec(1usize..10_000, 1..16),
        capacity in 1usize..10_000,
    ) {
        let mut encoder = Lz4Encoder::new(Vec::new()).expect("create encoder");
        let mut pos = 0;
        for size in chunks.iter().cycle() {
            if pos >= payload.len() {
                break;
            }
            let end = (pos + size).min(payload.len());
            encoder.write_all(&payload[pos..end]).expect("write chunk");
            pos = end;
        }
        let stream = encoder.finish().expect("finish");

        let restored = decode(&stream, capacity).expect("decode");
        prop_assert_eq!(restored, payload);
    }

    /// After any flush, the bytes written so far decode from the sink.
    #[test]
    fn prop_flush_leaves_decodable_prefix(
        payload in payload_strategy(),
        split in 0.0f64..1.0,
    ) {
        let k = (payload.len() as f64 * split) as usize;
        let sink = SharedSink::default();
        let mut encoder = Lz4Encoder::new(sink.clone()).expect("create encoder");

        encoder.write_all(&payload[..k]).expect("write head");
        encoder.flush().expect("flush");

        let prefix = sink.0.borrow().clone();
        let mut decoder = Lz4Decoder::new(&prefix[..]).expect("create decoder");
        let mut head = vec![0u8; k];
        decoder.read_exact(&mut head).expect("flushed bytes must decode");
        prop_assert_eq!(head.as_slice(), &payload[..k]);

        encoder.write_all(&payload[k..]).expect("write tail");
        encoder.finish().expect("finish");
        let full = sink.0.borrow().clone();
        let restored = decode(&full, 4096).expect("decode full stream");
        prop_assert_eq!(restored, payload);
    }

    /// A strict prefix of a frame is always UnexpectedEof: incomplete, never
    /// invalid and never silently complete.
    #[test]
    fn prop_truncation_is_unexpected_eof(
        payload in payload_strategy(),
        cut in 0.0f64..1.0,
    ) {
        let stream = encode(&payload, CompressionLevel::Fastest);
        // Strict prefix: at least the first byte, at most all but the last.
        let cut = 1 + ((stream.len() - 2) as f64 * cut) as usize;

        let err = decode(&stream[..cut], 4096).expect_err("prefix must not decode cleanly");
        prop_assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
