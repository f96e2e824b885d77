//! E2E: streaming round trips through the Read/Write adapters.
//!
//! Covers:
//! - Header-at-construction, flush-forces-a-decodable-prefix, footer-on-finish
//! - Empty, one-byte, and megabyte-scale payloads
//! - Write-chunking patterns (with and without interleaved flushes)
//! - Back-to-back frames decoded as one continuous stream
//! - The whole-stream helpers and one-shot helpers against each other

extern crate lz4_stream;

use std::cell::RefCell;
use std::io::{self, Read, Write};
use std::rc::Rc;

use lz4_stream::{
    compress_frame_to_vec, compress_stream, decompress_frame_to_vec, decompress_stream,
    CompressionLevel, Lz4Decoder, Lz4Encoder,
};

/// In-memory sink the test can inspect while the encoder still holds it.
#[derive(Clone, Default)]
struct SharedSink(Rc<RefCell<Vec<u8>>>);

impl SharedSink {
    fn snapshot(&self) -> Vec<u8> {
        self.0.borrow().clone()
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Deterministic pseudo-random bytes (xorshift64), poorly compressible.
fn random_bytes(len: usize, mut state: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        out.extend_from_slice(&state.to_le_bytes());
    }
    out.truncate(len);
    out
}

fn decode_all(stream: &[u8]) -> Vec<u8> {
    let mut decoder = Lz4Decoder::new(stream).expect("create decoder");
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).expect("decode stream");
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: the fox walk-through — split writes, flush, finish, 5-byte reads
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn fox_scenario_end_to_end() {
    let sink = SharedSink::default();
    let mut encoder = Lz4Encoder::new(sink.clone()).expect("create encoder");

    encoder.write_all(b"the quick ").expect("write 10 bytes");
    encoder.write_all(b"brown fox").expect("write 9 bytes");
    encoder.flush().expect("flush");

    // After flush the sink holds a decodable prefix: exactly the 19 bytes so
    // far, even though the frame is not finished yet.
    let prefix = sink.snapshot();
    let mut decoder = Lz4Decoder::new(&prefix[..]).expect("create decoder");
    let mut first = [0u8; 19];
    decoder.read_exact(&mut first).expect("prefix must decode");
    assert_eq!(&first, b"the quick brown fox");

    encoder.finish().expect("finish");
    let full = sink.snapshot();
    assert!(full.len() > prefix.len(), "footer must add bytes");

    // Decode the finished stream five bytes at a time.
    let mut decoder = Lz4Decoder::new(&full[..]).expect("create decoder");
    let mut out = Vec::new();
    let mut buf = [0u8; 5];
    loop {
        let n = decoder.read(&mut buf).expect("read");
        if n == 0 {
            break;
        }
        out.extend_from_slice(&buf[..n]);
    }
    assert_eq!(out, b"the quick brown fox");
    assert_eq!(decoder.read(&mut buf).expect("read at EOF"), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: degenerate payloads — empty and single byte
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_payload_round_trips() {
    let encoder = Lz4Encoder::new(Vec::new()).expect("create encoder");
    let stream = encoder.finish().expect("finish");
    assert!(!stream.is_empty(), "even an empty frame has header and footer");
    assert_eq!(decode_all(&stream), b"");
}

#[test]
fn one_byte_payload_round_trips() {
    let mut encoder = Lz4Encoder::new(Vec::new()).expect("create encoder");
    encoder.write_all(b"x").expect("write");
    let stream = encoder.finish().expect("finish");
    assert_eq!(decode_all(&stream), b"x");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: a megabyte of pseudo-random bytes survives byte-for-byte
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn megabyte_random_round_trips() {
    let payload = random_bytes(1_000_000, 0x2545F4914F6CDD1D);

    let mut encoder =
        Lz4Encoder::with_level(Vec::new(), CompressionLevel::Fastest).expect("create encoder");
    for chunk in payload.chunks(8 * 1024) {
        encoder.write_all(chunk).expect("write chunk");
    }
    let stream = encoder.finish().expect("finish");

    assert_eq!(decode_all(&stream), payload);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: chunking patterns never change what decodes back out
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn write_chunking_is_invisible_to_the_reader() {
    let payload = b"Pack my box with five dozen liquor jugs. ".repeat(9_000);

    // One-shot write.
    let mut encoder = Lz4Encoder::new(Vec::new()).expect("create encoder");
    encoder.write_all(&payload).expect("write");
    let oneshot = encoder.finish().expect("finish");

    // Jagged chunks, including single bytes and a chunk larger than the
    // staging buffer.
    let mut encoder = Lz4Encoder::new(Vec::new()).expect("create encoder");
    let mut pos = 0;
    for size in [1usize, 7, 300_000, 1, 4096].iter().cycle() {
        if pos >= payload.len() {
            break;
        }
        let end = (pos + size).min(payload.len());
        encoder.write_all(&payload[pos..end]).expect("write chunk");
        pos = end;
    }
    let jagged = encoder.finish().expect("finish");

    // Flush between every chunk.
    let mut encoder = Lz4Encoder::new(Vec::new()).expect("create encoder");
    for chunk in payload.chunks(100_000) {
        encoder.write_all(chunk).expect("write chunk");
        encoder.flush().expect("flush");
    }
    let flushed = encoder.finish().expect("finish");

    assert_eq!(decode_all(&oneshot), payload);
    assert_eq!(decode_all(&jagged), payload);
    assert_eq!(decode_all(&flushed), payload);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: concatenated frames read as one continuous stream
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn concatenated_frames_decode_as_one_stream() {
    let mut stream = Vec::new();
    for part in [&b"first frame"[..], b"", b"third frame"] {
        let mut encoder = Lz4Encoder::new(&mut stream).expect("create encoder");
        encoder.write_all(part).expect("write");
        encoder.finish().expect("finish");
    }
    assert_eq!(decode_all(&stream), b"first framethird frame");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: every compression level round-trips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn all_levels_round_trip() {
    let payload = b"level test payload, mildly repetitive, mildly repetitive. ".repeat(200);
    for level in [
        CompressionLevel::Default,
        CompressionLevel::Fastest,
        CompressionLevel::Balanced,
        CompressionLevel::Best,
    ] {
        let mut encoder = Lz4Encoder::with_level(Vec::new(), level).expect("create encoder");
        encoder.write_all(&payload).expect("write");
        let stream = encoder.finish().expect("finish");
        assert_eq!(decode_all(&stream), payload, "level {level:?}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: whole-stream helpers and one-shot helpers agree
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn helpers_agree_with_adapters() {
    let payload = random_bytes(70_000, 0xDEADBEEFCAFE);

    let oneshot = compress_frame_to_vec(&payload, CompressionLevel::Balanced).expect("one-shot");
    assert_eq!(decompress_frame_to_vec(&oneshot).expect("one-shot decode"), payload);
    assert_eq!(decode_all(&oneshot), payload);

    let mut streamed = Vec::new();
    let (read, written) = compress_stream(
        &mut &payload[..],
        &mut streamed,
        CompressionLevel::Balanced,
        None,
    )
    .expect("compress_stream");
    assert_eq!(read, payload.len() as u64);
    assert_eq!(written, streamed.len() as u64);

    let mut restored = Vec::new();
    decompress_stream(&mut &streamed[..], &mut restored, None).expect("decompress_stream");
    assert_eq!(restored, payload);
    assert_eq!(decompress_frame_to_vec(&streamed).expect("one-shot decode"), payload);
}
