//! E2E: failure behavior of the streaming adapters.
//!
//! Covers:
//! - Truncated streams surfacing as `UnexpectedEof`, wherever the cut lands
//! - Garbage input surfacing as `InvalidData` with the library's error name
//! - The terminal failed state after a codec or sink error
//! - Sink and source I/O errors passing through with their original kind
//! - Drop-time finalization when `finish` is never called

extern crate lz4_stream;

use std::cell::RefCell;
use std::io::{self, Read, Write};
use std::rc::Rc;

use lz4_stream::{CompressionLevel, Lz4Decoder, Lz4Encoder};

fn compressed_fixture() -> Vec<u8> {
    let payload = b"truncation fixture payload, repeated for substance. ".repeat(40);
    let mut encoder = Lz4Encoder::new(Vec::new()).expect("create encoder");
    encoder.write_all(&payload).expect("write");
    encoder.finish().expect("finish")
}

/// Accepts `budget` write calls, then fails every further one.
#[derive(Debug)]
struct FailAfter {
    budget: usize,
}

impl Write for FailAfter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.budget == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink gone"));
        }
        self.budget -= 1;
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Always fails with a distinctive, non-codec error kind.
struct DeniedReader;

impl Read for DeniedReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "no access"))
    }
}

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

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: truncation anywhere in the stream is UnexpectedEof
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn truncated_stream_is_unexpected_eof() {
    let stream = compressed_fixture();
    // Mid-magic, mid-header, mid-block, and one byte short of the footer.
    for cut in [3, 5, stream.len() / 2, stream.len() - 1] {
        let mut decoder = Lz4Decoder::new(&stream[..cut]).expect("create decoder");
        let mut out = Vec::new();
        let err = decoder
            .read_to_end(&mut out)
            .expect_err("truncated input must not decode cleanly");
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof, "cut at {cut}");
        assert!(err.to_string().contains("Truncated"), "cut at {cut}: {err}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: garbage input is InvalidData, with the library's error name
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn garbage_input_is_invalid_data() {
    let mut decoder =
        Lz4Decoder::new(&b"this is not an LZ4 frame, not even close"[..]).expect("create decoder");
    let mut out = Vec::new();
    let err = decoder.read_to_end(&mut out).expect_err("garbage must not decode");
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    assert!(err.to_string().contains("LZ4F error:"), "{err}");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: codec errors leave the decoder terminally failed
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn decoder_failed_state_is_terminal() {
    let mut decoder =
        Lz4Decoder::new(&b"equally invalid bytes pretending to be a frame"[..])
            .expect("create decoder");
    let mut buf = [0u8; 32];
    decoder.read(&mut buf).expect_err("first read fails");

    let err = decoder.read(&mut buf).expect_err("decoder must stay failed");
    assert!(err.to_string().contains("failed state"), "{err}");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: sink errors poison the encoder
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn encoder_failed_state_is_terminal() {
    // Budget of one write call: the header goes through, nothing else does.
    let mut encoder = Lz4Encoder::with_level(FailAfter { budget: 1 }, CompressionLevel::Fastest)
        .expect("header write fits the budget");
    encoder.write_all(b"stays in staging").expect("buffered write succeeds");

    let err = encoder.flush().expect_err("flush must hit the dead sink");
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

    let err = encoder.write_all(b"more").expect_err("encoder must stay failed");
    assert!(err.to_string().contains("failed state"), "{err}");

    // finish still runs the footer attempt, and reports the sink failure.
    encoder.finish().expect_err("finish cannot succeed on a dead sink");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: I/O error kinds pass through unchanged
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn source_errors_pass_through_unpoisoned() {
    let mut decoder = Lz4Decoder::new(DeniedReader).expect("create decoder");
    let mut buf = [0u8; 16];

    let err = decoder.read(&mut buf).expect_err("source error must surface");
    assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);

    // A source error is not a codec error: the next read retries the source
    // instead of reporting a failed state.
    let err = decoder.read(&mut buf).expect_err("source is still erroring");
    assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: dropping an unfinished encoder still closes the frame
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn drop_finalizes_the_frame() {
    let sink = SharedSink::default();
    {
        let mut encoder = Lz4Encoder::new(sink.clone()).expect("create encoder");
        encoder.write_all(b"dropped, not finished").expect("write");
    }
    let stream = sink.0.borrow().clone();

    let mut decoder = Lz4Decoder::new(&stream[..]).expect("create decoder");
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).expect("frame must be complete");
    assert_eq!(out, b"dropped, not finished");
}
