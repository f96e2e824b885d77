//! E2E: wire-format interop against an independent LZ4 frame implementation.
//!
//! The `lz4` crate (liblz4 via its own bindings and adapter layer) plays the
//! other side here:
//! - frames produced by this crate decode through `lz4::Decoder`
//! - frames produced by `lz4::Encoder` decode through `Lz4Decoder`
//! - the one-shot helpers speak the same format as the streaming adapters
//!
//! Anything that only round-trips within this crate would not count as the
//! LZ4 frame format; this suite is what pins the format.

extern crate lz4;
extern crate lz4_stream;

use std::io::{Read, Write};

use lz4_stream::{
    compress_frame_to_vec, decompress_frame_to_vec, CompressionLevel, Lz4Decoder, Lz4Encoder,
};

/// A payload with both compressible structure and an incompressible tail.
fn mixed_payload() -> Vec<u8> {
    let mut payload = b"interoperability payload, block after block of it. ".repeat(1_500);
    let mut state = 0x0123456789ABCDEFu64;
    for _ in 0..4_000 {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        payload.extend_from_slice(&state.to_le_bytes());
    }
    payload
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: our encoder → their decoder
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn their_decoder_reads_our_frames() {
    let payload = mixed_payload();

    let mut encoder =
        Lz4Encoder::with_level(Vec::new(), CompressionLevel::Balanced).expect("create encoder");
    encoder.write_all(&payload).expect("write");
    let stream = encoder.finish().expect("finish");

    let mut decoder = lz4::Decoder::new(&stream[..]).expect("their decoder accepts the header");
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).expect("their decoder reads our frame");
    assert_eq!(out, payload);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: their encoder → our decoder
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn our_decoder_reads_their_frames() {
    let payload = mixed_payload();

    let mut encoder = lz4::EncoderBuilder::new()
        .level(4)
        .build(Vec::new())
        .expect("their encoder");
    encoder.write_all(&payload).expect("write");
    let (stream, result) = encoder.finish();
    result.expect("their finish");

    let mut decoder = Lz4Decoder::new(&stream[..]).expect("create decoder");
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).expect("our decoder reads their frame");
    assert_eq!(out, payload);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: one-shot helpers speak the same format
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn one_shots_share_the_format() {
    let payload = mixed_payload();

    let ours = compress_frame_to_vec(&payload, CompressionLevel::Fastest).expect("compress");
    let mut decoder = lz4::Decoder::new(&ours[..]).expect("their decoder");
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).expect("their decoder reads the one-shot frame");
    assert_eq!(out, payload);

    let mut encoder = lz4::EncoderBuilder::new()
        .build(Vec::new())
        .expect("their encoder");
    encoder.write_all(&payload).expect("write");
    let (theirs, result) = encoder.finish();
    result.expect("their finish");
    assert_eq!(decompress_frame_to_vec(&theirs).expect("decompress"), payload);
}
