//! E2E: dictionary-seeded compression and decompression.
//!
//! Covers:
//! - Round trips where both sides share the same dictionary
//! - The dictionary actually changing the produced stream
//! - Mismatched or missing dictionaries: an error or different bytes,
//!   never a silent false round trip
//! - Loading dictionaries from files, including the 64 KiB tail window
//! - One dictionary shared across threads and reused across codecs

extern crate lz4_stream;

use std::io::{Read, Write};

use lz4_stream::{CompressionLevel, Dictionary, Lz4Decoder, Lz4Encoder};

/// A payload built almost entirely out of dictionary material, so matches
/// against the dictionary window are guaranteed to pay off.
const SENTENCE: &[u8] = b"the quick brown fox jumps over the lazy dog; \
pack my box with five dozen liquor jugs; how vexingly quick daft zebras jump; ";

fn dictionary_content() -> Vec<u8> {
    SENTENCE.repeat(40)
}

fn payload() -> Vec<u8> {
    SENTENCE.repeat(100)
}

fn compress_with(dict: Option<&Dictionary>, payload: &[u8]) -> Vec<u8> {
    let mut encoder = match dict {
        Some(dict) => Lz4Encoder::with_dictionary(Vec::new(), CompressionLevel::Balanced, dict)
            .expect("create encoder"),
        None => Lz4Encoder::with_level(Vec::new(), CompressionLevel::Balanced)
            .expect("create encoder"),
    };
    encoder.write_all(payload).expect("write payload");
    encoder.finish().expect("finish")
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: shared dictionary round trip
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn shared_dictionary_round_trips() {
    let dict = Dictionary::new(&dictionary_content()).expect("create dictionary");
    let payload = payload();

    let stream = compress_with(Some(&dict), &payload);

    let mut decoder = Lz4Decoder::with_dictionary(&stream[..], &dict).expect("create decoder");
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).expect("decode");
    assert_eq!(out, payload);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: the dictionary visibly changes the stream
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn dictionary_changes_the_stream() {
    let dict = Dictionary::new(&dictionary_content()).expect("create dictionary");
    let payload = payload();

    let with_dict = compress_with(Some(&dict), &payload);
    let without = compress_with(None, &payload);

    assert_ne!(
        with_dict, without,
        "dictionary matches must show up in the compressed bytes"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: wrong or missing dictionary can never silently round-trip
// ─────────────────────────────────────────────────────────────────────────────

/// The frame carries no dictionary ID and no content checksum, so the reader
/// cannot detect the mismatch up front: the acceptable outcomes are a decode
/// error or different bytes. Silently equal output would mean the dictionary
/// did nothing.
#[test]
fn mismatched_dictionary_errors_or_differs() {
    let dict_a = Dictionary::new(&dictionary_content()).expect("create dictionary a");
    let dict_b = Dictionary::new(&b"entirely different seed material, shared with no one. "
        .repeat(60))
        .expect("create dictionary b");
    let payload = payload();
    let stream = compress_with(Some(&dict_a), &payload);

    for wrong in [Some(&dict_b), None] {
        let mut decoder = match wrong {
            Some(dict) => Lz4Decoder::with_dictionary(&stream[..], dict).expect("create decoder"),
            None => Lz4Decoder::new(&stream[..]).expect("create decoder"),
        };
        let mut out = Vec::new();
        match decoder.read_to_end(&mut out) {
            Err(_) => {}
            Ok(_) => assert_ne!(out, payload, "wrong dictionary must not reproduce the payload"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: file-backed dictionaries, including the tail window
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn file_dictionary_round_trips() {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(&dictionary_content()).expect("write dictionary file");

    let from_file = Dictionary::from_file(file.path()).expect("load dictionary");
    let payload = payload();
    let stream = compress_with(Some(&from_file), &payload);

    let mut decoder =
        Lz4Decoder::with_dictionary(&stream[..], &from_file).expect("create decoder");
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).expect("decode");
    assert_eq!(out, payload);
}

/// A file larger than 64 KiB contributes only its last 64 KiB; digesting the
/// tail directly must behave identically.
#[test]
fn oversized_file_keeps_the_tail_window() {
    let mut big = Vec::new();
    let mut counter = 0u32;
    while big.len() < 200_000 {
        big.extend_from_slice(format!("run {counter:08} of filler text, ").as_bytes());
        counter += 1;
    }

    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(&big).expect("write dictionary file");

    let from_file = Dictionary::from_file(file.path()).expect("load dictionary");
    let from_tail = Dictionary::new(&big[big.len() - 64 * 1024..]).expect("digest tail");
    assert_eq!(from_file.len(), 64 * 1024);

    // Same effective content, same deterministic codec: identical streams.
    let payload = payload();
    assert_eq!(
        compress_with(Some(&from_file), &payload),
        compress_with(Some(&from_tail), &payload)
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: one dictionary, many codecs, many threads
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn dictionary_is_shared_across_threads_and_codecs() {
    let dict = Dictionary::new(&dictionary_content()).expect("create dictionary");
    let payload = payload();

    std::thread::scope(|scope| {
        let mut handles = Vec::new();
        for _ in 0..4 {
            let dict = &dict;
            let payload = &payload;
            handles.push(scope.spawn(move || {
                // Two sequential frames per thread, reusing the same handle.
                for _ in 0..2 {
                    let stream = compress_with(Some(dict), payload);
                    let mut decoder =
                        Lz4Decoder::with_dictionary(&stream[..], dict).expect("create decoder");
                    let mut out = Vec::new();
                    decoder.read_to_end(&mut out).expect("decode");
                    assert_eq!(&out, payload);
                }
            }));
        }
        for handle in handles {
            handle.join().expect("worker thread");
        }
    });
}
