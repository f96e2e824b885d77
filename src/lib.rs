//! Streaming LZ4 frame compression and decompression.
//!
//! This crate adapts the LZ4 frame format (the `.lz4` container understood
//! by the `lz4` command-line tool) to the standard [`std::io`] traits:
//!
//! * [`Lz4Encoder`] is a [`Write`](std::io::Write) sink that compresses
//!   everything written through it into one frame.
//! * [`Lz4Decoder`] is a [`Read`](std::io::Read) source that decodes one or
//!   more concatenated frames.
//! * [`Dictionary`] seeds both directions with up to 64 KiB of shared
//!   preset content, which helps on small payloads.
//!
//! The [`frame`] module underneath exposes the raw codec contexts and
//! one-shot helpers for callers that manage their own buffers.
//!
//! ```
//! use std::io::{Read, Write};
//! use lz4_stream::{Lz4Decoder, Lz4Encoder};
//!
//! # fn main() -> std::io::Result<()> {
//! let mut encoder = Lz4Encoder::new(Vec::new())?;
//! encoder.write_all(b"streaming example payload")?;
//! let compressed = encoder.finish()?;
//!
//! let mut decoder = Lz4Decoder::new(&compressed[..])?;
//! let mut restored = String::new();
//! decoder.read_to_string(&mut restored)?;
//! assert_eq!(restored, "streaming example payload");
//! # Ok(())
//! # }
//! ```

// Pulls in the native liblz4 objects; every declaration we call lives in
// `frame::ffi` because lz4-sys does not cover the CDict API.
use lz4_sys as _;

pub mod frame;
pub mod io;

pub use frame::{
    compress_frame_to_vec, decompress_frame_to_vec, CompressionLevel, Dictionary, FrameError,
};
pub use io::{compress_stream, decompress_stream, Lz4Decoder, Lz4Encoder};
