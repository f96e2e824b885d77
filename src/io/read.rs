//! Decompressing input adapter: [`Lz4Decoder`].
//!
//! Wraps any [`Read`] source of LZ4 frame bytes and serves the decoded
//! payload. Compressed input is pulled in capacity-sized slabs and fed to the
//! frame context on demand; back-to-back frames in one source decode as a
//! single continuous stream.

use std::io::{self, Read};

use crate::frame::{DecompressionContext, Dictionary};

/// Slab size for both the compressed-input and decoded-output buffers when
/// none is given.
const DEFAULT_BUF_SIZE: usize = 4 * 1024;

// ─────────────────────────────────────────────────────────────────────────────
// Lz4Decoder
// ─────────────────────────────────────────────────────────────────────────────

/// A [`Read`] adapter that decompresses LZ4 frames pulled from `R`.
///
/// Reads return decoded bytes only; headers, block sizes, and checksums are
/// consumed internally. End-of-stream is reported when the source is
/// exhausted on a frame boundary. A source that ends mid-frame yields an
/// [`io::ErrorKind::UnexpectedEof`] error, and any decoding error leaves the
/// decoder in a terminal failed state.
pub struct Lz4Decoder<'d, R: Read> {
    source: R,
    ctx: DecompressionContext,
    dict: Option<&'d Dictionary>,
    /// Compressed bytes, `src_pos..src_len` still unconsumed.
    src_buf: Vec<u8>,
    src_len: usize,
    src_pos: usize,
    /// Decoded bytes, `out_pos..out_len` not yet handed to the caller.
    out_buf: Vec<u8>,
    out_len: usize,
    out_pos: usize,
    /// Last hint from the context: zero exactly on frame boundaries.
    frame_hint: usize,
    source_eof: bool,
    failed: bool,
}

impl<'d, R: Read> Lz4Decoder<'d, R> {
    /// Wrap `source` with the default buffer capacity.
    pub fn new(source: R) -> io::Result<Lz4Decoder<'d, R>> {
        Self::build(source, DEFAULT_BUF_SIZE, None)
    }

    /// Wrap `source` with `capacity`-byte input and output buffers. Small
    /// capacities only cost extra refills; they never break decoding.
    pub fn with_capacity(capacity: usize, source: R) -> io::Result<Lz4Decoder<'d, R>> {
        Self::build(source, capacity, None)
    }

    /// Wrap `source` and resolve dictionary references against `dict`. Frames
    /// compressed with a different dictionary will fail or decode to garbage,
    /// depending on what the frame records.
    pub fn with_dictionary(source: R, dict: &'d Dictionary) -> io::Result<Lz4Decoder<'d, R>> {
        Self::build(source, DEFAULT_BUF_SIZE, Some(dict))
    }

    fn build(
        source: R,
        capacity: usize,
        dict: Option<&'d Dictionary>,
    ) -> io::Result<Lz4Decoder<'d, R>> {
        let ctx = DecompressionContext::new().map_err(|e| {
            io::Error::other(format!("Allocation error: can't create LZ4F context: {}", e))
        })?;
        // A zero capacity could never make progress.
        let capacity = capacity.max(1);
        Ok(Lz4Decoder {
            source,
            ctx,
            dict,
            src_buf: vec![0u8; capacity],
            src_len: 0,
            src_pos: 0,
            out_buf: vec![0u8; capacity],
            out_len: 0,
            out_pos: 0,
            frame_hint: 0,
            source_eof: false,
            failed: false,
        })
    }

    /// Give the source back, e.g. to read whatever follows the frames.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Shared reference to the wrapped source.
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Mutable reference to the wrapped source. Reading from it directly
    /// will desynchronize the decoder mid-frame.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Pull compressed bytes from the source into `src_buf`.
    ///
    /// Leaves the buffer positions untouched on error, so a transient source
    /// failure can be retried by the caller.
    fn refill(&mut self) -> io::Result<usize> {
        loop {
            match self.source.read(&mut self.src_buf) {
                Ok(n) => {
                    self.src_len = n;
                    self.src_pos = 0;
                    return Ok(n);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Decode until at least one output byte is available or the stream ends.
    /// Returns `false` on clean end-of-stream.
    fn fill_out_buf(&mut self) -> io::Result<bool> {
        loop {
            if self.src_pos >= self.src_len {
                if !self.source_eof && self.refill()? == 0 {
                    self.source_eof = true;
                }
                if self.source_eof {
                    // Between frames this is ordinary EOF; inside one it
                    // means the tail of the frame never arrived.
                    if self.frame_hint != 0 {
                        self.failed = true;
                        return Err(io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            "Truncated LZ4 frame",
                        ));
                    }
                    return Ok(false);
                }
            }

            let (consumed, produced, hint) = match self.ctx.decompress(
                &mut self.out_buf,
                &self.src_buf[self.src_pos..self.src_len],
                self.dict.map(|d| d.content()),
            ) {
                Ok(step) => step,
                Err(e) => {
                    self.failed = true;
                    return Err(e.into());
                }
            };
            self.src_pos += consumed;
            self.frame_hint = hint;

            if produced > 0 {
                self.out_len = produced;
                self.out_pos = 0;
                return Ok(true);
            }
            // Header or checksum bytes: input consumed, nothing decoded yet.
        }
    }
}

impl<R: Read> Read for Lz4Decoder<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.failed {
            return Err(io::Error::other("LZ4 decoder in failed state"));
        }
        if buf.is_empty() {
            return Ok(0);
        }
        if self.out_pos >= self.out_len && !self.fill_out_buf()? {
            return Ok(0);
        }
        let available = &self.out_buf[self.out_pos..self.out_len];
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.out_pos += n;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::compress_frame_to_vec;
    use crate::frame::CompressionLevel;

    /// An empty source is plain EOF, not an error: no frame is also fine.
    #[test]
    fn empty_source_is_eof() {
        let mut decoder = Lz4Decoder::new(io::empty()).expect("create decoder");
        let mut buf = [0u8; 16];
        assert_eq!(decoder.read(&mut buf).expect("read"), 0);
        // EOF is sticky.
        assert_eq!(decoder.read(&mut buf).expect("read"), 0);
    }

    /// Zero-length destination buffers are a no-op, per the Read contract.
    #[test]
    fn zero_len_read_is_noop() {
        let frame = compress_frame_to_vec(b"payload", CompressionLevel::Fastest).expect("frame");
        let mut decoder = Lz4Decoder::new(&frame[..]).expect("create decoder");
        assert_eq!(decoder.read(&mut []).expect("read"), 0);
        let mut out = Vec::new();
        decoder.read_to_end(&mut out).expect("read_to_end");
        assert_eq!(out, b"payload");
    }

    /// A tiny buffer capacity forces many refills but decodes the same bytes.
    #[test]
    fn small_capacity_still_decodes() {
        let payload: Vec<u8> = (0..40_000u32).map(|i| (i % 251) as u8).collect();
        let frame = compress_frame_to_vec(&payload, CompressionLevel::Balanced).expect("frame");
        let mut decoder = Lz4Decoder::with_capacity(7, &frame[..]).expect("create decoder");
        let mut out = Vec::new();
        decoder.read_to_end(&mut out).expect("read_to_end");
        assert_eq!(out, payload);
    }

    /// `into_inner` hands the source back once decoding is done.
    #[test]
    fn into_inner_returns_source() {
        let stream = compress_frame_to_vec(b"front", CompressionLevel::Fastest).expect("frame");
        let total = stream.len() as u64;
        let mut decoder = Lz4Decoder::new(io::Cursor::new(stream)).expect("create decoder");
        let mut out = Vec::new();
        decoder.read_to_end(&mut out).expect("read_to_end");
        assert_eq!(out, b"front");
        assert_eq!(decoder.into_inner().position(), total);
    }

    /// Bytes after the final frame that are not another frame are a protocol
    /// error, not a silent end-of-stream.
    #[test]
    fn garbage_after_frame_errors() {
        let mut stream = compress_frame_to_vec(b"front", CompressionLevel::Fastest).expect("frame");
        stream.extend_from_slice(b"trailing junk");
        let mut decoder = Lz4Decoder::new(&stream[..]).expect("create decoder");
        let mut out = Vec::new();
        let err = decoder.read_to_end(&mut out).expect_err("junk must not decode");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
