//! Compressing output adapter: [`Lz4Encoder`].
//!
//! Wraps any [`Write`] sink and turns everything written into one LZ4 frame.
//! Bytes accumulate in a staging buffer and are compressed-and-forwarded when
//! it fills, on `flush`, and at finalization. The frame header goes out at
//! construction; the footer goes out exactly once, via [`Lz4Encoder::finish`]
//! or best-effort on drop.

use std::io::{self, Write};
use std::marker::PhantomData;

use crate::frame::{
    compress_bound, CompressionContext, CompressionLevel, Dictionary, Preferences, MAX_FH_SIZE,
};

// ─────────────────────────────────────────────────────────────────────────────
// Lz4Encoder
// ─────────────────────────────────────────────────────────────────────────────

/// A [`Write`] adapter that compresses into an LZ4 frame on its way to `W`.
///
/// Construction eagerly writes the frame header to the sink, so even an
/// immediately dropped encoder leaves a structurally valid (empty) frame
/// behind. Call [`finish`](Lz4Encoder::finish) to close the frame and get the
/// sink back; a plain drop writes the footer too but has nowhere to report
/// errors.
///
/// After a compression or sink error the encoder is in a terminal failed
/// state: further writes are refused and only the drop-time footer attempt
/// remains.
#[derive(Debug)]
pub struct Lz4Encoder<'d, W: Write> {
    /// `None` only after `finish` has taken the sink.
    sink: Option<W>,
    ctx: CompressionContext,
    /// Uncompressed bytes awaiting a compress-and-forward step. Holds at most
    /// `staging_limit` bytes (one less than the allocated capacity).
    staging: Vec<u8>,
    staging_limit: usize,
    /// Scratch for compressed output, sized so any single update of a full
    /// staging buffer fits.
    out: Vec<u8>,
    finished: bool,
    failed: bool,
    /// The digested dictionary handed to `begin` stays referenced by the
    /// native context for the whole frame; this pins that borrow.
    _dict: PhantomData<&'d Dictionary>,
}

impl<'d, W: Write> Lz4Encoder<'d, W> {
    /// Start a frame at the default effort (`Balanced`).
    pub fn new(sink: W) -> io::Result<Lz4Encoder<'d, W>> {
        Self::build(sink, CompressionLevel::Balanced, None)
    }

    /// Start a frame at an explicit compression level.
    pub fn with_level(sink: W, level: CompressionLevel) -> io::Result<Lz4Encoder<'d, W>> {
        Self::build(sink, level, None)
    }

    /// Start a dictionary-seeded frame. The decoding side must use the same
    /// dictionary bytes; the dictionary must outlive the encoder.
    pub fn with_dictionary(
        sink: W,
        level: CompressionLevel,
        dict: &'d Dictionary,
    ) -> io::Result<Lz4Encoder<'d, W>> {
        Self::build(sink, level, Some(dict))
    }

    fn build(
        mut sink: W,
        level: CompressionLevel,
        dict: Option<&'d Dictionary>,
    ) -> io::Result<Lz4Encoder<'d, W>> {
        let prefs = Preferences::with_level(level);
        let mut ctx = CompressionContext::new().map_err(|e| {
            io::Error::other(format!("Allocation error: can't create LZ4F context: {}", e))
        })?;

        // One spare byte beyond the flush threshold, so a single-byte write
        // into a full buffer stays a plain append.
        let staging_size = compress_bound(0, &prefs).max(MAX_FH_SIZE) + 1;
        let mut out = vec![0u8; compress_bound(staging_size, &prefs)];

        // The header is a side effect of construction, not of the first write.
        let header_len = ctx.begin(&mut out, &prefs, dict)?;
        sink.write_all(&out[..header_len])?;

        Ok(Lz4Encoder {
            sink: Some(sink),
            ctx,
            staging: Vec::with_capacity(staging_size),
            staging_limit: staging_size - 1,
            out,
            finished: false,
            failed: false,
            _dict: PhantomData,
        })
    }

    /// Close the frame and hand the sink back.
    ///
    /// Compresses any staged bytes, writes the footer (end marker), and
    /// consumes the encoder — a second finalization is unrepresentable.
    pub fn finish(mut self) -> io::Result<W> {
        self.end_frame()?;
        match self.sink.take() {
            Some(sink) => Ok(sink),
            None => Err(io::Error::other("encoder sink already taken")),
        }
    }

    /// Compress-and-forward the staging buffer (a zero-byte update is legal).
    fn forward_staged(&mut self) -> io::Result<()> {
        let produced = match self.ctx.update(&mut self.out, &self.staging) {
            Ok(n) => n,
            Err(e) => {
                self.failed = true;
                return Err(e.into());
            }
        };
        self.staging.clear();
        self.write_to_sink(produced)
    }

    /// Forward `n` bytes of the scratch buffer to the sink.
    ///
    /// A sink failure here is terminal: the staged bytes were already
    /// consumed by the context, so the stream cannot be resumed.
    fn write_to_sink(&mut self, n: usize) -> io::Result<()> {
        if n == 0 {
            return Ok(());
        }
        let sink = match self.sink.as_mut() {
            Some(sink) => sink,
            None => return Err(io::Error::other("encoder sink already taken")),
        };
        if let Err(e) = sink.write_all(&self.out[..n]) {
            self.failed = true;
            return Err(e);
        }
        Ok(())
    }

    /// Finalize exactly once: forward staged bytes, then emit the footer.
    ///
    /// Runs even after an earlier failure so the sink ends on a frame
    /// boundary where possible; the first error wins.
    fn end_frame(&mut self) -> io::Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;

        let mut result = self.forward_staged();
        match self.ctx.end(&mut self.out) {
            Ok(n) => {
                if let Err(e) = self.write_to_sink(n) {
                    result = result.and(Err(e));
                }
            }
            Err(e) => {
                self.failed = true;
                result = result.and(Err(e.into()));
            }
        }
        result
    }
}

impl<W: Write> Write for Lz4Encoder<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.failed {
            return Err(failed_state());
        }
        let mut rest = buf;
        while !rest.is_empty() {
            let space = self.staging_limit - self.staging.len();
            if space == 0 {
                self.forward_staged()?;
                continue;
            }
            let n = space.min(rest.len());
            self.staging.extend_from_slice(&rest[..n]);
            rest = &rest[n..];
        }
        Ok(buf.len())
    }

    /// Compress-and-forward staged bytes, force the context to emit any block
    /// it is still buffering, then flush the sink. Afterwards the sink holds
    /// a decodable prefix of the stream.
    fn flush(&mut self) -> io::Result<()> {
        if self.failed {
            return Err(failed_state());
        }
        self.forward_staged()?;
        let produced = match self.ctx.flush(&mut self.out) {
            Ok(n) => n,
            Err(e) => {
                self.failed = true;
                return Err(e.into());
            }
        };
        self.write_to_sink(produced)?;
        match self.sink.as_mut() {
            Some(sink) => sink.flush(),
            None => Ok(()),
        }
    }
}

impl<W: Write> Drop for Lz4Encoder<'_, W> {
    /// Best-effort finalization: the footer still gets attempted after an
    /// earlier error, and nothing here can escape the drop.
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.end_frame();
        }
    }
}

fn failed_state() -> io::Error {
    io::Error::other("LZ4 encoder in failed state")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "nope"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// The frame header is written during construction, not deferred to the
    /// first write: a sink that cannot accept bytes fails `new` itself.
    #[test]
    fn header_is_written_eagerly() {
        let err = Lz4Encoder::new(FailingWriter).expect_err("construction must write the header");
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    /// An encoder that is finished without any writes still leaves a complete
    /// (empty) frame: magic number up front, end marker at the back.
    #[test]
    fn empty_frame_is_complete() {
        let encoder = Lz4Encoder::new(Vec::new()).expect("create encoder");
        let frame = encoder.finish().expect("finish empty frame");
        assert_eq!(&frame[..4], &[0x04, 0x22, 0x4D, 0x18]);
        assert_eq!(&frame[frame.len() - 4..], &[0, 0, 0, 0]);
    }

    /// Staging capacity comes from the zero-input bound, with the one-byte
    /// overflow reserve on top.
    #[test]
    fn staging_sized_from_bound() {
        let prefs = Preferences::with_level(CompressionLevel::Balanced);
        let encoder = Lz4Encoder::new(Vec::new()).expect("create encoder");
        let expected = compress_bound(0, &prefs).max(MAX_FH_SIZE);
        assert_eq!(encoder.staging_limit, expected);
        assert_eq!(encoder.staging.capacity(), expected + 1);
        assert_eq!(encoder.out.len(), compress_bound(expected + 1, &prefs));
    }

    /// Writes far larger than the staging buffer pass through in one call.
    #[test]
    fn oversized_write_is_accepted_whole() {
        let payload = vec![42u8; 600_000];
        let mut encoder =
            Lz4Encoder::with_level(Vec::new(), CompressionLevel::Fastest).expect("create encoder");
        let n = encoder.write(&payload).expect("write");
        assert_eq!(n, payload.len());
        let frame = encoder.finish().expect("finish");
        assert!(!frame.is_empty());
    }
}
