//! Streaming frame decompression over the native LZ4F context.
//!
//! [`DecompressionContext::decompress`] is the incremental primitive: it
//! consumes some compressed input, produces some decompressed output, and
//! reports both counts plus the library's next-read size hint. A hint of 0
//! means a frame footer was just consumed; the context then accepts a new
//! frame header, so back-to-back frames decode as one continuous stream.

use std::io;
use std::ptr::{self, NonNull};

use libc::{c_void, size_t};

use super::ffi;
use super::types::{check, FrameError, LZ4F_VERSION};

/// Scratch buffer size for whole-buffer decompression.
const DECOMP_BUF_SIZE: usize = 64 * 1024;

// ─────────────────────────────────────────────────────────────────────────────
// DecompressionContext — owned LZ4F_dctx
// ─────────────────────────────────────────────────────────────────────────────

/// An owned streaming decompression context.
///
/// Tracks frame parsing state across calls (header bytes seen so far, block
/// boundaries, linked-block history). Exclusively owned; dropping frees the
/// native context (`LZ4F_freeDecompressionContext`).
pub struct DecompressionContext {
    ctx: NonNull<ffi::LZ4FDecompressionCtx>,
}

// SAFETY: the native context is plain heap state with no thread affinity;
// exclusive ownership makes moving it across threads sound. Not Sync — every
// operation mutates it.
unsafe impl Send for DecompressionContext {}

impl DecompressionContext {
    /// Allocate a fresh decompression context.
    pub fn new() -> Result<DecompressionContext, FrameError> {
        let mut ctx: *mut ffi::LZ4FDecompressionCtx = ptr::null_mut();
        // SAFETY: out-pointer is valid for writes; LZ4F_VERSION pins the ABI.
        check(unsafe { ffi::LZ4F_createDecompressionContext(&mut ctx, LZ4F_VERSION) })?;
        // SAFETY: a successful create always sets a non-null context.
        Ok(DecompressionContext {
            ctx: unsafe { NonNull::new_unchecked(ctx) },
        })
    }

    /// Decompress as much of `src` into `dst` as fits.
    ///
    /// Returns `(consumed, produced, hint)`: bytes read from `src`, bytes
    /// written to `dst`, and the library's preferred size for the next input
    /// chunk. `hint == 0` means the current frame is complete. `produced` may
    /// be 0 while the call still makes progress (headers and checksums consume
    /// input without emitting output).
    ///
    /// `dict`, when present, must be the same bytes the frame was compressed
    /// with and must be supplied on every call of that stream.
    pub fn decompress(
        &mut self,
        dst: &mut [u8],
        src: &[u8],
        dict: Option<&[u8]>,
    ) -> Result<(usize, usize, usize), FrameError> {
        let mut dst_size: size_t = dst.len();
        let mut src_size: size_t = src.len();
        // SAFETY: both slices are valid for their lengths; the size pointers
        // are in/out parameters on the stack; null options selects defaults.
        let code = unsafe {
            match dict {
                Some(d) => ffi::LZ4F_decompress_usingDict(
                    self.ctx.as_ptr(),
                    dst.as_mut_ptr() as *mut c_void,
                    &mut dst_size,
                    src.as_ptr() as *const c_void,
                    &mut src_size,
                    d.as_ptr() as *const c_void,
                    d.len(),
                    ptr::null(),
                ),
                None => ffi::LZ4F_decompress(
                    self.ctx.as_ptr(),
                    dst.as_mut_ptr() as *mut c_void,
                    &mut dst_size,
                    src.as_ptr() as *const c_void,
                    &mut src_size,
                    ptr::null(),
                ),
            }
        };
        let hint = check(code)?;
        Ok((src_size, dst_size, hint))
    }
}

impl Drop for DecompressionContext {
    fn drop(&mut self) {
        // SAFETY: the context came from LZ4F_createDecompressionContext and is
        // freed exactly once.
        unsafe {
            ffi::LZ4F_freeDecompressionContext(self.ctx.as_ptr());
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot helper
// ─────────────────────────────────────────────────────────────────────────────

/// Decompress a complete buffer of one or more back-to-back frames.
///
/// Rejects truncated frames (`UnexpectedEof`) and anything that does not
/// parse as a frame (`InvalidData`); an empty input yields an empty output.
pub fn decompress_frame_to_vec(src: &[u8]) -> io::Result<Vec<u8>> {
    let mut ctx = DecompressionContext::new()
        .map_err(|e| io::Error::other(format!("Allocation error: can't create LZ4F context: {e}")))?;

    let mut out = Vec::new();
    let mut buf = vec![0u8; DECOMP_BUF_SIZE];
    let mut pos = 0;
    let mut hint = 0;
    while pos < src.len() {
        let (consumed, produced, next_hint) = ctx.decompress(&mut buf, &src[pos..], None)?;
        pos += consumed;
        out.extend_from_slice(&buf[..produced]);
        hint = next_hint;
    }
    if hint != 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Truncated LZ4 frame",
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::super::compress::compress_frame_to_vec;
    use super::super::types::CompressionLevel;
    use super::*;

    /// Contexts allocate and free cleanly.
    #[test]
    fn context_lifecycle() {
        let ctx = DecompressionContext::new().expect("create decompression context");
        drop(ctx);
    }

    /// One-shot round trip restores the original bytes.
    #[test]
    fn round_trip_one_shot() {
        let original = b"the quick brown fox jumps over the lazy dog";
        let compressed =
            compress_frame_to_vec(original, CompressionLevel::Balanced).expect("compress");
        let restored = decompress_frame_to_vec(&compressed).expect("decompress");
        assert_eq!(restored, original);
    }

    /// Two frames appended back-to-back decode as one continuous stream.
    #[test]
    fn concatenated_frames() {
        let mut stream =
            compress_frame_to_vec(b"first frame / ", CompressionLevel::Fastest).expect("compress");
        stream.extend(
            compress_frame_to_vec(b"second frame", CompressionLevel::Best).expect("compress"),
        );
        let restored = decompress_frame_to_vec(&stream).expect("decompress");
        assert_eq!(restored, b"first frame / second frame");
    }

    /// Garbage input is rejected as invalid data, not accepted or panicked on.
    #[test]
    fn garbage_input() {
        let garbage = b"\xDE\xAD\xBE\xEF\xCA\xFE\xBA\xBE\x00\x11\x22\x33";
        let err = decompress_frame_to_vec(garbage).expect_err("garbage must fail");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    /// A strict prefix of a valid frame is reported as truncation.
    #[test]
    fn truncated_frame() {
        let compressed =
            compress_frame_to_vec(b"some payload worth truncating", CompressionLevel::Balanced)
                .expect("compress");
        let err = decompress_frame_to_vec(&compressed[..compressed.len() - 3])
            .expect_err("truncated frame must fail");
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    /// No input, no output.
    #[test]
    fn empty_input() {
        let out = decompress_frame_to_vec(&[]).expect("empty input");
        assert!(out.is_empty());
    }
}
