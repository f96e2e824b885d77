//! Streaming frame compression over the native LZ4F context.
//!
//! [`CompressionContext`] owns one `LZ4F_cctx` and exposes the begin → update
//! → end lifecycle; exactly one frame is open per context at a time. The
//! [`compress_frame_to_vec`] helper runs the whole lifecycle over a single
//! buffer for callers that do not need streaming.

use std::io;
use std::ptr::{self, NonNull};

use libc::c_void;

use super::cdict::Dictionary;
use super::ffi;
use super::types::{check, CompressionLevel, FrameError, Preferences, LZ4F_VERSION, MAX_FH_SIZE};

// ─────────────────────────────────────────────────────────────────────────────
// Worst-case output bound
// ─────────────────────────────────────────────────────────────────────────────

/// Worst-case compressed size for feeding `src_size` bytes into an already
/// running frame. Covers one `update` call of that size plus any bytes the
/// context may still be buffering; also covers `flush` and `end` when
/// `src_size` is 0. Wraps `LZ4F_compressBound` (lz4frame.h:376-381).
pub fn compress_bound(src_size: usize, prefs: &Preferences) -> usize {
    // SAFETY: pure size computation over the prefs struct.
    unsafe { ffi::LZ4F_compressBound(src_size, prefs) }
}

// ─────────────────────────────────────────────────────────────────────────────
// CompressionContext — owned LZ4F_cctx
// ─────────────────────────────────────────────────────────────────────────────

/// An owned streaming compression context.
///
/// Exclusively owned, never shared: the native state mutates on every call.
/// Dropping the handle frees the native context
/// (`LZ4F_freeCompressionContext`).
#[derive(Debug)]
pub struct CompressionContext {
    ctx: NonNull<ffi::LZ4FCompressionCtx>,
}

// SAFETY: the native context is plain heap state with no thread affinity;
// exclusive ownership makes moving it across threads sound. Not Sync — every
// operation mutates it.
unsafe impl Send for CompressionContext {}

impl CompressionContext {
    /// Allocate a fresh compression context.
    pub fn new() -> Result<CompressionContext, FrameError> {
        let mut ctx: *mut ffi::LZ4FCompressionCtx = ptr::null_mut();
        // SAFETY: out-pointer is valid for writes; LZ4F_VERSION pins the ABI.
        check(unsafe { ffi::LZ4F_createCompressionContext(&mut ctx, LZ4F_VERSION) })?;
        // SAFETY: a successful create always sets a non-null context.
        Ok(CompressionContext {
            ctx: unsafe { NonNull::new_unchecked(ctx) },
        })
    }

    /// Open a frame: writes the frame header into `dst` and returns its size.
    ///
    /// With a dictionary, the header is seeded from its digested form and the
    /// decoder must be given the same dictionary bytes. `dst` must hold at
    /// least [`MAX_FH_SIZE`] bytes.
    pub fn begin(
        &mut self,
        dst: &mut [u8],
        prefs: &Preferences,
        dict: Option<&Dictionary>,
    ) -> Result<usize, FrameError> {
        // SAFETY: dst is valid for dst.len() writable bytes; prefs is a live
        // repr(C) struct; the cdict (when present) outlives this call.
        let code = unsafe {
            match dict {
                Some(d) => ffi::LZ4F_compressBegin_usingCDict(
                    self.ctx.as_ptr(),
                    dst.as_mut_ptr() as *mut c_void,
                    dst.len(),
                    d.raw_cdict(),
                    prefs,
                ),
                None => ffi::LZ4F_compressBegin(
                    self.ctx.as_ptr(),
                    dst.as_mut_ptr() as *mut c_void,
                    dst.len(),
                    prefs,
                ),
            }
        };
        check(code)
    }

    /// Compress `src` into the open frame, writing into `dst`; returns the
    /// number of bytes produced (0 is normal — the context may buffer).
    ///
    /// `dst` must hold at least `compress_bound(src.len(), prefs)` bytes.
    /// An empty `src` is a legal no-op.
    pub fn update(&mut self, dst: &mut [u8], src: &[u8]) -> Result<usize, FrameError> {
        // SAFETY: both slices are valid for their lengths; null options
        // selects the library defaults.
        let code = unsafe {
            ffi::LZ4F_compressUpdate(
                self.ctx.as_ptr(),
                dst.as_mut_ptr() as *mut c_void,
                dst.len(),
                src.as_ptr() as *const c_void,
                src.len(),
                ptr::null(),
            )
        };
        check(code)
    }

    /// Force any block the context is still buffering out into `dst`.
    ///
    /// `dst` must hold at least `compress_bound(0, prefs)` bytes.
    pub fn flush(&mut self, dst: &mut [u8]) -> Result<usize, FrameError> {
        // SAFETY: dst is valid for dst.len() writable bytes.
        let code = unsafe {
            ffi::LZ4F_flush(
                self.ctx.as_ptr(),
                dst.as_mut_ptr() as *mut c_void,
                dst.len(),
                ptr::null(),
            )
        };
        check(code)
    }

    /// Close the frame: flushes buffered data and writes the footer (end
    /// marker, optional content checksum) into `dst`. The context can then
    /// begin a new frame.
    ///
    /// `dst` must hold at least `compress_bound(0, prefs)` bytes.
    pub fn end(&mut self, dst: &mut [u8]) -> Result<usize, FrameError> {
        // SAFETY: dst is valid for dst.len() writable bytes.
        let code = unsafe {
            ffi::LZ4F_compressEnd(
                self.ctx.as_ptr(),
                dst.as_mut_ptr() as *mut c_void,
                dst.len(),
                ptr::null(),
            )
        };
        check(code)
    }
}

impl Drop for CompressionContext {
    fn drop(&mut self) {
        // SAFETY: the context came from LZ4F_createCompressionContext and is
        // freed exactly once.
        unsafe {
            ffi::LZ4F_freeCompressionContext(self.ctx.as_ptr());
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot helper
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `src` into a single self-contained frame.
///
/// Allocates from the bound function, so the begin/update/end sequence cannot
/// run out of room.
pub fn compress_frame_to_vec(src: &[u8], level: CompressionLevel) -> io::Result<Vec<u8>> {
    let prefs = Preferences::with_level(level);
    let mut ctx = CompressionContext::new()
        .map_err(|e| io::Error::other(format!("Allocation error: can't create LZ4F context: {e}")))?;

    let mut out = vec![0u8; MAX_FH_SIZE + compress_bound(src.len(), &prefs)];
    let mut n = ctx.begin(&mut out, &prefs, None)?;
    n += ctx.update(&mut out[n..], src)?;
    n += ctx.end(&mut out[n..])?;
    out.truncate(n);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Contexts allocate and free cleanly.
    #[test]
    fn context_lifecycle() {
        let ctx = CompressionContext::new().expect("create compression context");
        drop(ctx);
    }

    /// Every produced frame starts with the LZ4 frame magic number.
    #[test]
    fn frame_magic() {
        let out =
            compress_frame_to_vec(b"abc", CompressionLevel::Fastest).expect("compress frame");
        assert_eq!(&out[..4], &[0x04, 0x22, 0x4D, 0x18]);
    }

    /// The bound is never smaller than what a header plus end marker needs
    /// and grows with the payload.
    #[test]
    fn bound_sanity() {
        let prefs = Preferences::with_level(CompressionLevel::Balanced);
        assert!(compress_bound(0, &prefs) > MAX_FH_SIZE);
        assert!(compress_bound(1 << 20, &prefs) >= 1 << 20);
    }

    /// Incompressible input still fits within the advertised bound.
    #[test]
    fn incompressible_within_bound() {
        let mut data = vec![0u8; 4096];
        let mut state = 0x2545F4914F6CDD1Du64;
        for b in data.iter_mut() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            *b = state as u8;
        }
        let prefs = Preferences::with_level(CompressionLevel::Best);
        let out = compress_frame_to_vec(&data, CompressionLevel::Best).expect("compress frame");
        assert!(out.len() <= MAX_FH_SIZE + compress_bound(data.len(), &prefs));
    }
}
