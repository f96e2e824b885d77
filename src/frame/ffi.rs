//! Raw declarations for the LZ4F streaming API (lz4frame.h, liblz4 v1.10.0).
//!
//! The native library is compiled and linked by the `lz4-sys` build script;
//! the declarations here cover the streaming and dictionary entry points the
//! binding crate does not re-export (`LZ4F_createCDict`,
//! `LZ4F_compressBegin_usingCDict`, `LZ4F_decompress_usingDict`).
//!
//! Everything in this module is `unsafe` plumbing for the safe wrappers in
//! [`compress`](super::compress), [`decompress`](super::decompress) and
//! [`cdict`](super::cdict).

use libc::{c_char, c_uint, c_void, size_t};

use super::types::Preferences;

// ─────────────────────────────────────────────────────────────────────────────
// Opaque context handles (lz4frame.h:216-218, 326)
// ─────────────────────────────────────────────────────────────────────────────

/// Opaque streaming compression state (`LZ4F_cctx`).
#[repr(C)]
pub(crate) struct LZ4FCompressionCtx {
    _private: [u8; 0],
}

/// Opaque streaming decompression state (`LZ4F_dctx`).
#[repr(C)]
pub(crate) struct LZ4FDecompressionCtx {
    _private: [u8; 0],
}

/// Opaque pre-digested dictionary (`LZ4F_CDict`).
#[repr(C)]
pub(crate) struct LZ4FCDict {
    _private: [u8; 0],
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-call option structs (lz4frame.h:232-238, 344-353)
// ─────────────────────────────────────────────────────────────────────────────

/// `LZ4F_compressOptions_t`. The adapters never promise stable input, so a
/// null pointer (library defaults) is passed everywhere.
#[repr(C)]
pub(crate) struct CompressOptions {
    pub stable_src: c_uint,
    pub reserved: [c_uint; 3],
}

/// `LZ4F_decompressOptions_t`. Same story: null everywhere.
#[repr(C)]
pub(crate) struct DecompressOptions {
    pub stable_dst: c_uint,
    pub skip_checksums: c_uint,
    pub reserved1: c_uint,
    pub reserved0: c_uint,
}

extern "C" {
    // ── Error introspection (lz4frame.h:263-266) ─────────────────────────────
    pub(crate) fn LZ4F_isError(code: size_t) -> c_uint;
    pub(crate) fn LZ4F_getErrorName(code: size_t) -> *const c_char;

    // ── Compression context lifecycle (lz4frame.h:330-339) ──────────────────
    pub(crate) fn LZ4F_createCompressionContext(
        cctx_ptr: *mut *mut LZ4FCompressionCtx,
        version: c_uint,
    ) -> size_t;
    pub(crate) fn LZ4F_freeCompressionContext(cctx: *mut LZ4FCompressionCtx) -> size_t;

    // ── Streaming compression (lz4frame.h:355-430) ───────────────────────────
    pub(crate) fn LZ4F_compressBegin(
        cctx: *mut LZ4FCompressionCtx,
        dst_buffer: *mut c_void,
        dst_capacity: size_t,
        prefs: *const Preferences,
    ) -> size_t;
    pub(crate) fn LZ4F_compressBegin_usingCDict(
        cctx: *mut LZ4FCompressionCtx,
        dst_buffer: *mut c_void,
        dst_capacity: size_t,
        cdict: *const LZ4FCDict,
        prefs: *const Preferences,
    ) -> size_t;
    pub(crate) fn LZ4F_compressBound(src_size: size_t, prefs: *const Preferences) -> size_t;
    pub(crate) fn LZ4F_compressUpdate(
        cctx: *mut LZ4FCompressionCtx,
        dst_buffer: *mut c_void,
        dst_capacity: size_t,
        src_buffer: *const c_void,
        src_size: size_t,
        options: *const CompressOptions,
    ) -> size_t;
    pub(crate) fn LZ4F_flush(
        cctx: *mut LZ4FCompressionCtx,
        dst_buffer: *mut c_void,
        dst_capacity: size_t,
        options: *const CompressOptions,
    ) -> size_t;
    pub(crate) fn LZ4F_compressEnd(
        cctx: *mut LZ4FCompressionCtx,
        dst_buffer: *mut c_void,
        dst_capacity: size_t,
        options: *const CompressOptions,
    ) -> size_t;

    // ── Pre-digested dictionaries (lz4frame.h:310-325) ───────────────────────
    pub(crate) fn LZ4F_createCDict(dict_buffer: *const c_void, dict_size: size_t)
        -> *mut LZ4FCDict;
    pub(crate) fn LZ4F_freeCDict(cdict: *mut LZ4FCDict);

    // ── Decompression context lifecycle (lz4frame.h:446-460) ────────────────
    pub(crate) fn LZ4F_createDecompressionContext(
        dctx_ptr: *mut *mut LZ4FDecompressionCtx,
        version: c_uint,
    ) -> size_t;
    pub(crate) fn LZ4F_freeDecompressionContext(dctx: *mut LZ4FDecompressionCtx) -> size_t;

    // ── Streaming decompression (lz4frame.h:513-566) ─────────────────────────
    pub(crate) fn LZ4F_decompress(
        dctx: *mut LZ4FDecompressionCtx,
        dst_buffer: *mut c_void,
        dst_size_ptr: *mut size_t,
        src_buffer: *const c_void,
        src_size_ptr: *mut size_t,
        options: *const DecompressOptions,
    ) -> size_t;
    pub(crate) fn LZ4F_decompress_usingDict(
        dctx: *mut LZ4FDecompressionCtx,
        dst_buffer: *mut c_void,
        dst_size_ptr: *mut size_t,
        src_buffer: *const c_void,
        src_size_ptr: *mut size_t,
        dict: *const c_void,
        dict_size: size_t,
        options: *const DecompressOptions,
    ) -> size_t;
}
