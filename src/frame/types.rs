//! LZ4 Frame format types, constants, and error handling.
//!
//! Mirrors the public surface of lz4frame.h (liblz4 v1.10.0):
//! - Frame descriptor enums: [`BlockSizeId`], [`BlockMode`], [`ContentChecksum`],
//!   [`BlockChecksum`], [`FrameType`]
//! - [`FrameInfo`] / [`Preferences`] structs (lz4frame.h:175-198), laid out
//!   `#[repr(C)]` so they can be handed to the native library directly
//! - [`CompressionLevel`] — the level set the adapters expose
//! - [`FrameError`] carrying the native library's error description

use core::fmt;
use std::ffi::CStr;
use std::io;

use super::ffi;

// ─────────────────────────────────────────────────────────────────────────────
// API version and header size constants (lz4frame.h:256, 280-290)
// ─────────────────────────────────────────────────────────────────────────────

/// LZ4 Frame API version — used to guard context creation compatibility.
/// Equivalent to `LZ4F_VERSION` (100) in lz4frame.h.
pub const LZ4F_VERSION: u32 = 100;

/// Minimum LZ4 frame header size in bytes.
/// Equivalent to `LZ4F_HEADER_SIZE_MIN` = 7.
pub const MIN_FH_SIZE: usize = 7;

/// Maximum LZ4 frame header size in bytes.
/// Equivalent to `LZ4F_HEADER_SIZE_MAX` = 19.
pub const MAX_FH_SIZE: usize = 19;

/// Block header size in bytes (holds block data length + compressed flag bit).
/// Equivalent to `LZ4F_BLOCK_HEADER_SIZE` = 4.
pub const BH_SIZE: usize = 4;

// ─────────────────────────────────────────────────────────────────────────────
// Public enums from lz4frame.h (frame parameters)
// ─────────────────────────────────────────────────────────────────────────────

/// Block size identifier determining the maximum LZ4 block size within a frame.
/// Corresponds to `LZ4F_blockSizeID_t` in lz4frame.h:123-133.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum BlockSizeId {
    /// Default: the library picks (equivalent to `Max64Kb` today).
    #[default]
    Default = 0,
    Max64Kb = 4,
    Max256Kb = 5,
    Max1Mb = 6,
    Max4Mb = 7,
}

/// Block linking mode: linked blocks share history, independent blocks do not.
/// Corresponds to `LZ4F_blockMode_t` in lz4frame.h:138-143.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum BlockMode {
    /// Blocks share history (better compression, default).
    #[default]
    Linked = 0,
    /// Each block is compressed independently (wider compatibility).
    Independent = 1,
}

/// Whether a 32-bit content checksum (XXH32) is appended after the last block.
/// Corresponds to `LZ4F_contentChecksum_t` in lz4frame.h:145-150.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum ContentChecksum {
    #[default]
    Disabled = 0,
    Enabled = 1,
}

/// Whether a 32-bit checksum follows each compressed block.
/// Corresponds to `LZ4F_blockChecksum_t` in lz4frame.h:152-155.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum BlockChecksum {
    #[default]
    Disabled = 0,
    Enabled = 1,
}

/// Frame type: standard LZ4 frame or skippable frame.
/// Corresponds to `LZ4F_frameType_t` in lz4frame.h:157-161.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum FrameType {
    #[default]
    Frame = 0,
    SkippableFrame = 1,
}

// ─────────────────────────────────────────────────────────────────────────────
// FrameInfo and Preferences structs (lz4frame.h:175-198)
// ─────────────────────────────────────────────────────────────────────────────

/// LZ4 frame header parameters.
///
/// Corresponds to `LZ4F_frameInfo_t` in lz4frame.h:175-183; field order and
/// representation match the C struct exactly.
#[derive(Debug, Clone, Copy, Default)]
#[repr(C)]
pub struct FrameInfo {
    /// Maximum block size ID (determines buffer requirements).
    pub block_size_id: BlockSizeId,
    /// Linked or independent blocks.
    pub block_mode: BlockMode,
    /// Whether a content checksum is present at end of frame.
    pub content_checksum_flag: ContentChecksum,
    /// Frame type (standard or skippable).
    pub frame_type: FrameType,
    /// Uncompressed content size in bytes; 0 = unknown.
    pub content_size: libc::c_ulonglong,
    /// Dictionary ID hint; 0 = no dict ID provided.
    pub dict_id: libc::c_uint,
    /// Whether a per-block checksum is present after each block.
    pub block_checksum_flag: BlockChecksum,
}

/// User preferences supplied to streaming compression.
///
/// Corresponds to `LZ4F_preferences_t` in lz4frame.h:192-198. The zeroed
/// default is valid; the adapters build theirs through [`Preferences::with_level`].
#[derive(Debug, Clone, Copy, Default)]
#[repr(C)]
pub struct Preferences {
    /// Frame metadata fields.
    pub frame_info: FrameInfo,
    /// Compression level: 0 = fast; > 0 = HC (clamped at max); < 0 = fast acceleration.
    pub compression_level: libc::c_int,
    /// Non-zero: flush after every update call (reduces internal buffering).
    pub auto_flush: libc::c_uint,
    /// Non-zero: HC parser favors decompression speed over ratio.
    pub favor_dec_speed: libc::c_uint,
    /// Must be zero for forward compatibility.
    pub reserved: [libc::c_uint; 3],
}

impl Preferences {
    /// Preferences the streaming adapters use: 256 KiB linked blocks, no
    /// checksums, standard frame, buffering left to the context.
    pub fn with_level(level: CompressionLevel) -> Self {
        Preferences {
            frame_info: FrameInfo {
                block_size_id: BlockSizeId::Max256Kb,
                ..FrameInfo::default()
            },
            compression_level: level.into(),
            ..Preferences::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Compression levels
// ─────────────────────────────────────────────────────────────────────────────

/// Compression effort for the encoding side.
///
/// Levels trade CPU time for output size; every level produces the same wire
/// format. Discriminants are the raw values passed through
/// `Preferences::compression_level` (levels above 2 engage the HC parser).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(i32)]
pub enum CompressionLevel {
    /// The library's own fast default.
    Default = 0,
    Fastest = 1,
    Balanced = 4,
    Best = 9,
}

impl From<CompressionLevel> for i32 {
    fn from(level: CompressionLevel) -> i32 {
        level as i32
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Error type over the native size_t error-code convention
// ─────────────────────────────────────────────────────────────────────────────

/// An error reported by the native LZ4F library.
///
/// The C API encodes failures as out-of-range `size_t` values; this wraps the
/// raw code and resolves it to the library's own description string
/// (`LZ4F_getErrorName`) for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameError {
    code: usize,
}

impl FrameError {
    /// Human-readable name for this error, as reported by the library
    /// (e.g. `ERROR_frameType_unknown`).
    pub fn error_name(&self) -> &'static str {
        // SAFETY: LZ4F_getErrorName returns a pointer into a static string
        // table inside liblz4; it is valid for the life of the process and
        // never null.
        let name = unsafe { CStr::from_ptr(ffi::LZ4F_getErrorName(self.code)) };
        name.to_str().unwrap_or("Unspecified error code")
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.error_name())
    }
}

impl std::error::Error for FrameError {}

impl From<FrameError> for io::Error {
    fn from(e: FrameError) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidData, format!("LZ4F error: {e}"))
    }
}

/// Resolve a raw LZ4F return value: sizes pass through, error codes become
/// [`FrameError`]. Equivalent to the `LZ4F_isError` check every C caller makes.
pub(crate) fn check(code: libc::size_t) -> Result<usize, FrameError> {
    // SAFETY: LZ4F_isError is a pure classification of the value.
    if unsafe { ffi::LZ4F_isError(code) } != 0 {
        Err(FrameError { code })
    } else {
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Enum discriminants must match the lz4frame.h values bit-for-bit, since
    /// these enums are embedded in the `#[repr(C)]` structs handed to the
    /// native library.
    #[test]
    fn frame_parameter_discriminants() {
        assert_eq!(BlockSizeId::Default as u32, 0);
        assert_eq!(BlockSizeId::Max64Kb as u32, 4);
        assert_eq!(BlockSizeId::Max256Kb as u32, 5);
        assert_eq!(BlockSizeId::Max1Mb as u32, 6);
        assert_eq!(BlockSizeId::Max4Mb as u32, 7);
        assert_eq!(BlockMode::Linked as u32, 0);
        assert_eq!(BlockMode::Independent as u32, 1);
        assert_eq!(ContentChecksum::Disabled as u32, 0);
        assert_eq!(ContentChecksum::Enabled as u32, 1);
        assert_eq!(FrameType::Frame as u32, 0);
        assert_eq!(FrameType::SkippableFrame as u32, 1);
    }

    /// The compression levels exposed by the adapters.
    #[test]
    fn compression_level_values() {
        assert_eq!(i32::from(CompressionLevel::Default), 0);
        assert_eq!(i32::from(CompressionLevel::Fastest), 1);
        assert_eq!(i32::from(CompressionLevel::Balanced), 4);
        assert_eq!(i32::from(CompressionLevel::Best), 9);
    }

    /// `with_level` pins the frame parameters the adapters rely on.
    #[test]
    fn preferences_with_level() {
        let prefs = Preferences::with_level(CompressionLevel::Best);
        assert_eq!(prefs.frame_info.block_size_id, BlockSizeId::Max256Kb);
        assert_eq!(prefs.frame_info.block_mode, BlockMode::Linked);
        assert_eq!(
            prefs.frame_info.content_checksum_flag,
            ContentChecksum::Disabled
        );
        assert_eq!(prefs.compression_level, 9);
        assert_eq!(prefs.auto_flush, 0);
        assert_eq!(prefs.reserved, [0; 3]);
    }

    /// Success codes pass through `check`; error codes map to `FrameError`
    /// and resolve to the library's description strings.
    #[test]
    fn check_classifies_raw_codes() {
        assert_eq!(check(0), Ok(0));
        assert_eq!(check(1234), Ok(1234));
        // usize::MAX is -(ptrdiff_t)1 in the C encoding: ERROR_GENERIC.
        let err = check(usize::MAX).expect_err("usize::MAX is an error code");
        assert_eq!(err.error_name(), "ERROR_GENERIC");
        assert_eq!(format!("{err}"), "ERROR_GENERIC");
    }

    /// The io::Error mapping keeps the library's description visible.
    #[test]
    fn frame_error_to_io_error() {
        let err = check(usize::MAX).expect_err("usize::MAX is an error code");
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(io_err.to_string(), "LZ4F error: ERROR_GENERIC");
    }

    /// Struct sizes must match the C definitions (7 fields padded to 8-byte
    /// alignment for the u64 content size).
    #[test]
    fn struct_layout_matches_c() {
        assert_eq!(std::mem::size_of::<FrameInfo>(), 32);
        assert_eq!(std::mem::size_of::<Preferences>(), 56);
    }
}
