//! Pre-digested dictionaries for frame compression and decompression.
//!
//! Provides [`Dictionary`], a dictionary digested once by the native library
//! (`LZ4F_createCDict`) so it can seed any number of compression contexts
//! without repeating the indexing cost, while also retaining the trimmed raw
//! bytes that every dictionary-assisted decompress call needs.
//!
//! # Design notes
//! The frame format only ever references the last 64 KiB of a dictionary
//! (the codec window), so longer inputs are trimmed before digestion —
//! matching `LZ4F_createCDict_advanced` (lz4frame.c:546-549). Both sides of a
//! stream must use bit-identical dictionary bytes; nothing in the default
//! frame parameters records which dictionary was used.
//!
//! `LZ4F_freeCDict` is represented by the `Drop` implementation; no explicit
//! free function is exposed, and the handle cannot be duplicated.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use std::ptr::NonNull;

use super::ffi;

// Maximum dictionary size the frame format retains (64 KiB).
const MAX_DICT_SIZE: usize = 64 * 1024;

// ─────────────────────────────────────────────────────────────────────────────
// Dictionary — owned digested handle plus the raw window bytes
// ─────────────────────────────────────────────────────────────────────────────

/// A compression/decompression dictionary, digested once at construction.
///
/// Move-only: the native handle is not duplicable without re-digestion, so
/// the type is deliberately not `Clone`. Adapters borrow it (`&Dictionary`),
/// which lets one dictionary serve many streams, concurrently if desired.
///
/// # Thread safety
/// A `Dictionary` is read-only after creation and may be shared across
/// threads, mirroring the C documentation for `LZ4F_CDict`.
///
/// # Drop behaviour
/// Dropping frees the native handle exactly once (`LZ4F_freeCDict`); the raw
/// bytes are an ordinary `Vec`.
#[derive(Debug)]
pub struct Dictionary {
    /// Trimmed copy of the user-supplied dictionary (at most 64 KiB).
    content: Vec<u8>,
    /// Digested form used by `LZ4F_compressBegin_usingCDict`.
    cdict: NonNull<ffi::LZ4FCDict>,
}

// SAFETY: the native CDict is immutable after LZ4F_createCDict returns and
// liblz4 documents concurrent read-only use; `content` is never mutated.
unsafe impl Send for Dictionary {}
unsafe impl Sync for Dictionary {}

impl Dictionary {
    /// Digest `dict` into a reusable dictionary.
    ///
    /// At most the **last 64 KiB** of `dict` is retained; compression and
    /// decompression of the same stream must be given bit-identical bytes.
    ///
    /// # Errors
    /// Fails with an allocation error when the native library cannot build
    /// the digested form.
    pub fn new(dict: &[u8]) -> io::Result<Dictionary> {
        let trimmed = if dict.len() > MAX_DICT_SIZE {
            &dict[dict.len() - MAX_DICT_SIZE..]
        } else {
            dict
        };
        let content = trimmed.to_vec();

        // SAFETY: `content` is valid for `content.len()` bytes; the library
        // copies what it needs and does not retain the pointer.
        let cdict = unsafe {
            ffi::LZ4F_createCDict(content.as_ptr() as *const libc::c_void, content.len())
        };
        match NonNull::new(cdict) {
            Some(cdict) => Ok(Dictionary { content, cdict }),
            None => Err(io::Error::other(
                "Allocation error: can't create LZ4F dictionary",
            )),
        }
    }

    /// Digest the trailing 64 KiB of a file.
    ///
    /// Reads the file once through a circular buffer, so arbitrarily large
    /// dictionary files never get loaded whole. A failed seek (short file)
    /// simply reads from the start.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Dictionary> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("Dictionary error: could not open {}: {}", path.display(), e),
            )
        })?;
        // Opportunistically skip straight to the window that will survive the
        // trim; files shorter than 64 KiB make this fail and read from 0.
        let _ = file.seek(SeekFrom::End(-(MAX_DICT_SIZE as i64)));

        let mut circular = vec![0u8; MAX_DICT_SIZE];
        let mut end: usize = 0;
        let mut total: usize = 0;
        loop {
            let n = file.read(&mut circular[end..])?;
            if n == 0 {
                break;
            }
            end = (end + n) % MAX_DICT_SIZE;
            total += n;
        }

        if total >= MAX_DICT_SIZE {
            // Wrapped: the oldest retained byte sits at `end`.
            let mut window = Vec::with_capacity(MAX_DICT_SIZE);
            window.extend_from_slice(&circular[end..]);
            window.extend_from_slice(&circular[..end]);
            Dictionary::new(&window)
        } else {
            circular.truncate(total);
            Dictionary::new(&circular)
        }
    }

    /// Number of retained dictionary bytes (after trimming).
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// `true` when no bytes were retained.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// The trimmed raw bytes, passed to every `LZ4F_decompress_usingDict` call.
    pub(crate) fn content(&self) -> &[u8] {
        &self.content
    }

    /// The digested handle, passed to `LZ4F_compressBegin_usingCDict`.
    pub(crate) fn raw_cdict(&self) -> *const ffi::LZ4FCDict {
        self.cdict.as_ptr()
    }
}

impl Drop for Dictionary {
    fn drop(&mut self) {
        // SAFETY: `cdict` came from LZ4F_createCDict and is freed exactly once.
        unsafe { ffi::LZ4F_freeCDict(self.cdict.as_ptr()) }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    /// `new` succeeds with a small dictionary and keeps every byte.
    #[test]
    fn create_with_small_dict() {
        let dict: Vec<u8> = (0u8..=255).cycle().take(1024).collect();
        let d = Dictionary::new(&dict).expect("1 KiB dictionary");
        assert_eq!(d.len(), 1024);
        assert_eq!(d.content(), dict.as_slice());
        assert!(!d.is_empty());
    }

    /// Dictionaries larger than 64 KiB are trimmed to their *last* 64 KiB,
    /// matching what the native library would retain anyway.
    #[test]
    fn create_trims_large_dict() {
        let dict: Vec<u8> = (0u8..=255).cycle().take(128 * 1024).collect();
        let d = Dictionary::new(&dict).expect("trimmed dictionary");
        assert_eq!(d.len(), MAX_DICT_SIZE);
        assert_eq!(d.content(), &dict[dict.len() - MAX_DICT_SIZE..]);
    }

    /// `from_file` on a short file keeps the whole file.
    #[test]
    fn from_file_small() {
        let mut f = tempfile::NamedTempFile::new().expect("create temp file");
        f.write_all(b"sample dictionary data").expect("write dict");
        f.flush().expect("flush dict");
        let d = Dictionary::from_file(f.path()).expect("load dict file");
        assert_eq!(d.content(), b"sample dictionary data");
    }

    /// `from_file` on a large file keeps exactly the trailing 64 KiB.
    #[test]
    fn from_file_truncates_to_last_64k() {
        let data: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        let mut f = tempfile::NamedTempFile::new().expect("create temp file");
        f.write_all(&data).expect("write dict");
        f.flush().expect("flush dict");
        let d = Dictionary::from_file(f.path()).expect("load dict file");
        assert_eq!(d.len(), MAX_DICT_SIZE);
        assert_eq!(d.content(), &data[data.len() - MAX_DICT_SIZE..]);
    }

    /// Missing dictionary files surface the path in the error.
    #[test]
    fn from_file_missing_path() {
        let err = Dictionary::from_file("/no/such/dictionary.bin")
            .expect_err("open must fail");
        assert!(err.to_string().contains("/no/such/dictionary.bin"));
    }
}
