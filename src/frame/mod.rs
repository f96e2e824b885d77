//! LZ4 Frame format — contexts, dictionaries, and one-shot helpers.
//!
//! Safe wrappers over liblz4's LZ4F streaming API (lz4frame.h). The
//! [`io`](crate::io) module builds the `Read`/`Write` adapters on top of
//! these; use this layer directly when you need manual control over the
//! begin/update/end lifecycle or the raw `(consumed, produced, hint)`
//! decompression triple.

mod ffi;

pub mod cdict;
pub mod compress;
pub mod decompress;
pub mod types;

// Re-export the key public API items at the module level.
pub use cdict::Dictionary;
pub use compress::{compress_bound, compress_frame_to_vec, CompressionContext};
pub use decompress::{decompress_frame_to_vec, DecompressionContext};
pub use types::{
    BlockChecksum, BlockMode, BlockSizeId, CompressionLevel, ContentChecksum, FrameError,
    FrameInfo, FrameType, Preferences, LZ4F_VERSION, MAX_FH_SIZE, MIN_FH_SIZE,
};
