/// Returns compressible synthetic data of exactly `size` bytes.
///
/// Pangram-heavy English text repeated to length. Because it is highly
/// repetitive, LZ4 compresses it well, so the throughput numbers reflect the
/// codec rather than the data.
pub fn synthetic_data(size: usize) -> Vec<u8> {
    const TEXT: &[u8] = b"The quick brown fox jumps over the lazy dog. \
        Pack my box with five dozen liquor jugs. How vexingly quick daft \
        zebras jump. Sphinx of black quartz, judge my vow. The five boxing \
        wizards jump quickly, and amazingly few discotheques provide jukeboxes. ";

    let mut out = Vec::with_capacity(size);
    while out.len() < size {
        let rem = size - out.len();
        let take = rem.min(TEXT.len());
        out.extend_from_slice(&TEXT[..take]);
    }
    out
}

/// Returns `size` bytes alternating between 1 KiB of structured text and
/// 1 KiB of xorshift noise, exercising both the match-heavy and the
/// literal-heavy decode paths.
#[allow(dead_code)]
pub fn mixed_data(size: usize) -> Vec<u8> {
    let text = synthetic_data(1024);
    let mut out = Vec::with_capacity(size);
    let mut state = 0x9E3779B97F4A7C15u64;
    while out.len() < size {
        let rem = size - out.len();
        out.extend_from_slice(&text[..rem.min(text.len())]);
        let mut noise = 0;
        while noise < 1024 && out.len() < size {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let bytes = state.to_le_bytes();
            let take = bytes.len().min(size - out.len());
            out.extend_from_slice(&bytes[..take]);
            noise += take;
        }
    }
    out
}
