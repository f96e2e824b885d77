//! `Read`/`Write` adapters over the frame layer, plus whole-stream helpers.
//!
//! [`Lz4Encoder`] compresses everything written through it into one LZ4
//! frame; [`Lz4Decoder`] decodes one or more concatenated frames pulled from
//! a source. [`compress_stream`] and [`decompress_stream`] pump a full
//! reader-to-writer copy through those adapters and report byte counts.

pub mod read;
pub mod write;

pub use read::Lz4Decoder;
pub use write::Lz4Encoder;

use std::io::{self, Read, Write};

use crate::frame::{CompressionLevel, Dictionary};

/// Counts bytes on their way into `inner`.
struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Counts bytes handed out by `inner`.
struct CountingReader<R> {
    inner: R,
    count: u64,
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n as u64;
        Ok(n)
    }
}

/// Compress all of `reader` into `writer` as a single LZ4 frame.
///
/// Returns `(bytes_read, bytes_written)`, i.e. uncompressed and compressed
/// sizes. The writer is flushed before returning.
pub fn compress_stream<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    level: CompressionLevel,
    dict: Option<&Dictionary>,
) -> io::Result<(u64, u64)> {
    let counter = CountingWriter { inner: writer, count: 0 };
    let mut encoder = match dict {
        Some(dict) => Lz4Encoder::with_dictionary(counter, level, dict)?,
        None => Lz4Encoder::with_level(counter, level)?,
    };
    let read = io::copy(reader, &mut encoder)?;
    let mut counter = encoder.finish()?;
    counter.flush()?;
    Ok((read, counter.count))
}

/// Decompress every LZ4 frame in `reader` into `writer`.
///
/// Returns `(bytes_read, bytes_written)`, i.e. compressed and decompressed
/// sizes. The writer is flushed before returning.
pub fn decompress_stream<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    dict: Option<&Dictionary>,
) -> io::Result<(u64, u64)> {
    let counter = CountingReader { inner: reader, count: 0 };
    let mut decoder = match dict {
        Some(dict) => Lz4Decoder::with_dictionary(counter, dict)?,
        None => Lz4Decoder::new(counter)?,
    };
    let written = io::copy(&mut decoder, writer)?;
    writer.flush()?;
    Ok((decoder.into_inner().count, written))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The helper counts line up with the actual stream lengths, both ways.
    #[test]
    fn stream_helpers_report_counts() {
        let payload = b"helper payload helper payload helper payload".repeat(64);
        let mut compressed = Vec::new();
        let (read, written) =
            compress_stream(&mut &payload[..], &mut compressed, CompressionLevel::Balanced, None)
                .expect("compress_stream");
        assert_eq!(read, payload.len() as u64);
        assert_eq!(written, compressed.len() as u64);
        assert!(written < read, "repetitive input must shrink");

        let mut restored = Vec::new();
        let (read_back, written_back) =
            decompress_stream(&mut &compressed[..], &mut restored, None)
                .expect("decompress_stream");
        assert_eq!(read_back, compressed.len() as u64);
        assert_eq!(written_back, payload.len() as u64);
        assert_eq!(restored, payload);
    }

    /// Dictionary-seeded helpers mirror the adapter constructors.
    #[test]
    fn stream_helpers_accept_dictionary() {
        let dict = Dictionary::new(b"shared seed material for both directions")
            .expect("create dictionary");
        let payload = b"shared seed material shows up in the payload too";
        let mut compressed = Vec::new();
        compress_stream(
            &mut &payload[..],
            &mut compressed,
            CompressionLevel::Best,
            Some(&dict),
        )
        .expect("compress_stream");

        let mut restored = Vec::new();
        decompress_stream(&mut &compressed[..], &mut restored, Some(&dict))
            .expect("decompress_stream");
        assert_eq!(restored, payload);
    }
}
