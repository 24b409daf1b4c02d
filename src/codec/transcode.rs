//! Streaming transcoder.
//!
//! Drains a source through the negotiated encoder into a destination.
//! Each call is independent: one synchronous copy loop, no background
//! work, no shared state besides the read-only catalog.

use std::fs::File;
use std::io::{self, Read, Write};

use super::encoding::{lookup, CompressionLevel, Encoding};
use crate::error::Result;

/// Outcome of a successful transcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transcoded {
    /// Whether the body was compressed
    pub compressed: bool,
    /// `Content-Encoding` value to announce. Empty means omit the header.
    pub encoding: &'static str,
    /// Bytes read from the source
    pub bytes_read: u64,
}

/// Stream a file at [`CompressionLevel::BEST_COMPRESSION`].
///
/// Intended for static bodies that are likely cached or served again.
pub fn write_file<W: Write>(encoding: &str, writer: W, file: &mut File) -> Result<Transcoded> {
    write_level(encoding, writer, file, CompressionLevel::BEST_COMPRESSION)
}

/// Write an in-memory body at [`CompressionLevel::BEST_SPEED`].
///
/// Intended for small, dynamically generated bodies.
pub fn write_body<W: Write>(encoding: &str, writer: W, content: &[u8]) -> Result<Transcoded> {
    write_level(encoding, writer, content, CompressionLevel::BEST_SPEED)
}

/// Copy `reader` into `writer` through the encoder named by `encoding`.
///
/// Unknown tokens fall back to identity. Construction errors are returned
/// before any byte reaches `writer`. Copy errors are returned as-is; bytes
/// already flushed are not rolled back, and no trailer is written after a
/// failure.
pub fn write_level<W, R>(
    encoding: &str,
    writer: W,
    mut reader: R,
    level: CompressionLevel,
) -> Result<Transcoded>
where
    W: Write,
    R: Read,
{
    let encoder = lookup(encoding).unwrap_or(Encoding::Identity);
    let mut output = encoder.build(writer, level)?;

    let bytes_read = match io::copy(&mut reader, &mut output) {
        Ok(n) => n,
        Err(e) => {
            tracing::warn!(
                encoding = encoder.name(),
                error = %e,
                "transcode aborted mid-stream"
            );
            output.abandon();
            return Err(e.into());
        },
    };

    if output.needs_finish() {
        if let Err(e) = output.finish() {
            tracing::warn!(
                encoding = encoder.name(),
                error = %e,
                "transcode failed writing final frame"
            );
            return Err(e.into());
        }
    }

    tracing::debug!(
        requested = encoding,
        encoding = encoder.name(),
        level = level.level(),
        bytes_read,
        "transcoded body"
    );

    Ok(Transcoded {
        compressed: encoder.is_compressing(),
        encoding: encoder.name(),
        bytes_read,
    })
}
