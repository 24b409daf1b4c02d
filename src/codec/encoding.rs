//! Content-coding catalog.
//!
//! Maps `Accept-Encoding` tokens to the encoders this crate can apply.
//! The table is built at compile time and never mutated, so lookups are
//! safe from any number of request handlers at once.

use std::fmt;
use std::io::Write;

use flate2::Compression;
use phf::phf_map;

use super::writer::EncodingWriter;
use crate::error::{EncoderError, Result};

/// Supported content codings.
///
/// Each variant pairs a canonical `Content-Encoding` name with the
/// constructor for its compressing sink (see [`Encoding::build`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// No transformation. Reported as the empty name.
    #[default]
    Identity,
    /// gzip (RFC 1952).
    Gzip,
    /// HTTP "deflate", which is zlib framing (RFC 1950) around a raw
    /// deflate stream (RFC 1951), per RFC 2616 §3.5.
    Deflate,
}

/// Token table. `*` means the client accepts anything; gzip is preferred.
static CATALOG: phf::Map<&'static str, Encoding> = phf_map! {
    "gzip" => Encoding::Gzip,
    "deflate" => Encoding::Deflate,
    "*" => Encoding::Gzip,
    "identity" => Encoding::Identity,
};

/// Look up an encoding token, case-insensitively.
///
/// Returns `None` for tokens outside the catalog. Callers treat that the
/// same as [`Encoding::Identity`].
pub fn lookup(token: &str) -> Option<Encoding> {
    if let Some(encoding) = CATALOG.get(token) {
        return Some(*encoding);
    }
    CATALOG.get(token.to_ascii_lowercase().as_str()).copied()
}

impl Encoding {
    /// Canonical `Content-Encoding` value. Empty for identity.
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Identity => "",
            Encoding::Gzip => "gzip",
            Encoding::Deflate => "deflate",
        }
    }

    /// Whether this encoding transforms the body.
    pub fn is_compressing(&self) -> bool {
        !matches!(self, Encoding::Identity)
    }

    /// Wrap `sink` in the compressing writer for this encoding.
    ///
    /// The level is validated here, before anything is written, so a
    /// failed construction leaves the destination untouched. Identity
    /// ignores the level.
    pub fn build<W: Write>(&self, sink: W, level: CompressionLevel) -> Result<EncodingWriter<W>> {
        let writer = match self {
            Encoding::Identity => EncodingWriter::identity(sink),
            Encoding::Gzip => EncodingWriter::gzip(sink, level.to_flate2()?),
            Encoding::Deflate => EncodingWriter::deflate(sink, level.to_flate2()?),
        };
        Ok(writer)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Identity => write!(f, "identity"),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// Deflate-family compression level (0-9).
///
/// Only the two presets are used by the transcoder; which one applies is
/// decided by the call site, never by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionLevel(u32);

impl CompressionLevel {
    /// Fastest compression, for small generated bodies.
    pub const BEST_SPEED: CompressionLevel = CompressionLevel(1);

    /// Smallest output, for file bodies that get cached.
    pub const BEST_COMPRESSION: CompressionLevel = CompressionLevel(9);

    /// Highest level the deflate family accepts.
    pub const MAX: u32 = 9;

    /// Raw level. Not validated until an encoder is built from it.
    pub const fn new(level: u32) -> Self {
        Self(level)
    }

    /// Numeric level
    pub fn level(&self) -> u32 {
        self.0
    }

    fn to_flate2(self) -> Result<Compression> {
        if self.0 > Self::MAX {
            return Err(EncoderError::InvalidLevel(self.0));
        }
        Ok(Compression::new(self.0))
    }
}
