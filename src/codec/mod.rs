//! Content-coding engine.
//!
//! # Encodings
//!
//! | Token      | Encoding                  | `Content-Encoding` |
//! |------------|---------------------------|--------------------|
//! | `gzip`     | [`Gzip`] (RFC 1952)       | `gzip`             |
//! | `deflate`  | [`Deflate`] (zlib framed) | `deflate`          |
//! | `*`        | [`Gzip`]                  | `gzip`             |
//! | `identity` | [`Identity`]              | (omitted)          |
//!
//! Any other token is treated as identity.
//!
//! # Usage
//!
//! ```rust,ignore
//! use accept_encoder::codec::write_body;
//!
//! let mut out = Vec::new();
//! let result = write_body("gzip", &mut out, b"hello")?;
//! assert!(result.compressed);
//! assert_eq!(result.encoding, "gzip");
//! ```
//!
//! [`Gzip`]: Encoding::Gzip
//! [`Deflate`]: Encoding::Deflate
//! [`Identity`]: Encoding::Identity

mod encoding;
mod transcode;
mod writer;

pub use encoding::{lookup, CompressionLevel, Encoding};
pub use transcode::{write_body, write_file, write_level, Transcoded};
pub use writer::EncodingWriter;
