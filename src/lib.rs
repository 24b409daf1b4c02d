//! # accept-encoder - HTTP Content-Encoding Negotiation
//!
//! Chooses a response `Content-Encoding` from the request's
//! `Accept-Encoding` header and streams the body through the matching
//! compressor.
//!
//! ## Overview
//!
//! ```text
//! Request                       accept-encoder                      Response
//!    |                               |                                  |
//!    |-- Accept-Encoding ---------->| negotiate()                      |
//!    |                               |   -> "gzip" | "deflate" | ""     |
//!    |                               |                                  |
//!    |                               | write_body() / write_file()     |
//!    |                               |   lookup -> build -> copy ->     |
//!    |                               |   finish                         |
//!    |                               |--- Content-Encoding + body ---->|
//! ```
//!
//! ### Encodings
//!
//! | Token      | Applied          | Header value |
//! |------------|------------------|--------------|
//! | `gzip`     | gzip             | `gzip`       |
//! | `deflate`  | zlib (RFC 1950)  | `deflate`    |
//! | `*`        | gzip             | `gzip`       |
//! | `identity` | none             | (omitted)    |
//! | other      | none             | (omitted)    |
//!
//! ### Compression levels
//!
//! The call site picks the level, never the client:
//!
//! - [`write_file`]: best compression, for cacheable static bodies
//! - [`write_body`]: best speed, for small generated bodies
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use accept_encoder::{negotiate, write_body};
//!
//! let encoding = negotiate("deflate;q=0.3, gzip;q=0.8");
//! assert_eq!(encoding, "gzip");
//!
//! let mut out = Vec::new();
//! let result = write_body(encoding, &mut out, br#"{"ok":true}"#)?;
//! if result.compressed {
//!     // announce `Content-Encoding: {result.encoding}`
//! }
//! ```
//!
//! ### With `http` types
//!
//! ```rust,ignore
//! use accept_encoder::{Config, ResponseEncoder};
//!
//! let encoder = ResponseEncoder::new(&Config::default());
//! let response = encoder.encode_body(request.headers(), &body)?;
//! ```
//!
//! ## Modules
//!
//! - [`codec`]: Encoding catalog and streaming transcoder
//! - [`protocol`]: `Accept-Encoding` negotiation
//! - [`response`]: Response construction with `http` types
//! - [`config`]: Configuration management
//! - [`error`]: Error types and result aliases

pub mod codec;
pub mod config;
pub mod error;
pub mod protocol;
pub mod response;

// Re-exports for convenience
pub use codec::{
    lookup, write_body, write_file, write_level, CompressionLevel, Encoding, EncodingWriter,
    Transcoded,
};
pub use config::{CompressionConfig, Config};
pub use error::{EncoderError, Result};
pub use protocol::{negotiate, parse_encoding, QualityEntry};
pub use response::ResponseEncoder;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
