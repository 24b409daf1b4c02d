//! HTTP content negotiation.
//!
//! Turns a client's `Accept-Encoding` header into the single
//! `Content-Encoding` the response will use.
//!
//! ```text
//! Accept-Encoding ──> negotiate() ──> "gzip" | "deflate" | ""
//!                                          │
//!                                          v
//!                               codec::write_body / write_file
//! ```
//!
//! Negotiation is a pure function of the header value, so it can run on
//! any number of requests concurrently.

mod accept;

pub use accept::{negotiate, parse_encoding, QualityEntry};
