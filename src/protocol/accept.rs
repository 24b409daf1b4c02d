//! `Accept-Encoding` negotiation (RFC 2616 §14.3).
//!
//! Picks a single content coding for a response from the client's
//! `Accept-Encoding` header. Selection rules:
//!
//! - A bare token (no `;q=`) wins outright and ends the scan.
//! - Otherwise the entry with the strictly highest q-value wins; ties keep
//!   the first one seen.
//! - `q=0` rejects an entry. A malformed q-value counts as 0.
//! - The winner is resolved through the codec catalog. Unknown tokens mean
//!   no compression; they are never swapped for another encoding.
//!
//! The bare-token short-circuit is stricter than RFC 2616, which weighs a
//! bare token as `q=1` against every other entry. Callers rely on the
//! short-circuit, so `"identity, gzip;q=0.9"` yields no compression.

use http::header::ACCEPT_ENCODING;
use http::HeaderMap;

use crate::codec::lookup;

/// A weighted `Accept-Encoding` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityEntry<'a> {
    /// Encoding token as sent by the client
    pub token: &'a str,
    /// Quality value; 1.0 when unspecified
    pub weight: f64,
}

impl<'a> QualityEntry<'a> {
    /// Parse one comma-separated segment.
    ///
    /// Returns the entry and whether it carried an explicit q-value.
    fn parse(segment: &'a str) -> (Self, bool) {
        match segment.split_once(';') {
            None => (
                Self {
                    token: segment,
                    weight: 1.0,
                },
                false,
            ),
            Some((token, params)) => {
                let raw = params.trim().replace("q=", "");
                let weight = raw.trim().parse::<f64>().unwrap_or(0.0);
                (
                    Self {
                        token: token.trim(),
                        weight,
                    },
                    true,
                )
            },
        }
    }
}

/// Negotiate the response encoding from an `Accept-Encoding` value.
///
/// Returns the `Content-Encoding` name to use, or `""` for none.
#[allow(clippy::float_cmp)]
pub fn negotiate(accept_encoding: &str) -> &'static str {
    if accept_encoding.trim().is_empty() {
        return "";
    }

    let mut best = QualityEntry {
        token: "",
        weight: 0.0,
    };

    for segment in accept_encoding.split(',') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        let (entry, weighted) = QualityEntry::parse(segment);
        if !weighted {
            best = entry;
            break;
        }
        if entry.weight == 0.0 {
            continue;
        }
        if entry.weight > best.weight {
            best = entry;
        }
    }

    let encoding = lookup(best.token).map_or("", |e| e.name());
    tracing::debug!(
        accept_encoding,
        token = best.token,
        weight = best.weight,
        encoding,
        "negotiated content encoding"
    );
    encoding
}

/// Negotiate from request headers.
///
/// No headers or no `Accept-Encoding` means no compression. Bytes that are
/// not valid UTF-8 are replaced rather than rejecting the whole value, so
/// they only affect the segment they appear in.
pub fn parse_encoding(headers: Option<&HeaderMap>) -> &'static str {
    let Some(headers) = headers else {
        return "";
    };
    headers
        .get(ACCEPT_ENCODING)
        .map_or("", |value| negotiate(&String::from_utf8_lossy(value.as_bytes())))
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    #[test]
    fn test_single_tokens() {
        assert_eq!(negotiate("gzip"), "gzip");
        assert_eq!(negotiate("deflate"), "deflate");
        assert_eq!(negotiate("identity"), "");
        assert_eq!(negotiate("*"), "gzip");
    }

    #[test]
    fn test_empty_header() {
        assert_eq!(negotiate(""), "");
        assert_eq!(negotiate("   "), "");
        assert_eq!(negotiate(",,"), "");
    }

    #[test]
    fn test_zero_quality_rejects() {
        assert_eq!(negotiate("gzip;q=0, deflate;q=0.5"), "deflate");
        assert_eq!(negotiate("gzip;q=0"), "");
        assert_eq!(negotiate("gzip;q=0.0,deflate;q=0"), "");
    }

    #[test]
    fn test_tie_keeps_first() {
        assert_eq!(negotiate("deflate;q=0.3, gzip;q=0.3"), "deflate");
        assert_eq!(negotiate("gzip;q=0.3, deflate;q=0.3"), "gzip");
    }

    #[test]
    fn test_highest_weight_wins() {
        assert_eq!(negotiate("deflate;q=0.2, gzip;q=0.8"), "gzip");
        assert_eq!(negotiate("gzip;q=0.5, *;q=0.1, deflate;q=0.9"), "deflate");
    }

    #[test]
    fn test_bare_token_short_circuits() {
        assert_eq!(negotiate("identity, gzip;q=0.9"), "");
        assert_eq!(negotiate("deflate;q=0.9, gzip"), "gzip");
        assert_eq!(negotiate("deflate, gzip"), "deflate");
        assert_eq!(negotiate("gzip, deflate, br"), "gzip");
    }

    #[test]
    fn test_bare_unknown_token_stops_scan() {
        assert_eq!(negotiate("br, gzip"), "");
    }

    #[test]
    fn test_unknown_winner_is_not_substituted() {
        assert_eq!(negotiate("br;q=1.0, gzip;q=0.5"), "");
        assert_eq!(negotiate("gzip;q=0.5, zstd;q=0.9"), "");
    }

    #[test]
    fn test_malformed_quality_is_zero() {
        assert_eq!(negotiate("gzip;q=abc"), "");
        assert_eq!(negotiate("gzip;q=abc, deflate;q=0.1"), "deflate");
        assert_eq!(negotiate("gzip;level=1"), "");
    }

    #[test]
    fn test_whitespace_and_case() {
        assert_eq!(negotiate("  GZIP ;q=0.4 ,  deflate ; q=0.2 "), "gzip");
        assert_eq!(negotiate("Deflate"), "deflate");
    }

    #[test]
    fn test_quality_entry_parse() {
        let (entry, weighted) = QualityEntry::parse("gzip;q=0.7");
        assert!(weighted);
        assert_eq!(entry.token, "gzip");
        assert!((entry.weight - 0.7).abs() < f64::EPSILON);

        let (entry, weighted) = QualityEntry::parse("deflate");
        assert!(!weighted);
        assert_eq!(entry.token, "deflate");
        assert!((entry.weight - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_encoding_from_headers() {
        assert_eq!(parse_encoding(None), "");

        let mut headers = HeaderMap::new();
        assert_eq!(parse_encoding(Some(&headers)), "");

        headers.insert(
            ACCEPT_ENCODING,
            HeaderValue::from_static("gzip;q=0, deflate;q=0.5"),
        );
        assert_eq!(parse_encoding(Some(&headers)), "deflate");

        headers.insert(ACCEPT_ENCODING, HeaderValue::from_bytes(b"gzip\xff").unwrap());
        assert_eq!(parse_encoding(Some(&headers)), "");
    }

    #[test]
    fn test_parse_encoding_obs_text_segment() {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_bytes(b"gzip, \xff").unwrap());
        assert_eq!(parse_encoding(Some(&headers)), "gzip");

        headers.insert(
            ACCEPT_ENCODING,
            HeaderValue::from_bytes(b"\xfe\xff;q=0.9, deflate;q=0.5").unwrap(),
        );
        assert_eq!(parse_encoding(Some(&headers)), "");

        headers.insert(
            ACCEPT_ENCODING,
            HeaderValue::from_bytes(b"x-\xe9;q=0, deflate;q=0.5").unwrap(),
        );
        assert_eq!(parse_encoding(Some(&headers)), "deflate");
    }
}
