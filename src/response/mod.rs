//! Response helpers.
//!
//! Glue between the request/response types of the `http` crate and the
//! codec. The `Content-Encoding` header is decided before any body bytes
//! are produced, so the announced encoding always matches the one applied.

use std::fs::File;

use http::header::{HeaderValue, CONTENT_ENCODING, CONTENT_LENGTH, VARY};
use http::{HeaderMap, Response, StatusCode};

use crate::codec::{write_body, write_file, Transcoded};
use crate::config::{CompressionConfig, Config};
use crate::error::Result;
use crate::protocol::parse_encoding;

/// Builds compressed responses according to [`CompressionConfig`].
#[derive(Debug, Clone, Default)]
pub struct ResponseEncoder {
    config: CompressionConfig,
}

impl ResponseEncoder {
    /// Create an encoder from the crate configuration
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.compression.clone(),
        }
    }

    /// Current compression settings
    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }

    /// Decide the encoding for a body and write the matching headers.
    ///
    /// `body_len` is the size of an in-memory body, or `None` for a file,
    /// which is never subject to the minimum length. Adds
    /// `Vary: Accept-Encoding` whenever compression is enabled, since the
    /// response then depends on that header. Returns the encoding to pass to
    /// the codec; empty means send identity.
    pub fn prepare_headers(
        &self,
        request_headers: &HeaderMap,
        response_headers: &mut HeaderMap,
        body_len: Option<usize>,
    ) -> &'static str {
        if !self.config.enabled {
            return "";
        }

        let has_vary = response_headers
            .get_all(VARY)
            .iter()
            .any(|v| v.as_bytes().eq_ignore_ascii_case(b"accept-encoding"));
        if !has_vary {
            response_headers.append(VARY, HeaderValue::from_static("Accept-Encoding"));
        }

        if body_len.is_some_and(|len| !self.config.should_compress(len)) {
            return "";
        }

        let encoding = parse_encoding(Some(request_headers));
        if !encoding.is_empty() {
            response_headers.insert(CONTENT_ENCODING, HeaderValue::from_static(encoding));
        }
        encoding
    }

    /// Build a `200 OK` response for a generated body.
    pub fn encode_body(&self, request_headers: &HeaderMap, body: &[u8]) -> Result<Response<Vec<u8>>> {
        let mut headers = HeaderMap::new();
        let encoding = self.prepare_headers(request_headers, &mut headers, Some(body.len()));

        let mut out = Vec::with_capacity(body.len());
        let result = write_body(encoding, &mut out, body)?;
        finish_response(headers, &result, out)
    }

    /// Build a `200 OK` response for a file body.
    pub fn encode_file(&self, request_headers: &HeaderMap, file: &mut File) -> Result<Response<Vec<u8>>> {
        let mut headers = HeaderMap::new();
        let encoding = self.prepare_headers(request_headers, &mut headers, None);

        let mut out = Vec::new();
        let result = write_file(encoding, &mut out, file)?;
        finish_response(headers, &result, out)
    }
}

fn finish_response(
    headers: HeaderMap,
    result: &Transcoded,
    body: Vec<u8>,
) -> Result<Response<Vec<u8>>> {
    tracing::debug!(
        encoding = result.encoding,
        original = result.bytes_read,
        encoded = body.len(),
        "response body encoded"
    );

    let mut response = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_LENGTH, body.len())
        .body(body)?;
    response.headers_mut().extend(headers);
    Ok(response)
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Seek, SeekFrom, Write};

    use flate2::read::{GzDecoder, ZlibDecoder};
    use http::header::ACCEPT_ENCODING;

    use super::*;

    fn request(accept_encoding: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static(accept_encoding));
        headers
    }

    const BODY: &[u8] = br#"{"data":[1,2,3,4,5,6,7,8,9,10],"ok":true}"#;

    #[test]
    fn test_encode_body_gzip() {
        let encoder = ResponseEncoder::default();
        let response = encoder.encode_body(&request("gzip"), BODY).unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_ENCODING], "gzip");
        assert_eq!(response.headers()[VARY], "Accept-Encoding");
        assert_eq!(
            response.headers()[CONTENT_LENGTH],
            response.body().len().to_string().as_str()
        );

        let mut decoded = Vec::new();
        GzDecoder::new(response.body().as_slice())
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, BODY);
    }

    #[test]
    fn test_encode_body_deflate() {
        let encoder = ResponseEncoder::default();
        let response = encoder
            .encode_body(&request("gzip;q=0, deflate;q=0.5"), BODY)
            .unwrap();
        assert_eq!(response.headers()[CONTENT_ENCODING], "deflate");

        let mut decoded = Vec::new();
        ZlibDecoder::new(response.body().as_slice())
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, BODY);
    }

    #[test]
    fn test_no_accept_encoding() {
        let encoder = ResponseEncoder::default();
        let response = encoder.encode_body(&HeaderMap::new(), BODY).unwrap();
        assert!(response.headers().get(CONTENT_ENCODING).is_none());
        assert_eq!(response.headers()[VARY], "Accept-Encoding");
        assert_eq!(response.body(), BODY);
    }

    #[test]
    fn test_short_body_not_compressed() {
        let encoder = ResponseEncoder::default();
        let response = encoder.encode_body(&request("gzip"), b"tiny").unwrap();
        assert!(response.headers().get(CONTENT_ENCODING).is_none());
        assert_eq!(response.body(), b"tiny");
    }

    #[test]
    fn test_disabled_compression() {
        let config = Config::from_toml("[compression]\nenabled = false\n").unwrap();
        let encoder = ResponseEncoder::new(&config);
        let response = encoder.encode_body(&request("gzip"), BODY).unwrap();
        assert!(response.headers().get(CONTENT_ENCODING).is_none());
        assert!(response.headers().get(VARY).is_none());
        assert_eq!(response.body(), BODY);
    }

    #[test]
    fn test_prepare_headers_keeps_existing_vary() {
        let encoder = ResponseEncoder::default();
        let mut headers = HeaderMap::new();
        headers.insert(VARY, HeaderValue::from_static("accept-encoding"));

        let encoding = encoder.prepare_headers(&request("*"), &mut headers, None);
        assert_eq!(encoding, "gzip");
        assert_eq!(headers.get_all(VARY).iter().count(), 1);
        assert_eq!(headers[CONTENT_ENCODING], "gzip");
    }

    #[test]
    fn test_encode_file_ignores_min_length() {
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(b"abc").unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();

        let encoder = ResponseEncoder::default();
        let response = encoder.encode_file(&request("gzip"), &mut file).unwrap();
        assert_eq!(response.headers()[CONTENT_ENCODING], "gzip");

        let mut decoded = Vec::new();
        GzDecoder::new(response.body().as_slice())
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, b"abc");
    }
}
