//! Transport seam: the minimal HTTP capability the download pipeline needs.
//!
//! The core only requires a HEAD-equivalent probe and a (possibly ranged) GET
//! returning the full body. Connection pooling, TLS and proxy setup belong to
//! the transport implementation, not to the pipeline.

mod curl_client;
mod parse;

pub use curl_client::CurlTransport;

use thiserror::Error;

/// Inclusive byte range `[start, end]`, as used in HTTP `Range` headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte offset (inclusive).
    pub start: u64,
    /// Last byte offset (inclusive).
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes covered by this range.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// `Range` header value: `bytes=<start>-<end>`, inclusive, no spaces.
    pub fn header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}

/// Parsed result of a capability probe (HEAD request).
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    /// HTTP status code of the probe response.
    pub status: u32,
    /// Total resource size in bytes; -1 when `Content-Length` was absent.
    pub content_length: i64,
    /// Raw `Accept-Ranges` header value, if present.
    pub accept_ranges: Option<String>,
}

impl ProbeResponse {
    /// True when the origin advertises ranged requests: header present and not
    /// the literal `none`.
    pub fn supports_ranges(&self) -> bool {
        match self.accept_ranges.as_deref() {
            Some(v) => !v.is_empty() && !v.eq_ignore_ascii_case("none"),
            None => false,
        }
    }
}

/// Error from a single probe or fetch operation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// libcurl reported an error (DNS, connect, timeout, TLS, ...).
    #[error(transparent)]
    Curl(#[from] curl::Error),

    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
}

/// Abstract request-issuing capability used by the download pipeline.
///
/// Implementations must be shareable across fetch worker threads.
pub trait Transport: Send + Sync {
    /// Issues a HEAD request and returns status plus the headers the pipeline
    /// cares about. A non-2xx status is returned as a normal `ProbeResponse`,
    /// not an error; the manager decides what statuses are acceptable.
    fn probe(&self, url: &str) -> Result<ProbeResponse, TransportError>;

    /// Issues a GET request, restricted to `range` when given, and returns the
    /// complete response body. A non-2xx status is an error.
    fn fetch(&self, url: &str, range: Option<ByteRange>) -> Result<Vec<u8>, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_range_header_value() {
        let r = ByteRange { start: 0, end: 99 };
        assert_eq!(r.header_value(), "bytes=0-99");
        assert_eq!(r.len(), 100);
        assert!(!r.is_empty());
    }

    #[test]
    fn byte_range_single_byte() {
        let r = ByteRange { start: 42, end: 42 };
        assert_eq!(r.header_value(), "bytes=42-42");
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn supports_ranges_cases() {
        let mut p = ProbeResponse {
            status: 200,
            content_length: 10,
            accept_ranges: Some("bytes".to_string()),
        };
        assert!(p.supports_ranges());
        p.accept_ranges = Some("none".to_string());
        assert!(!p.supports_ranges());
        p.accept_ranges = Some("NONE".to_string());
        assert!(!p.supports_ranges());
        p.accept_ranges = Some(String::new());
        assert!(!p.supports_ranges());
        p.accept_ranges = None;
        assert!(!p.supports_ranges());
    }
}
