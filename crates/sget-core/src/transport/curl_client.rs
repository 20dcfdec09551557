//! libcurl-backed [`Transport`] implementation.
//!
//! One `Easy` handle per request; fetch workers each own their call, so no
//! handle sharing is needed. Follows redirects and applies connect and
//! low-speed timeouts so a dead peer eventually fails the transfer.

use super::{parse, ByteRange, ProbeResponse, Transport, TransportError};
use std::str;
use std::time::Duration;

/// Default transport used by [`crate::DownloadManager`].
#[derive(Debug, Default)]
pub struct CurlTransport;

impl CurlTransport {
    pub fn new() -> Self {
        CurlTransport
    }

    fn configure(easy: &mut curl::easy::Easy) -> Result<(), TransportError> {
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(Duration::from_secs(30))?;
        // Abort if throughput drops below 1 KiB/s for 60s; avoids a hard
        // wall-clock cap on large transfers over slow links.
        easy.low_speed_limit(1024)?;
        easy.low_speed_time(Duration::from_secs(60))?;
        Ok(())
    }
}

impl Transport for CurlTransport {
    fn probe(&self, url: &str) -> Result<ProbeResponse, TransportError> {
        let mut headers: Vec<String> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.nobody(true)?; // HEAD request
        Self::configure(&mut easy)?;
        easy.connect_timeout(Duration::from_secs(15))?;
        easy.timeout(Duration::from_secs(30))?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    headers.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()? as u32;
        Ok(parse::parse_probe(status, &headers))
    }

    fn fetch(&self, url: &str, range: Option<ByteRange>) -> Result<Vec<u8>, TransportError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        Self::configure(&mut easy)?;

        if let Some(r) = range {
            // curl prepends "bytes=" itself.
            easy.range(&format!("{}-{}", r.start, r.end))?;
        }

        let mut body: Vec<u8> = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()? as u32;
        if !(200..300).contains(&status) {
            return Err(TransportError::Http(status));
        }
        Ok(body)
    }
}
