//! Minimal HTTP/1.1 origin for integration tests: HEAD probe plus Range GET.
//!
//! Serves one static body per server. Counts GET requests so tests can assert
//! how many fetches the manager dispatched.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Status line returned for HEAD (200 = normal probe).
    pub head_status: u32,
    /// Advertise `Accept-Ranges: bytes` on the probe response.
    pub advertise_ranges: bool,
    /// Honor Range headers on GET; otherwise always return the full body.
    pub honor_ranges: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            head_status: 200,
            advertise_ranges: true,
            honor_ranges: true,
        }
    }
}

pub struct Server {
    pub url: String,
    /// Number of GET requests seen so far.
    pub gets: Arc<AtomicUsize>,
}

/// Starts an origin serving `body` in a background thread; runs until the
/// process exits.
pub fn start(body: Vec<u8>, opts: Options) -> Server {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let gets = Arc::new(AtomicUsize::new(0));
    let gets_srv = Arc::clone(&gets);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let gets = Arc::clone(&gets_srv);
            thread::spawn(move || handle(stream, &body, &gets, opts));
        }
    });
    Server {
        url: format!("http://127.0.0.1:{}/data.bin", port),
        gets,
    }
}

fn handle(mut stream: TcpStream, body: &[u8], gets: &AtomicUsize, opts: Options) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(5)));

    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };

    let (method, range) = parse_request(request);
    let total = body.len() as u64;
    let accept_ranges = if opts.advertise_ranges {
        "Accept-Ranges: bytes\r\n"
    } else {
        ""
    };

    if method.eq_ignore_ascii_case("HEAD") {
        let status_text = match opts.head_status {
            200 => "200 OK",
            404 => "404 Not Found",
            405 => "405 Method Not Allowed",
            other => return respond_empty(&mut stream, other),
        };
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
            status_text, total, accept_ranges
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }

    if method.eq_ignore_ascii_case("GET") {
        gets.fetch_add(1, Ordering::SeqCst);
        let (status, slice) = match range.filter(|_| opts.honor_ranges) {
            Some((start, end_incl)) if start < total || total == 0 => {
                let end_excl = (end_incl.saturating_add(1)).min(total) as usize;
                ("206 Partial Content", &body[start as usize..end_excl])
            }
            Some(_) => ("416 Range Not Satisfiable", &body[0..0]),
            None => ("200 OK", body),
        };
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
            status,
            slice.len(),
            accept_ranges
        );
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.write_all(slice);
        return;
    }

    let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nConnection: close\r\n\r\n");
}

fn respond_empty(stream: &mut TcpStream, status: u32) {
    let _ = stream.write_all(
        format!("HTTP/1.1 {} X\r\nContent-Length: 0\r\nConnection: close\r\n\r\n", status)
            .as_bytes(),
    );
}

/// Returns (method, optional (start, end_inclusive)) from `Range: bytes=X-Y`.
fn parse_request(request: &str) -> (&str, Option<(u64, u64)>) {
    let mut lines = request.lines();
    let method = lines
        .next()
        .and_then(|l| l.split_whitespace().next())
        .unwrap_or("");
    let mut range = None;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        if !name.trim().eq_ignore_ascii_case("range") {
            continue;
        }
        let value = value.trim();
        let Some(spec) = value.strip_prefix("bytes=") else {
            continue;
        };
        if let Some((a, b)) = spec.split_once('-') {
            let start = a.trim().parse::<u64>().unwrap_or(0);
            let end = b.trim().parse::<u64>().unwrap_or(u64::MAX);
            range = Some((start, end));
        }
    }
    (method, range)
}
