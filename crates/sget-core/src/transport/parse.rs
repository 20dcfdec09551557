//! Parse collected HTTP header lines into a `ProbeResponse`.

use super::ProbeResponse;

/// Builds a `ProbeResponse` from raw header lines and the final status code.
///
/// Redirect hops each contribute their own header block, opened by a status
/// line. Each status line resets the accumulated fields, so only the final
/// response's headers take effect.
pub(super) fn parse_probe(status: u32, lines: &[String]) -> ProbeResponse {
    let mut content_length: i64 = -1;
    let mut accept_ranges = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_status_line(line) {
            content_length = -1;
            accept_ranges = None;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.parse::<i64>() {
                    content_length = n;
                }
            }
            if name.eq_ignore_ascii_case("accept-ranges") {
                accept_ranges = Some(value.to_string());
            }
        }
    }

    ProbeResponse {
        status,
        content_length,
        accept_ranges,
    }
}

fn is_status_line(line: &str) -> bool {
    line.get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("HTTP/"))
}
