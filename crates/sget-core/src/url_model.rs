//! Output-filename derivation from the download URL.

/// Default filename when the URL path yields nothing usable.
const DEFAULT_FILENAME: &str = "download.bin";

/// Derives a safe local filename from the last path segment of `url`.
///
/// The segment is sanitized for Linux filesystems (no `/`, NUL, or control
/// characters, no leading/trailing dots or spaces). Falls back to
/// `download.bin` for root paths, unparseable URLs, or reserved names.
pub fn derive_filename(url: &str) -> String {
    let segment = last_path_segment(url);
    let raw = match segment {
        Some(s) => s,
        None => return DEFAULT_FILENAME.to_string(),
    };

    let sanitized = sanitize(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

fn last_path_segment(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c == '/' || c == '\0' || c.is_control() { '_' } else { c })
        .collect();
    cleaned.trim_matches(|c| c == '.' || c == ' ').to_string()
}
