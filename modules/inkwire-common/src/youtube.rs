//! YouTube video-id extraction from whatever the editors pasted in:
//! bare ids, watch/share/embed/shorts URLs, or half-broken fragments.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("valid regex"));

/// An 11-char id-shaped run with non-id characters (or the string edge)
/// on both sides.
static SCAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z0-9_-])([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)")
        .expect("valid regex")
});

/// Resolve an 11-character YouTube video identifier from an arbitrary
/// string. Pure and deterministic; returns `None` when nothing id-shaped
/// can be found.
pub fn resolve(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if ID_RE.is_match(trimmed) {
        return Some(trimmed.to_string());
    }

    let parsed = match Url::parse(trimmed) {
        Ok(u) => u,
        Err(_) => return scan(trimmed),
    };

    let host = parsed.host_str().unwrap_or("").to_lowercase();
    if host == "youtu.be" {
        if let Some(seg) = parsed.path_segments().and_then(|mut s| s.next()) {
            if ID_RE.is_match(seg) {
                return Some(seg.to_string());
            }
        }
    } else if host == "youtube.com" || host.ends_with(".youtube.com") {
        if let Some((_, v)) = parsed.query_pairs().find(|(k, _)| k == "v") {
            if ID_RE.is_match(&v) {
                return Some(v.into_owned());
            }
        }
        let segments: Vec<&str> = parsed
            .path_segments()
            .map(|s| s.collect())
            .unwrap_or_default();
        if let ["embed" | "shorts", id, ..] = segments.as_slice() {
            if ID_RE.is_match(id) {
                return Some((*id).to_string());
            }
        }
    }

    scan(trimmed)
}

fn scan(raw: &str) -> Option<String> {
    SCAN_RE.captures(raw).map(|c| c[1].to_string())
}
