//! Markup stripping for bot replies.
//!
//! Completion endpoints answer in lightweight markdown. The terminal shows
//! plain text, so bold/emphasis markers, headings and list bullets are
//! removed before a reply is stored.

use regex::Regex;
use std::sync::LazyLock;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"));

static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("emphasis pattern is valid"));

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#+\s").expect("heading pattern is valid"));

static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*[*\-]\s").expect("bullet pattern is valid"));

/// Characters stripped from either end of the result.
const EDGE_MARKERS: [char; 3] = ['*', '-', '#'];

/// Strip markup from raw bot output.
///
/// The pass is repeated until the text stops changing, so the result is
/// a fixed point: `sanitize(&sanitize(x)) == sanitize(x)`.
#[must_use]
pub fn sanitize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut current = raw.to_string();
    loop {
        let next = sanitize_once(&current);
        // Every step only removes characters, so this terminates.
        if next == current {
            return next;
        }
        current = next;
    }
}

fn sanitize_once(input: &str) -> String {
    let s = BOLD.replace_all(input, "$1");
    let s = EMPHASIS.replace_all(&s, "$1");
    let s = HEADING.replace_all(&s, "");
    let s = BULLET.replace_all(&s, "");
    strip_edge_markers(s.trim()).to_string()
}

fn strip_edge_markers(mut s: &str) -> &str {
    loop {
        let before = s.len();
        if let Some(rest) = s.strip_prefix(EDGE_MARKERS) {
            s = rest.trim();
        }
        if let Some(rest) = s.strip_suffix(EDGE_MARKERS) {
            s = rest.trim();
        }
        if s.len() == before {
            return s;
        }
    }
}
