//! Title and description extraction for imported HTML pages.

use std::sync::LazyLock;

use regex::Regex;

/// Title used when a document has no usable `<title>`.
pub const UNTITLED: &str = "Untitled";

/// Maximum characters of first-paragraph text kept as a fallback description.
pub const PARAGRAPH_DESCRIPTION_CHARS: usize = 200;

/// Maximum characters of a description shown in page listings.
pub const LISTING_DESCRIPTION_CHARS: usize = 100;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<title[^>]*>([^<]+)</title>").expect("valid regex"));

static META_DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*name=["']description["'][^>]*content=["']([^"']+)["'][^>]*>"#)
        .expect("valid regex")
});

static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<p[^>]*>([^<]+)<").expect("valid regex"));

/// Text of the first `<title>` element, trimmed.
pub fn extract_title(html: &str) -> String {
    TITLE_RE
        .captures(html)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// `<meta name="description">` content, else the start of the first
/// paragraph, else an empty string.
pub fn extract_description(html: &str) -> String {
    if let Some(caps) = META_DESCRIPTION_RE.captures(html) {
        return caps[1].trim().to_string();
    }

    PARAGRAPH_RE
        .captures(html)
        .map(|caps| {
            let text: String = caps[1].trim().chars().take(PARAGRAPH_DESCRIPTION_CHARS).collect();
            format!("{text}...")
        })
        .unwrap_or_default()
}

/// First `max_chars` characters of `text` followed by `...`.
pub fn preview(text: &str, max_chars: usize) -> String {
    let head: String = text.chars().take(max_chars).collect();
    format!("{head}...")
}
