//! Incremental removal of the markdown code fence around generated HTML.
//!
//! The model is told to answer with a single ```` ```html ```` block. Its
//! output arrives in chunks, and the HTTP client must receive the HTML as
//! soon as it is known, without the fence lines and without anything already
//! sent being taken back.
//!
//! [`FenceStripper`] keeps the complete raw output and recomputes the visible
//! text from all of it on every chunk, then hands out only the part past what
//! was already emitted. Recomputing from the full prefix is what keeps a
//! closing marker split over several chunks from leaking: each intermediate
//! visible text is a prefix of the final one.
//!
//! # Example
//!
//! ```
//! use pagen_core::fence::FenceStripper;
//!
//! let mut fence = FenceStripper::new();
//! assert_eq!(fence.push("```html\n<h1>"), "<h1>");
//! assert_eq!(fence.push("Alice"), "Alice");
//! assert_eq!(fence.push("</h1>\n```"), "</h1>\n");
//!
//! let (rest, html) = fence.finish();
//! assert_eq!(rest, "");
//! assert_eq!(html, "<h1>Alice</h1>\n");
//! ```

/// Language-tagged opening marker the model is asked to start with.
pub const FENCE_OPENER: &str = "```html";

/// Closing marker expected at the very end of the output.
pub const FENCE_CLOSER: &str = "```";

/// Accumulates streamed model output and yields the newly visible HTML.
#[derive(Debug, Default)]
pub struct FenceStripper {
    raw: String,
    emitted: usize,
}

impl FenceStripper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one chunk and return the text revealed by it.
    ///
    /// The result is empty when the chunk only extended a fence marker, or
    /// ended in one or two backticks that may still turn into the closer.
    pub fn push(&mut self, chunk: &str) -> String {
        self.raw.push_str(chunk);

        let visible = withhold_partial_closer(strip_closer(strip_opener(&self.raw)));
        let fresh = visible.get(self.emitted..).unwrap_or_default().to_owned();
        self.emitted = visible.len();
        fresh
    }

    /// End of stream: returns the not yet emitted tail and the final HTML.
    ///
    /// Anything withheld while the stream was live is released here. The
    /// concatenation of every [`push`](Self::push) result and the returned
    /// tail equals the returned HTML.
    pub fn finish(self) -> (String, String) {
        let html = strip_closer(strip_opener(&self.raw));
        let rest = html.get(self.emitted..).unwrap_or_default().to_owned();
        (rest, html.to_owned())
    }

    /// Everything received so far, fence included.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Number of bytes handed out so far.
    pub fn emitted_len(&self) -> usize {
        self.emitted
    }
}

/// Remove the opener and the line break after it.
///
/// While `raw` could still grow into the opener, nothing is visible yet.
fn strip_opener(raw: &str) -> &str {
    match raw.strip_prefix(FENCE_OPENER) {
        Some("") | Some("\r") => "",
        Some(rest) => rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .unwrap_or(rest),
        None if FENCE_OPENER.starts_with(raw) => "",
        None => raw,
    }
}

/// Remove a trailing closer, along with any whitespace after it.
fn strip_closer(candidate: &str) -> &str {
    candidate
        .trim_end()
        .strip_suffix(FENCE_CLOSER)
        .unwrap_or(candidate)
}

/// Hold back one or two trailing backticks until the next chunk decides them.
fn withhold_partial_closer(text: &str) -> &str {
    let body = text.trim_end_matches('`');
    let backticks = text.len() - body.len();
    if backticks > 0 && backticks < FENCE_CLOSER.len() {
        body
    } else {
        text
    }
}
