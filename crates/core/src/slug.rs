//! Slug generation for pages.
//!
//! A page slug is the slugified character name followed by `----` and six
//! random hex digits, e.g. `alice----3fa91c`. The suffix makes collisions on
//! the unique `slug` column practically impossible.

/// Separator between the readable part and the random suffix.
pub const SUFFIX_SEPARATOR: &str = "----";

/// Readable part used when a name has no ASCII letters or digits.
pub const FALLBACK_SLUG: &str = "page";

/// Lowercase ASCII letters and digits, every other run collapsed to one `-`,
/// no leading or trailing `-`.
///
/// ```
/// use pagen_core::slug::slugify;
///
/// assert_eq!(slugify("Sir Alice of  Avalon!"), "sir-alice-of-avalon");
/// assert_eq!(slugify("黎深"), "");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Build a fresh page slug for a character name.
pub fn page_slug(character_name: &str) -> String {
    let mut base = slugify(character_name);
    if base.is_empty() {
        base.push_str(FALLBACK_SLUG);
    }
    let suffix: [u8; 3] = rand::random();
    format!(
        "{base}{SUFFIX_SEPARATOR}{:02x}{:02x}{:02x}",
        suffix[0], suffix[1], suffix[2]
    )
}

/// Slug for an imported sample file: the lowercased stem with every run of
/// characters outside `[a-z0-9]` replaced by `-`.
pub fn file_slug(stem: &str) -> String {
    let lowered = stem.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_run = false;

    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            in_run = false;
        } else if !in_run {
            slug.push('-');
            in_run = true;
        }
    }

    slug
}
