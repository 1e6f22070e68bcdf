//! Anchor text derived from article titles.

use once_cell::sync::Lazy;
use regex::Regex;

const MAX_ANCHOR_CHARS: usize = 50;
const TRUNCATED_CHARS: usize = 47;

static YEAR_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\(\d{4}\)\s*$").unwrap());
static COLON_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*:[^:]*$").unwrap());
static DASH_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*-\s*[^-]*$").unwrap());

/// Shorten a title into link anchor text.
///
/// Drops a trailing `(YYYY)`, then a trailing `: subtitle`, then a trailing
/// `-segment` (the last hyphen, spaced or not), trims, and caps the result at
/// 50 characters (47 plus `...`). A title that is entirely a stripped segment
/// yields an empty anchor.
pub fn title_anchor(title: &str) -> String {
    let stripped = YEAR_SUFFIX_RE.replace(title, "");
    let stripped = COLON_SUFFIX_RE.replace(&stripped, "");
    let stripped = DASH_SUFFIX_RE.replace(&stripped, "");
    let anchor = stripped.trim();

    if anchor.chars().count() > MAX_ANCHOR_CHARS {
        let truncated: String = anchor.chars().take(TRUNCATED_CHARS).collect();
        format!("{}...", truncated)
    } else {
        anchor.to_string()
    }
}
