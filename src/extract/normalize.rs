//! Message normalization
//!
//! Chat signals arrive decorated with emoji, markdown and box-drawing bullets.
//! Everything except word characters, whitespace and the punctuation that
//! prices and labels need (`. - : # @ $ /`) is blanked out before matching.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters that do not survive normalization
static DISALLOWED_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s.\-:#@$/]").expect("Invalid disallowed-chars regex"));

/// Runs of whitespace
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Normalize raw chat text into the canonical uppercase form used for matching
///
/// Normalizing an already normalized string returns it unchanged. Some word
/// characters uppercase to characters outside `\w`, so the filter runs again
/// after case mapping.
pub fn normalize(raw: &str) -> String {
    let upper = DISALLOWED_CHARS.replace_all(raw, " ").to_uppercase();
    let stripped = DISALLOWED_CHARS.replace_all(&upper, " ");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}
