//! Whitespace normalization applied to statement text before comparison

use regex::Regex;
use std::sync::LazyLock;

static CARRIAGE_RETURN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r\n?").unwrap());
static HORIZONTAL_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Normalize raw statement text.
///
/// Runs of spaces and tabs become a single space, three or more newlines
/// become a paragraph break (`"\n\n"`), and the result is trimmed. Carriage
/// returns are folded into plain newlines first.
///
/// `normalize(normalize(t)) == normalize(t)` holds for every input.
pub fn normalize(text: &str) -> String {
    let text = CARRIAGE_RETURN.replace_all(text, "\n");
    let text = HORIZONTAL_SPACE.replace_all(&text, " ");
    let text = BLANK_LINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}
