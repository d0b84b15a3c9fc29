//! HTML rendering of grouped segments

use crate::segment::{Segment, SegmentKind, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker class wrapped around added text
pub const ADDED_CLASS: &str = "diff-added";
/// Marker class wrapped around removed text
pub const REMOVED_CLASS: &str = "diff-removed";

const PARAGRAPH_BREAK: &str = "\n\n";

/// How a comparison is laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    /// Old text and new text in separate panels
    #[default]
    SideBySide,
    /// One text with removals and additions inline
    Unified,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::SideBySide => "side-by-side",
            ViewMode::Unified => "unified",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Escape the five HTML-reserved characters
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn marker_class(kind: SegmentKind) -> Option<&'static str> {
    match kind {
        SegmentKind::Added => Some(ADDED_CLASS),
        SegmentKind::Removed => Some(REMOVED_CLASS),
        SegmentKind::Unchanged => None,
    }
}

/// Render segments as paragraphs of escaped text with changes marked.
///
/// Every `"\n\n"` starts a new `<p>`. A marker never crosses a paragraph
/// boundary: changed text that spans one is closed and reopened around it.
/// Empty paragraphs are dropped, so no segments render as an empty string.
pub fn highlight<'a, I>(segments: I) -> String
where
    I: IntoIterator<Item = &'a Segment>,
{
    let mut paragraphs = Vec::new();
    let mut current = String::new();

    for segment in segments {
        let class = marker_class(segment.kind);
        for (index, piece) in segment.text.split(PARAGRAPH_BREAK).enumerate() {
            if index > 0 {
                paragraphs.push(std::mem::take(&mut current));
            }
            if piece.is_empty() {
                continue;
            }
            let escaped = escape_html(piece);
            match class {
                Some(class) => {
                    current.push_str(&format!(r#"<mark class="{class}">{escaped}</mark>"#))
                }
                None => current.push_str(&escaped),
            }
        }
    }
    paragraphs.push(current);

    paragraphs
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{p}</p>"))
        .collect()
}

/// Render the segments that make up one side of the comparison
pub fn render_side(segments: &[Segment], side: Side) -> String {
    highlight(segments.iter().filter(|s| s.belongs_to(side)))
}

/// Rendered panels, before they are laid out into viewer markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum RenderedView {
    SideBySide { old: String, new: String },
    Unified { content: String },
}

impl RenderedView {
    /// Lay the panels out as viewer markup
    pub fn to_html(&self) -> String {
        match self {
            RenderedView::SideBySide { old, new } => format!(
                concat!(
                    r#"<div class="diff-viewer side-by-side">"#,
                    r#"<div class="diff-panel"><h3>Previous Statement</h3>"#,
                    r#"<div class="diff-content old">{}</div></div>"#,
                    r#"<div class="diff-panel"><h3>Current Statement</h3>"#,
                    r#"<div class="diff-content new">{}</div></div>"#,
                    "</div>"
                ),
                old, new
            ),
            RenderedView::Unified { content } => format!(
                r#"<div class="diff-viewer unified"><div class="diff-content">{content}</div></div>"#
            ),
        }
    }
}

pub fn render_view(segments: &[Segment], mode: ViewMode) -> RenderedView {
    match mode {
        ViewMode::SideBySide => RenderedView::SideBySide {
            old: render_side(segments, Side::Old),
            new: render_side(segments, Side::New),
        },
        ViewMode::Unified => RenderedView::Unified {
            content: highlight(segments),
        },
    }
}

/// Render grouped segments as viewer markup. An empty sequence renders as an empty string.
pub fn render(segments: &[Segment], mode: ViewMode) -> String {
    if segments.is_empty() {
        return String::new();
    }
    render_view(segments, mode).to_html()
}
