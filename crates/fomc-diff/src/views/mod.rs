//! Output rendering for comparisons

mod html;
mod side_by_side;
mod single_pane;

pub use html::render_html_page;
pub use side_by_side::render_side_by_side;
pub use single_pane::render_single_pane;

use crossterm::style::{style, Attribute, Color, Stylize};
use fomc_diff_core::{ComparisonResult, ComparisonStats, Segment, SegmentKind, Statement};
use serde::Serialize;

/// One side of a comparison as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    /// Statement label or file path
    pub label: String,
    /// `Dec 18, 2024` style date, when the source is a statement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Source {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            label: path.into(),
            date: None,
        }
    }
}

impl From<&Statement> for Source {
    fn from(statement: &Statement) -> Self {
        Self {
            label: statement.label(),
            date: Some(statement.date_label()),
        }
    }
}

/// Everything a view needs besides the segments
#[derive(Debug, Clone, Copy)]
pub struct Header<'a> {
    pub old: &'a Source,
    pub new: &'a Source,
}

impl Header<'_> {
    /// `Comparing statements from Nov 07, 2024 and Dec 18, 2024`
    pub fn summary(&self) -> String {
        match (&self.old.date, &self.new.date) {
            (Some(old), Some(new)) => format!("Comparing statements from {old} and {new}"),
            _ => format!("Comparing {} and {}", self.old.label, self.new.label),
        }
    }
}

/// One line describing the size of the comparison
pub fn stats_line(result: &ComparisonResult) -> String {
    let ComparisonStats {
        changes,
        added,
        removed,
    } = result.stats();
    if changes == 0 {
        return "No differences found".to_string();
    }
    let unit = result.granularity.as_str();
    format!(
        "{changes} {} ({added} {unit}{} added, {removed} {unit}{} removed)",
        plural(changes, "change", "changes"),
        if added == 1 { "" } else { "s" },
        if removed == 1 { "" } else { "s" },
    )
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

/// Marks changed text for the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Painter {
    color: bool,
}

impl Painter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Paint a segment. Markers are applied per line so they never run across a line break.
    pub fn paint(&self, segment: &Segment) -> String {
        if segment.kind == SegmentKind::Unchanged {
            return segment.text.clone();
        }
        segment
            .text
            .split('\n')
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    self.mark(segment.kind, line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn mark(&self, kind: SegmentKind, text: &str) -> String {
        match (kind, self.color) {
            (SegmentKind::Removed, true) => style(text)
                .with(Color::Red)
                .attribute(Attribute::CrossedOut)
                .to_string(),
            (SegmentKind::Added, true) => style(text).with(Color::Green).bold().to_string(),
            (SegmentKind::Removed, false) => format!("[-{text}-]"),
            (SegmentKind::Added, false) => format!("{{+{text}+}}"),
            (SegmentKind::Unchanged, _) => text.to_string(),
        }
    }

    pub fn heading(&self, text: &str) -> String {
        if self.color {
            style(text).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Paint a run of segments into one string
fn paint_all<'a>(painter: &Painter, segments: impl IntoIterator<Item = &'a Segment>) -> String {
    segments.into_iter().map(|s| painter.paint(s)).collect()
}

/// Machine-readable comparison, as printed by `--format json`
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub old: &'a Source,
    pub new: &'a Source,
    pub summary: String,
    pub stats: ComparisonStats,
    #[serde(flatten)]
    pub result: &'a ComparisonResult,
}

impl<'a> Report<'a> {
    pub fn new(header: Header<'a>, result: &'a ComparisonResult) -> Self {
        Self {
            old: header.old,
            new: header.new,
            summary: header.summary(),
            stats: result.stats(),
            result,
        }
    }
}
