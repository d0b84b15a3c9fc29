//! Segment representation for diff output

use serde::{Deserialize, Serialize};
use similar::ChangeTag;

/// The kind of a segment in a diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Present in both texts
    Unchanged,
    /// Present only in the new text
    Added,
    /// Present only in the old text
    Removed,
}

impl From<ChangeTag> for SegmentKind {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Equal => SegmentKind::Unchanged,
            ChangeTag::Insert => SegmentKind::Added,
            ChangeTag::Delete => SegmentKind::Removed,
        }
    }
}

/// One side of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Old,
    New,
}

/// A run of text tagged with how it differs between the two texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// The kind of segment
    pub kind: SegmentKind,
    /// The text content, exactly as it appears in its side(s)
    pub text: String,
    /// Number of tokens (words, sentences or merged segments) behind this text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl Segment {
    pub fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            count: None,
        }
    }

    pub fn unchanged(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Unchanged, text)
    }

    pub fn added(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Added, text)
    }

    pub fn removed(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Removed, text)
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Number of units this segment stands for; a segment without a count is one unit
    pub fn units(&self) -> usize {
        self.count.unwrap_or(1)
    }

    /// Check if this is an actual change (not just context)
    pub fn is_change(&self) -> bool {
        self.kind != SegmentKind::Unchanged
    }

    /// True when the text is empty or made only of whitespace
    pub fn is_whitespace(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }

    /// Whether this segment's text is part of the given side's text
    pub fn belongs_to(&self, side: Side) -> bool {
        match (self.kind, side) {
            (SegmentKind::Unchanged, _) => true,
            (SegmentKind::Removed, Side::Old) => true,
            (SegmentKind::Added, Side::New) => true,
            _ => false,
        }
    }
}

/// Rebuild one side's text from a segment sequence
pub fn reconstruct(segments: &[Segment], side: Side) -> String {
    segments
        .iter()
        .filter(|s| s.belongs_to(side))
        .map(|s| s.text.as_str())
        .collect()
}
