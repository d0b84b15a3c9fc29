//! Diff computation engine

use crate::group::group;
use crate::normalize::normalize;
use crate::segment::{Segment, SegmentKind};
use serde::{Deserialize, Serialize};
use similar::{Algorithm, TextDiff};
use std::fmt;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

/// Unit of comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Words, with whitespace and punctuation as their own tokens
    Word,
    /// Sentences, with inter-sentence whitespace as its own token
    #[default]
    Sentence,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Word => "word",
            Granularity::Sentence => "sentence",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary counts for a grouped comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonStats {
    /// Number of change blocks (a removal and/or addition between unchanged text)
    pub changes: usize,
    /// Words or sentences on the added side
    pub added: usize,
    /// Words or sentences on the removed side
    pub removed: usize,
}

/// Result of comparing two statement texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// The old text as it was compared (normalized unless disabled)
    pub old_text: String,
    /// The new text as it was compared
    pub new_text: String,
    /// Granularity the texts were tokenized at
    pub granularity: Granularity,
    /// Grouped segments, in order
    pub segments: Vec<Segment>,
}

impl ComparisonResult {
    /// Check if the texts differ at all
    pub fn has_changes(&self) -> bool {
        self.segments.iter().any(Segment::is_change)
    }

    /// Get only the changed segments
    pub fn changes(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.is_change())
    }

    pub fn stats(&self) -> ComparisonStats {
        let mut stats = ComparisonStats::default();
        let mut in_block = false;
        for segment in &self.segments {
            match segment.kind {
                SegmentKind::Unchanged => in_block = false,
                SegmentKind::Added | SegmentKind::Removed => {
                    if !in_block {
                        stats.changes += 1;
                        in_block = true;
                    }
                    let units = count_units(&segment.text, self.granularity);
                    if segment.kind == SegmentKind::Added {
                        stats.added += units;
                    } else {
                        stats.removed += units;
                    }
                }
            }
        }
        stats
    }
}

/// The main diff engine
#[derive(Debug, Clone)]
pub struct DiffEngine {
    /// Token unit used for alignment
    granularity: Granularity,
    /// Whether to normalize both texts before comparing
    normalize: bool,
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self {
            granularity: Granularity::default(),
            normalize: true,
        }
    }
}

impl DiffEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn with_normalization(mut self, enabled: bool) -> Self {
        self.normalize = enabled;
        self
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Compute the raw (ungrouped) diff between two strings.
    ///
    /// Consecutive tokens with the same tag are merged into one segment whose
    /// count is the number of tokens merged. Concatenating the unchanged and
    /// removed segments gives back `old`; unchanged and added gives back `new`.
    pub fn diff(&self, old: &str, new: &str) -> Vec<Segment> {
        if old == new {
            if old.is_empty() {
                return Vec::new();
            }
            let units = tokenize(old, self.granularity).len();
            return vec![Segment::unchanged(old).with_count(units)];
        }

        let old_tokens = tokenize(old, self.granularity);
        let new_tokens = tokenize(new, self.granularity);
        // Myers trims the common prefix before searching, so the shared
        // leading run is always matched first.
        let text_diff = TextDiff::configure()
            .algorithm(Algorithm::Myers)
            .diff_slices(&old_tokens, &new_tokens);

        let mut segments: Vec<Segment> = Vec::new();
        for change in text_diff.iter_all_changes() {
            let kind = SegmentKind::from(change.tag());
            match segments.last_mut() {
                Some(last) if last.kind == kind => {
                    last.text.push_str(change.value());
                    last.count = Some(last.units() + 1);
                }
                _ => segments.push(Segment::new(kind, change.value()).with_count(1)),
            }
        }

        debug!(
            granularity = %self.granularity,
            old_tokens = old_tokens.len(),
            new_tokens = new_tokens.len(),
            segments = segments.len(),
            "computed raw diff"
        );

        segments
    }

    /// Normalize (unless disabled), diff and group two texts
    pub fn compare(&self, old: &str, new: &str) -> ComparisonResult {
        let (old_text, new_text) = if self.normalize {
            (normalize(old), normalize(new))
        } else {
            (old.to_string(), new.to_string())
        };

        let raw = self.diff(&old_text, &new_text);
        let segments = group(&raw);
        debug!(
            raw = raw.len(),
            grouped = segments.len(),
            "grouped comparison segments"
        );

        ComparisonResult {
            old_text,
            new_text,
            granularity: self.granularity,
            segments,
        }
    }
}

/// Split text into diff tokens. Concatenating the tokens yields `text` exactly.
pub fn tokenize(text: &str, granularity: Granularity) -> Vec<&str> {
    match granularity {
        Granularity::Word => tokenize_words(text),
        Granularity::Sentence => tokenize_sentences(text),
    }
}

/// Word tokens follow Unicode word boundaries, so whitespace runs and each
/// punctuation mark come out as tokens of their own
fn tokenize_words(text: &str) -> Vec<&str> {
    text.split_word_bounds().collect()
}

/// Sentence tokens follow Unicode sentence boundaries. Whitespace after a
/// sentence becomes a token of its own, and consecutive whitespace-only
/// bounds (such as the two newlines of a paragraph break) form one token.
fn tokenize_sentences(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut space_start: Option<usize> = None;
    for (offset, sentence) in text.split_sentence_bound_indices() {
        let body = sentence.trim_end();
        if body.is_empty() {
            space_start.get_or_insert(offset);
            continue;
        }
        if let Some(start) = space_start.take() {
            tokens.push(&text[start..offset]);
        }
        tokens.push(body);
        if body.len() < sentence.len() {
            space_start = Some(offset + body.len());
        }
    }
    if let Some(start) = space_start {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Number of words or sentences in `text`, leaving out whitespace and punctuation
pub fn count_units(text: &str, granularity: Granularity) -> usize {
    match granularity {
        Granularity::Word => text.unicode_words().count(),
        Granularity::Sentence => tokenize_sentences(text)
            .into_iter()
            .filter(|token| !token.trim().is_empty())
            .count(),
    }
}

/// Raw diff with a default engine at the given granularity
pub fn diff(old: &str, new: &str, granularity: Granularity) -> Vec<Segment> {
    DiffEngine::new().with_granularity(granularity).diff(old, new)
}

/// Normalize, diff and group two texts at the given granularity
pub fn compare(old: &str, new: &str, granularity: Granularity) -> ComparisonResult {
    DiffEngine::new()
        .with_granularity(granularity)
        .compare(old, new)
}
