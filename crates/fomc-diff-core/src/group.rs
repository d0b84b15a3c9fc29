//! Change grouping: turn a raw segment sequence into readable change blocks
//!
//! A raw diff tends to alternate between short removals, additions and the
//! single spaces separating them. Grouping collects every run of changes into
//! one removal followed by one addition, and folds a whitespace-only unchanged
//! segment into the block when more changes follow it.

use crate::segment::{Segment, SegmentKind};

/// Pending removals and additions for the block being built
#[derive(Default)]
struct Block<'a> {
    removed: Vec<&'a Segment>,
    added: Vec<&'a Segment>,
}

impl<'a> Block<'a> {
    fn push_whitespace(&mut self, segment: &'a Segment) {
        self.removed.push(segment);
        self.added.push(segment);
    }

    /// Emit the removal then the addition, if any, and reset the block
    fn flush_into(&mut self, out: &mut Vec<Segment>) {
        if !self.removed.is_empty() {
            out.push(merge(SegmentKind::Removed, &self.removed));
        }
        if !self.added.is_empty() {
            out.push(merge(SegmentKind::Added, &self.added));
        }
        self.removed.clear();
        self.added.clear();
    }
}

/// Concatenate parts into one segment; its count is the sum of the parts' units
fn merge(kind: SegmentKind, parts: &[&Segment]) -> Segment {
    let text: String = parts.iter().map(|s| s.text.as_str()).collect();
    let units = parts.iter().map(|s| s.units()).sum();
    Segment::new(kind, text).with_count(units)
}

/// Whether the segment after a whitespace-only unchanged segment keeps a change block going
fn continues_block(next: Option<&Segment>) -> bool {
    match next {
        Some(segment) => segment.is_change() || segment.is_whitespace(),
        None => false,
    }
}

/// Group a segment sequence into change blocks.
///
/// Unchanged segments with visible text are emitted as they are and end the
/// current block. Every block comes out as at most one removed segment
/// followed by at most one added segment, whatever order its parts arrived in.
/// A whitespace-only unchanged segment joins both sides of the block when the
/// next segment is a change (or more whitespace); otherwise it ends the block
/// like any other unchanged text.
///
/// Grouping is idempotent and keeps both sides of the comparison intact.
pub fn group(segments: &[Segment]) -> Vec<Segment> {
    let mut grouped = Vec::with_capacity(segments.len());
    let mut block = Block::default();

    for (index, segment) in segments.iter().enumerate() {
        match segment.kind {
            SegmentKind::Removed => block.removed.push(segment),
            SegmentKind::Added => block.added.push(segment),
            SegmentKind::Unchanged => {
                if segment.is_whitespace() && continues_block(segments.get(index + 1)) {
                    block.push_whitespace(segment);
                } else {
                    block.flush_into(&mut grouped);
                    grouped.push(segment.clone());
                }
            }
        }
    }
    block.flush_into(&mut grouped);

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{reconstruct, Side};
    use pretty_assertions::assert_eq;

    fn u(text: &str) -> Segment {
        Segment::unchanged(text)
    }

    fn a(text: &str) -> Segment {
        Segment::added(text)
    }

    fn r(text: &str) -> Segment {
        Segment::removed(text)
    }

    #[test]
    fn test_empty_input() {
        assert!(group(&[]).is_empty());
    }

    #[test]
    fn test_unchanged_passes_through() {
        let segments = vec![u("The Committee decided.")];
        assert_eq!(group(&segments), segments);
    }

    #[test]
    fn test_removal_before_addition() {
        let segments = vec![u("rates "), a("fell"), r("rose"), u(".")];
        assert_eq!(
            group(&segments),
            vec![
                u("rates "),
                r("rose").with_count(1),
                a("fell").with_count(1),
                u("."),
            ]
        );
    }

    #[test]
    fn test_whitespace_between_changes_is_folded() {
        let segments = vec![
            u("to "),
            r("raise"),
            a("lower"),
            u(" "),
            r("rates"),
            a("yields"),
            u(" by"),
        ];
        assert_eq!(
            group(&segments),
            vec![
                u("to "),
                r("raise rates").with_count(3),
                a("lower yields").with_count(3),
                u(" by"),
            ]
        );
    }

    #[test]
    fn test_whitespace_before_unchanged_text_is_kept() {
        let segments = vec![r("raise"), a("lower"), u(" "), u("rates")];
        assert_eq!(
            group(&segments),
            vec![
                r("raise").with_count(1),
                a("lower").with_count(1),
                u(" "),
                u("rates"),
            ]
        );
    }

    #[test]
    fn test_trailing_whitespace_is_kept() {
        let segments = vec![r("raise"), u("\n\n")];
        assert_eq!(group(&segments), vec![r("raise").with_count(1), u("\n\n")]);
    }

    #[test]
    fn test_leading_whitespace_joins_following_change() {
        let segments = vec![u(" "), a("Moreover.")];
        assert_eq!(
            group(&segments),
            vec![r(" ").with_count(1), a(" Moreover.").with_count(2)]
        );
    }

    #[test]
    fn test_counts_sum_parts() {
        let segments = vec![
            r("a b").with_count(3),
            u(" "),
            r("c").with_count(1),
            a("d").with_count(1),
        ];
        assert_eq!(
            group(&segments),
            vec![r("a b c").with_count(5), a(" d").with_count(2)]
        );
    }

    #[test]
    fn test_idempotent() {
        let inputs = vec![
            vec![],
            vec![u("x")],
            vec![u(" "), u(" "), u("A")],
            vec![r("a"), u(" "), a("b")],
            vec![u("to "), r("raise"), a("lower"), u(" "), r("rates"), u(" by")],
            vec![a("x"), u(""), r("y"), u("\n\n"), u("z"), a("w")],
            vec![r("a").with_count(4), a("b"), u(" "), u(" "), a("c"), u(" ")],
        ];
        for input in inputs {
            let once = group(&input);
            assert_eq!(group(&once), once, "grouping {input:?}");
        }
    }

    #[test]
    fn test_preserves_both_sides() {
        let segments = vec![
            u("The "),
            a("new"),
            u(" "),
            r("old"),
            u(" "),
            u("text"),
            r(" and more"),
        ];
        let grouped = group(&segments);
        assert_eq!(reconstruct(&grouped, Side::Old), reconstruct(&segments, Side::Old));
        assert_eq!(reconstruct(&grouped, Side::New), reconstruct(&segments, Side::New));
    }
}
