//! fomc-diff core - normalize, diff, group and render FOMC statements
//!
//! The comparison pipeline is a chain of pure functions:
//! [`normalize`] both texts, [`diff`] them into tagged [`Segment`]s at word or
//! sentence granularity, [`group`] the segments into readable change blocks,
//! and [`render`] the result as HTML. [`compare`] runs the first three steps.
//!
//! ```
//! use fomc_diff_core::{compare, render, Granularity, SegmentKind, ViewMode};
//!
//! let result = compare(
//!     "The Committee decided to raise rates.",
//!     "The Committee decided to lower rates.",
//!     Granularity::Word,
//! );
//! let removed: Vec<_> = result
//!     .segments
//!     .iter()
//!     .filter(|s| s.kind == SegmentKind::Removed)
//!     .map(|s| s.text.as_str())
//!     .collect();
//! assert_eq!(removed, ["raise"]);
//!
//! let html = render(&result.segments, ViewMode::Unified);
//! assert!(html.contains(r#"<mark class="diff-added">lower</mark>"#));
//! ```

pub mod diff;
pub mod group;
pub mod normalize;
pub mod render;
pub mod segment;
pub mod statement;
pub mod store;

pub use diff::{
    compare, count_units, diff, tokenize, ComparisonResult, ComparisonStats, DiffEngine,
    Granularity,
};
pub use group::group;
pub use normalize::normalize;
pub use render::{escape_html, highlight, render, render_side, render_view, RenderedView, ViewMode};
pub use segment::{reconstruct, Segment, SegmentKind, Side};
pub use statement::{format_date, statement_id, Statement, StatementType, UnknownStatementType};
pub use store::{parse_catalog, parse_markdown, StatementStore, StoreError};
