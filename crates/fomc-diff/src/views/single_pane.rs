//! Single pane view - one text with removals and additions inline

use super::{paint_all, stats_line, Header, Painter};
use fomc_diff_core::ComparisonResult;

pub fn render_single_pane(
    result: &ComparisonResult,
    header: Header<'_>,
    painter: &Painter,
) -> String {
    let mut out = String::new();
    out.push_str(&painter.heading(&header.summary()));
    out.push('\n');
    out.push_str(&stats_line(result));
    out.push_str("\n\n");
    out.push_str(&paint_all(painter, &result.segments));
    out.push('\n');
    out
}
