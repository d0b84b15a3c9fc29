//! Side-by-side view - the previous and current statement as stacked panels

use super::{paint_all, stats_line, Header, Painter, Source};
use fomc_diff_core::{ComparisonResult, Side};

fn panel(title: &str, source: &Source, body: String, painter: &Painter) -> String {
    let heading = format!("{title}: {}", source.label);
    let rule = "-".repeat(heading.chars().count());
    format!("{}\n{rule}\n{body}\n", painter.heading(&heading))
}

pub fn render_side_by_side(
    result: &ComparisonResult,
    header: Header<'_>,
    painter: &Painter,
) -> String {
    let side = |side: Side| {
        paint_all(
            painter,
            result.segments.iter().filter(|s| s.belongs_to(side)),
        )
    };

    let mut out = String::new();
    out.push_str(&painter.heading(&header.summary()));
    out.push('\n');
    out.push_str(&stats_line(result));
    out.push_str("\n\n");
    out.push_str(&panel("Previous Statement", header.old, side(Side::Old), painter));
    out.push('\n');
    out.push_str(&panel("Current Statement", header.new, side(Side::New), painter));
    out
}
