//! Standalone HTML page wrapping the rendered viewer markup

use super::{stats_line, Header};
use fomc_diff_core::{escape_html, render, ComparisonResult, ViewMode};

const STYLE: &str = r#"body { font-family: Georgia, serif; max-width: 72rem; margin: 2rem auto; padding: 0 1rem; line-height: 1.6; color: #1f2933; }
.summary { color: #52606d; }
.side-by-side { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; }
.diff-panel h3 { border-bottom: 1px solid #cbd2d9; padding-bottom: 0.25rem; }
mark.diff-added { background: #d3f9d8; color: #1b5e20; }
mark.diff-removed { background: #ffe3e3; color: #b71c1c; text-decoration: line-through; }
.no-changes { font-style: italic; }"#;

pub fn render_html_page(result: &ComparisonResult, header: Header<'_>, mode: ViewMode) -> String {
    let body = if result.segments.is_empty() {
        r#"<p class="no-changes">Both statements are empty.</p>"#.to_string()
    } else {
        render(&result.segments, mode)
    };

    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<title>FOMC Statement Comparison</title>\n",
            "<style>\n{style}\n</style>\n",
            "</head>\n",
            "<body>\n",
            "<h1>FOMC Statement Comparison</h1>\n",
            "<p class=\"summary\">{summary}</p>\n",
            "<p class=\"summary\">{stats}</p>\n",
            "{body}\n",
            "</body>\n",
            "</html>\n"
        ),
        style = STYLE,
        summary = escape_html(&header.summary()),
        stats = escape_html(&stats_line(result)),
        body = body,
    )
}
