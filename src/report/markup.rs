//! HTML markup report rendering.

use super::BlockRenderer;
use super::model::ReportBlock;
use super::units::Scale;

/// Renders the same logical content as the text renderer, as table rows.
pub struct MarkupRenderer {
    scale: Scale,
    table_tags: bool,
}

impl MarkupRenderer {
    pub fn new(scale: Scale, table_tags: bool) -> Self {
        Self { scale, table_tags }
    }
}

impl BlockRenderer for MarkupRenderer {
    fn block_lines(&self, block: &ReportBlock) -> Vec<String> {
        let mut lines = Vec::with_capacity(block.row_count());
        lines.push(format!(
            "<tr><th align=\"left\">{}</th><th align=\"right\">{}</th><th></th></tr>",
            escape(&block.name),
            self.scale.format(block.units),
        ));
        for row in &block.rows {
            lines.push(format!(
                "<tr><td>{}</td><td align=\"right\">{}</td><td align=\"right\">{}%</td></tr>",
                escape(&row.name),
                self.scale.format(row.units),
                row.percent,
            ));
        }
        lines
    }

    fn page_header(&self) -> Vec<String> {
        if self.table_tags {
            vec!["<table>".to_string()]
        } else {
            Vec::new()
        }
    }

    fn page_footer(&self) -> Vec<String> {
        if self.table_tags {
            vec!["</table>".to_string()]
        } else {
            Vec::new()
        }
    }
}

/// Minimal escaping for names landing inside markup cells.
fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
