//! Plain-text report rendering.

use super::BlockRenderer;
use super::model::ReportBlock;
use super::units::Scale;

/// Continuation marker for truncated names.
const MARKER: &str = "...";

/// Narrowest usable column: the marker plus at least one name character.
const MIN_WIDTH: usize = MARKER.len() + 1;

/// Fixed-width text renderer.
///
/// Directory names are truncated from the right; child names from the
/// left, preserving the tail, which usually carries the most specific
/// path component.
pub struct TextRenderer {
    width: usize,
    scale: Scale,
}

impl TextRenderer {
    pub fn new(width: usize, scale: Scale) -> Self {
        Self {
            width: width.max(MIN_WIDTH),
            scale,
        }
    }
}

impl BlockRenderer for TextRenderer {
    fn block_lines(&self, block: &ReportBlock) -> Vec<String> {
        let mut lines = Vec::with_capacity(block.row_count());
        lines.push(format!(
            "{:<width$}  {:>10}",
            truncate_right(&block.name, self.width),
            self.scale.format(block.units),
            width = self.width
        ));
        for row in &block.rows {
            lines.push(format!(
                "  {:<width$}  {:>10}  {:>3}%",
                truncate_left(&row.name, self.width),
                self.scale.format(row.units),
                row.percent,
                width = self.width
            ));
        }
        lines
    }
}

/// Truncate from the right, keeping the leading characters.
///
/// Character counts, not bytes, so multibyte names never split.
fn truncate_right(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let keep = width.saturating_sub(MARKER.len());
    let head: String = name.chars().take(keep).collect();
    format!("{head}{MARKER}")
}

/// Truncate from the left, keeping the trailing characters.
fn truncate_left(name: &str, width: usize) -> String {
    let len = name.chars().count();
    if len <= width {
        return name.to_string();
    }
    let keep = width.saturating_sub(MARKER.len());
    let tail: String = name.chars().skip(len - keep).collect();
    format!("{MARKER}{tail}")
}
