//! Report formatting and output
//!
//! Turns a completed scan into ordered output:
//!
//! - `model` - Sorted blocks and rows built from the big-entry registry
//! - `units` - KB/MB/GB auto-scaling
//! - `text` - Fixed-width plain-text rendering
//! - `markup` - HTML table-row rendering
//! - `pager` - Stream and row-budgeted page-file sinks
//! - `json` - JSON output

mod json;
mod markup;
mod model;
mod pager;
mod text;
mod units;

pub use json::print_json;
pub use markup::MarkupRenderer;
pub use model::{Report, ReportBlock, ReportRow};
pub use pager::{Pager, ReportSink, StreamSink};
pub use text::TextRenderer;
pub use units::Scale;

use std::io;

/// Renders directory blocks into lines; sinks decide where lines land.
pub trait BlockRenderer {
    fn block_lines(&self, block: &ReportBlock) -> Vec<String>;

    /// Lines opening every page (or the whole stream).
    fn page_header(&self) -> Vec<String> {
        Vec::new()
    }

    /// Lines closing every page.
    fn page_footer(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Drive a report through a renderer into a sink, block by block.
pub fn write_report<R: BlockRenderer, S: ReportSink>(
    report: &Report,
    renderer: &R,
    sink: &mut S,
) -> io::Result<()> {
    for block in &report.blocks {
        sink.write_block(&renderer.block_lines(block))?;
    }
    sink.finish()
}
