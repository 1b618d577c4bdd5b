//! Hefty - a disk-usage summarizer that reports only the heavy hitters

pub mod filter;
pub mod report;
pub mod scan;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use filter::PathFilter;
pub use report::{
    BlockRenderer, MarkupRenderer, Pager, Report, ReportSink, Scale, StreamSink, TextRenderer,
    print_json, write_report,
};
pub use scan::{BigEntry, BigEntryRegistry, FileIdentity, ScanConfig, ScanOutcome, Scanner};
