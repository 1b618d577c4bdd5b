//! Report construction from a completed scan.

use serde::Serialize;

use crate::scan::BigEntryRegistry;

/// One reportable child of a big directory.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub name: String,
    /// Cumulative size in half-kilobyte allocation units.
    pub units: u64,
    /// Share of the parent's cumulative size, in whole percent.
    pub percent: u64,
}

/// A big directory together with its big children.
#[derive(Debug, Clone, Serialize)]
pub struct ReportBlock {
    pub name: String,
    pub units: u64,
    pub rows: Vec<ReportRow>,
}

impl ReportBlock {
    /// Lines this block occupies on a page: the header plus one per row.
    pub fn row_count(&self) -> usize {
        1 + self.rows.len()
    }
}

/// The full report, blocks ordered by descending size.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub blocks: Vec<ReportBlock>,
    /// Longest display name seen during the scan, in characters.
    #[serde(skip)]
    pub widest_name: usize,
}

impl Report {
    /// Build from the registry. Only entries with at least one big child
    /// produce a block; everything else appears solely as a row under
    /// its parent.
    pub fn from_registry(registry: &BigEntryRegistry) -> Self {
        let mut blocks: Vec<ReportBlock> = registry
            .iter()
            .filter(|(_, entry)| !entry.children.is_empty())
            .map(|(_, entry)| {
                let mut rows: Vec<ReportRow> = entry
                    .children
                    .iter()
                    .filter_map(|id| registry.get(id))
                    .map(|child| ReportRow {
                        name: child.name.clone(),
                        units: child.units,
                        percent: child.units * 100 / entry.units.max(1),
                    })
                    .collect();
                rows.sort_by(|a, b| b.units.cmp(&a.units));
                ReportBlock {
                    name: entry.name.clone(),
                    units: entry.units,
                    rows,
                }
            })
            .collect();
        blocks.sort_by(|a, b| b.units.cmp(&a.units).then_with(|| a.name.cmp(&b.name)));

        Self {
            blocks,
            widest_name: registry.widest_name(),
        }
    }
}
