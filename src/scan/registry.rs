//! Registry of entries big enough to report.

use std::collections::HashMap;

use super::identity::FileIdentity;

/// A file or directory whose cumulative allocated size exceeded the
/// threshold, plus the children that did so in their own right.
#[derive(Debug, Clone)]
pub struct BigEntry {
    /// Cumulative size in half-kilobyte allocation units.
    pub units: u64,
    /// Display name: the path as it was scanned.
    pub name: String,
    /// Big children, in the order they were encountered.
    pub children: Vec<FileIdentity>,
}

/// All big entries found during a scan, keyed by identity.
///
/// An entry is inserted once, the first (and only) time its identity is
/// scanned; the visited-set dedup guarantees there is no second time.
#[derive(Debug, Default)]
pub struct BigEntryRegistry {
    entries: HashMap<FileIdentity, BigEntry>,
    widest_name: usize,
}

impl BigEntryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: FileIdentity, entry: BigEntry) {
        self.widest_name = self.widest_name.max(entry.name.chars().count());
        self.entries.insert(id, entry);
    }

    pub fn get(&self, id: &FileIdentity) -> Option<&BigEntry> {
        self.entries.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FileIdentity, &BigEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest display name recorded, in characters. Drives the text
    /// report's column width.
    pub fn widest_name(&self) -> usize {
        self.widest_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(number: u64) -> FileIdentity {
        FileIdentity { device: 1, number }
    }

    fn entry(name: &str, units: u64) -> BigEntry {
        BigEntry {
            units,
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut registry = BigEntryRegistry::new();
        registry.insert(id(1), entry("/var/log", 5000));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&id(1)).map(|e| e.units), Some(5000));
        assert!(registry.get(&id(2)).is_none());
    }

    #[test]
    fn test_widest_name_tracks_maximum() {
        let mut registry = BigEntryRegistry::new();
        registry.insert(id(1), entry("/a", 1));
        registry.insert(id(2), entry("/a/very/long/path", 1));
        registry.insert(id(3), entry("/b", 1));
        assert_eq!(registry.widest_name(), "/a/very/long/path".len());
    }

    #[test]
    fn test_widest_name_counts_chars_not_bytes() {
        let mut registry = BigEntryRegistry::new();
        registry.insert(id(1), entry("/données", 1));
        assert_eq!(registry.widest_name(), 8);
    }
}
