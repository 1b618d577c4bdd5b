//! Unified "already counted" index.

use std::collections::{HashMap, HashSet};

use super::identity::FileIdentity;

/// Identity numbers below this ceiling go into a per-device bitmap;
/// larger ones fall back to a hash set. Keeps dedup of the many small
/// inode numbers cheap without storing a record per file.
const BITMAP_CEILING: u64 = 1 << 24;

/// Records every identity the scanner has visited, so hard links and
/// re-reached directories are counted exactly once.
#[derive(Debug, Default)]
pub struct VisitedSet {
    small: HashMap<u64, Bitmap>,
    large: HashSet<FileIdentity>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an identity as seen. Returns false if it was already marked.
    pub fn insert(&mut self, id: FileIdentity) -> bool {
        if id.number < BITMAP_CEILING {
            self.small
                .entry(id.device)
                .or_default()
                .set(id.number as usize)
        } else {
            self.large.insert(id)
        }
    }

    pub fn contains(&self, id: &FileIdentity) -> bool {
        if id.number < BITMAP_CEILING {
            self.small
                .get(&id.device)
                .is_some_and(|b| b.get(id.number as usize))
        } else {
            self.large.contains(id)
        }
    }
}

/// Lazily grown word-indexed bitmap.
#[derive(Debug, Default)]
struct Bitmap {
    words: Vec<u64>,
}

impl Bitmap {
    /// Set a bit, growing as needed. Returns false if it was already set.
    fn set(&mut self, bit: usize) -> bool {
        let word = bit / 64;
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        let mask = 1u64 << (bit % 64);
        let was_set = self.words[word] & mask != 0;
        self.words[word] |= mask;
        !was_set
    }

    fn get(&self, bit: usize) -> bool {
        self.words
            .get(bit / 64)
            .is_some_and(|w| w & (1u64 << (bit % 64)) != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(device: u64, number: u64) -> FileIdentity {
        FileIdentity { device, number }
    }

    #[test]
    fn test_insert_then_contains() {
        let mut seen = VisitedSet::new();
        assert!(!seen.contains(&id(1, 100)));
        assert!(seen.insert(id(1, 100)));
        assert!(seen.contains(&id(1, 100)));
    }

    #[test]
    fn test_second_insert_reports_already_seen() {
        let mut seen = VisitedSet::new();
        assert!(seen.insert(id(1, 7)));
        assert!(!seen.insert(id(1, 7)));
    }

    #[test]
    fn test_devices_are_independent() {
        let mut seen = VisitedSet::new();
        seen.insert(id(1, 7));
        assert!(!seen.contains(&id(2, 7)));
    }

    #[test]
    fn test_large_numbers_bypass_bitmap() {
        let mut seen = VisitedSet::new();
        let big = id(1, BITMAP_CEILING + 12345);
        assert!(seen.insert(big));
        assert!(seen.contains(&big));
        assert!(!seen.insert(big));
    }

    #[test]
    fn test_bitmap_word_boundaries() {
        let mut bitmap = Bitmap::default();
        for bit in [0, 63, 64, 65, 127, 128] {
            assert!(!bitmap.get(bit));
            assert!(bitmap.set(bit));
            assert!(bitmap.get(bit));
        }
        // Neighbors untouched
        assert!(!bitmap.get(1));
        assert!(!bitmap.get(62));
        assert!(!bitmap.get(126));
    }
}
