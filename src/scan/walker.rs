//! Recursive scan computing cumulative disk usage per entry.

use std::fs;
use std::io;
use std::path::Path;

use crate::filter::PathFilter;

use super::config::ScanConfig;
use super::identity::{self, FileIdentity, IdentitySource};
use super::registry::{BigEntry, BigEntryRegistry};
use super::visited::VisitedSet;

/// Virtual filesystem roots that are pre-marked as visited so the scan
/// never descends into them; process pseudo-files report meaningless
/// sizes.
#[cfg(unix)]
const VIRTUAL_ROOTS: &[&str] = &["/proc"];

#[cfg(not(unix))]
const VIRTUAL_ROOTS: &[&str] = &[];

/// Result of scanning one entry: its cumulative size and identity.
///
/// Size is returned even below the threshold so ancestors can fold it
/// into their own sums; callers that only need the size ignore the
/// identity.
#[derive(Debug, Clone, Copy)]
pub struct ScanOutcome {
    /// Cumulative size in half-kilobyte allocation units.
    pub units: u64,
    pub identity: FileIdentity,
}

/// Depth-first scanner.
///
/// Owns all per-run state (visited set, big-entry registry, synthetic
/// identity counter), so every test can build its own instance. Scanning
/// is strictly sequential; siblings rely on earlier entries already
/// being marked visited.
pub struct Scanner {
    config: ScanConfig,
    filter: PathFilter,
    visited: VisitedSet,
    registry: BigEntryRegistry,
    identities: IdentitySource,
}

impl Scanner {
    pub fn new(config: ScanConfig, filter: PathFilter) -> Self {
        let mut scanner = Self {
            config,
            filter,
            visited: VisitedSet::new(),
            registry: BigEntryRegistry::new(),
            identities: IdentitySource::new(),
        };
        scanner.mask_virtual_roots();
        scanner
    }

    /// Big entries collected so far.
    pub fn registry(&self) -> &BigEntryRegistry {
        &self.registry
    }

    /// Scan one root argument with a fresh filesystem boundary.
    ///
    /// An unreadable root is the one fatal condition; everything below a
    /// root fails soft. The stat here surfaces the error before the
    /// soft-skipping recursion would swallow it.
    pub fn scan_root(&mut self, root: &Path) -> io::Result<()> {
        if self.config.follow_symlinks {
            fs::metadata(root)?;
        } else {
            fs::symlink_metadata(root)?;
        }
        self.scan_tree(root, None);
        Ok(())
    }

    /// Scan one entry, returning its cumulative size and identity.
    ///
    /// Returns `None` when the entry is skipped: stat failure, device
    /// node, foreign filesystem, or an identity already counted.
    pub fn scan_tree(&mut self, path: &Path, boundary: Option<u64>) -> Option<ScanOutcome> {
        let meta = if self.config.follow_symlinks {
            fs::metadata(path).ok()?
        } else {
            fs::symlink_metadata(path).ok()?
        };
        if identity::is_device_node(&meta) {
            return None;
        }

        let device = identity::device_id(&meta);
        let boundary = boundary.unwrap_or(device);
        if device != boundary && !self.config.cross_filesystems {
            return None;
        }

        let id = FileIdentity {
            device,
            number: self.identities.number_for(identity::inode_number(&meta)),
        };
        // First visit wins: hard links and re-reached directories are
        // counted exactly once.
        if !self.visited.insert(id) {
            return None;
        }

        let threshold = self.config.threshold_units();
        let mut units = identity::allocation_units(&meta);
        let mut children = Vec::new();

        if meta.is_dir() {
            // An unreadable directory still counts its own size, as a leaf.
            if let Ok(entries) = fs::read_dir(path) {
                let mut entries: Vec<_> = entries.filter_map(|e| e.ok()).collect();
                entries.sort_by_key(|e| e.file_name());

                for entry in entries {
                    let child_path = entry.path();
                    if !self.filter.include(&child_path) {
                        continue;
                    }
                    if let Some(child) = self.scan_tree(&child_path, Some(boundary)) {
                        units += child.units;
                        if child.units > threshold {
                            children.push(child.identity);
                        }
                    }
                }
            }
        }

        if units > threshold {
            self.registry.insert(
                id,
                BigEntry {
                    units,
                    name: path.display().to_string(),
                    children,
                },
            );
        }

        Some(ScanOutcome {
            units,
            identity: id,
        })
    }

    fn mask_virtual_roots(&mut self) {
        for root in VIRTUAL_ROOTS {
            if let Ok(meta) = fs::symlink_metadata(root) {
                let id = FileIdentity {
                    device: identity::device_id(&meta),
                    number: self
                        .identities
                        .number_for(identity::inode_number(&meta)),
                };
                self.visited.insert(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTree;

    fn scanner(threshold_kb: u64) -> Scanner {
        Scanner::new(
            ScanConfig {
                threshold_kb,
                ..Default::default()
            },
            PathFilter::default(),
        )
    }

    #[cfg(unix)]
    fn units_of(path: &Path) -> u64 {
        use std::os::unix::fs::MetadataExt;
        fs::symlink_metadata(path).expect("stat fixture").blocks()
    }

    #[test]
    fn test_small_tree_produces_no_big_entries() {
        let tree = TestTree::new();
        tree.add_file("a.bin", 4 * 1024);
        tree.add_file("sub/b.bin", 4 * 1024);

        let mut scanner = scanner(10 * 1024);
        let outcome = scanner.scan_tree(tree.path(), None).expect("scan root");
        assert!(outcome.units > 0);
        assert!(scanner.registry().is_empty());
    }

    #[test]
    fn test_big_file_gets_entry_its_parent_lists() {
        let tree = TestTree::new();
        let file = tree.add_file("big.bin", 512 * 1024);

        let mut scanner = scanner(100);
        let outcome = scanner.scan_tree(tree.path(), None).expect("scan root");

        let root_entry = scanner
            .registry()
            .get(&outcome.identity)
            .expect("root should be big");
        assert_eq!(root_entry.children.len(), 1);
        let child = scanner
            .registry()
            .get(&root_entry.children[0])
            .expect("child entry");
        assert_eq!(child.name, file.display().to_string());
        assert!(child.children.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_sum_equals_self_plus_children() {
        let tree = TestTree::new();
        let a = tree.add_file("a.bin", 300 * 1024);
        let c = tree.add_file("sub/c.bin", 400 * 1024);
        let sub = tree.path().join("sub");

        let mut scanner = scanner(1);
        let outcome = scanner.scan_tree(tree.path(), None).expect("scan root");

        let expected =
            units_of(tree.path()) + units_of(&a) + units_of(&sub) + units_of(&c);
        assert_eq!(outcome.units, expected);
    }

    #[cfg(unix)]
    #[test]
    fn test_hard_links_counted_once() {
        let tree = TestTree::new();
        let original = tree.add_file("data/a.bin", 200 * 1024);
        tree.add_hard_link("data/a.bin", "data/b.bin");
        let data = tree.path().join("data");

        let mut scanner = scanner(1);
        let outcome = scanner.scan_tree(&data, None).expect("scan data dir");
        assert_eq!(
            outcome.units,
            units_of(&data) + units_of(&original),
            "second link must not contribute"
        );
    }

    #[test]
    fn test_foreign_device_is_skipped() {
        let tree = TestTree::new();
        tree.add_file("a.bin", 64 * 1024);

        // A boundary no real device will match: the whole tree is on the
        // wrong side of the filesystem boundary.
        let mut scanner = scanner(1);
        assert!(scanner.scan_tree(tree.path(), Some(u64::MAX)).is_none());
        assert!(
            scanner.registry().is_empty(),
            "skipped entries must not be reported"
        );
    }

    #[test]
    fn test_cross_filesystems_flag_permits_foreign_device() {
        let tree = TestTree::new();
        tree.add_file("a.bin", 64 * 1024);

        let mut scanner = Scanner::new(
            ScanConfig {
                threshold_kb: 1,
                cross_filesystems: true,
                ..Default::default()
            },
            PathFilter::default(),
        );
        let outcome = scanner
            .scan_tree(tree.path(), Some(u64::MAX))
            .expect("crossing allowed");
        assert!(outcome.units > 0);
        assert!(!scanner.registry().is_empty());
    }

    #[test]
    fn test_revisit_is_skipped() {
        let tree = TestTree::new();
        tree.add_file("a.bin", 1024);

        let mut scanner = scanner(1);
        assert!(scanner.scan_tree(tree.path(), None).is_some());
        assert!(scanner.scan_tree(tree.path(), None).is_none());
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let tree = TestTree::new();
        let mut scanner = scanner(1);
        assert!(scanner.scan_root(&tree.path().join("nope")).is_err());
        assert!(scanner.scan_root(tree.path()).is_ok());
    }

    #[test]
    fn test_filter_prunes_children_from_sums() {
        let tree = TestTree::new();
        tree.add_file("keep/a.bin", 64 * 1024);
        tree.add_file("skip/b.bin", 64 * 1024);

        let filter = PathFilter::from_patterns(&[], &["skip".to_string()]).expect("filter");
        let mut scanner = Scanner::new(
            ScanConfig {
                threshold_kb: 1,
                ..Default::default()
            },
            filter,
        );
        let with_filter = scanner.scan_tree(tree.path(), None).expect("scan").units;

        let mut unfiltered = Scanner::new(
            ScanConfig {
                threshold_kb: 1,
                ..Default::default()
            },
            PathFilter::default(),
        );
        let all = unfiltered.scan_tree(tree.path(), None).expect("scan").units;

        assert!(with_filter < all, "excluded subtree must not be counted");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_not_followed_by_default() {
        let tree = TestTree::new();
        tree.add_file("real/big.bin", 256 * 1024);
        std::os::unix::fs::symlink(tree.path().join("real"), tree.path().join("alias"))
            .expect("symlink");

        let mut scanner = scanner(1);
        let outcome = scanner.scan_tree(tree.path(), None).expect("scan root");
        let real_units =
            units_of(&tree.path().join("real")) + units_of(&tree.path().join("real/big.bin"));
        // The alias contributes only the link object itself.
        assert!(outcome.units < 2 * real_units);
    }

    #[cfg(unix)]
    #[test]
    fn test_follow_symlinks_counts_target_once() {
        let tree = TestTree::new();
        let file = tree.add_file("real/big.bin", 256 * 1024);
        let real = tree.path().join("real");
        std::os::unix::fs::symlink(&real, tree.path().join("alias")).expect("symlink");

        let mut scanner = Scanner::new(
            ScanConfig {
                threshold_kb: 1,
                follow_symlinks: true,
                ..Default::default()
            },
            PathFilter::default(),
        );
        let outcome = scanner.scan_tree(tree.path(), None).expect("scan root");

        // Whichever name reaches the target first counts it; the other
        // hits the revisit check, so the target appears exactly once.
        let expected = units_of(tree.path()) + units_of(&real) + units_of(&file);
        assert_eq!(outcome.units, expected);
    }
}
