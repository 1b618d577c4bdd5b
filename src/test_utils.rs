//! Test utilities for building disposable directory trees.
//!
//! This module is only compiled for tests (via the `test-utils` feature).

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory tree with files of known sizes.
///
/// Cleaned up automatically when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Path to the tree's root.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a file of `len` bytes, creating parent directories as needed.
    pub fn add_file(&self, path: &str, len: usize) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, vec![b'x'; len]).expect("Failed to write file");
        full_path
    }

    /// Create an empty directory.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Hard-link `target` (relative to the tree) at `link`.
    pub fn add_hard_link(&self, target: &str, link: &str) -> PathBuf {
        let target_path = self.dir.path().join(target);
        let link_path = self.dir.path().join(link);
        if let Some(parent) = link_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::hard_link(&target_path, &link_path).expect("Failed to hard link");
        link_path
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}
