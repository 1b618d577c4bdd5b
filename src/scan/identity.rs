//! File identity resolution for hard-link and revisit deduplication.

use std::fs::Metadata;

/// A (device, inode-or-synthetic) pair naming a filesystem object.
///
/// Two directory entries with the same identity are the same underlying
/// object: hard links to one file, or one directory reached twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileIdentity {
    pub device: u64,
    pub number: u64,
}

/// Source of synthetic identity numbers for platforms (or filesystems)
/// that report no usable inode number.
///
/// Numbers start above zero and increase monotonically, so every object
/// still gets a unique identity within a run.
#[derive(Debug)]
pub struct IdentitySource {
    next: u64,
}

impl IdentitySource {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Use the reported inode number when there is one, otherwise hand
    /// out the next synthetic number.
    pub fn number_for(&mut self, reported: Option<u64>) -> u64 {
        match reported {
            Some(n) => n,
            None => {
                let n = self.next;
                self.next += 1;
                n
            }
        }
    }
}

impl Default for IdentitySource {
    fn default() -> Self {
        Self::new()
    }
}

/// Device ID of a filesystem object.
#[cfg(unix)]
pub fn device_id(meta: &Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    meta.dev()
}

#[cfg(not(unix))]
pub fn device_id(_meta: &Metadata) -> u64 {
    0
}

/// Inode number, if the platform reports a usable one.
#[cfg(unix)]
pub fn inode_number(meta: &Metadata) -> Option<u64> {
    use std::os::unix::fs::MetadataExt;
    // Some virtual filesystems report inode 0; treat it as absent.
    match meta.ino() {
        0 => None,
        n => Some(n),
    }
}

#[cfg(not(unix))]
pub fn inode_number(_meta: &Metadata) -> Option<u64> {
    None
}

/// Allocated size in half-kilobyte units.
///
/// Unix reports 512-byte blocks directly; elsewhere the byte length is
/// rounded up to whole kilobytes and doubled.
#[cfg(unix)]
pub fn allocation_units(meta: &Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    meta.blocks()
}

#[cfg(not(unix))]
pub fn allocation_units(meta: &Metadata) -> u64 {
    meta.len().div_ceil(1024) * 2
}

/// Block and character devices have no meaningful size to count.
#[cfg(unix)]
pub fn is_device_node(meta: &Metadata) -> bool {
    use std::os::unix::fs::FileTypeExt;
    let ft = meta.file_type();
    ft.is_block_device() || ft.is_char_device()
}

#[cfg(not(unix))]
pub fn is_device_node(_meta: &Metadata) -> bool {
    false
}
