//! Disk-usage traversal
//!
//! One depth-first pass per root computes cumulative allocated size for
//! every entry, deduplicating hard links and revisits by file identity
//! and honoring the filesystem-boundary policy.
//!
//! - `config` - Per-invocation scan options
//! - `identity` - (device, inode-or-synthetic) identities and platform probes
//! - `visited` - Unified already-counted index
//! - `registry` - Entries big enough to report
//! - `walker` - The recursive scanner itself

mod config;
mod identity;
mod registry;
mod visited;
mod walker;

pub use config::ScanConfig;
pub use identity::{FileIdentity, IdentitySource};
pub use registry::{BigEntry, BigEntryRegistry};
pub use visited::VisitedSet;
pub use walker::{ScanOutcome, Scanner};
