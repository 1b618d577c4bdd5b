//! Scan configuration.

/// Options fixed for the duration of one invocation.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Minimum reportable cumulative size, in kilobytes.
    pub threshold_kb: u64,
    /// Descend onto devices other than each root's.
    pub cross_filesystems: bool,
    /// Stat through symlinks instead of counting the links themselves.
    pub follow_symlinks: bool,
}

impl ScanConfig {
    /// Threshold in half-kilobyte allocation units.
    pub fn threshold_units(&self) -> u64 {
        self.threshold_kb * 2
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threshold_kb: 10 * 1024, // 10 MB
            cross_filesystems: false,
            follow_symlinks: false,
        }
    }
}
