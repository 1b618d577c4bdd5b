//! Size-unit auto-scaling.

/// Display scale, chosen once per report from the effective threshold.
///
/// A small threshold means the interesting numbers are small, so they
/// render in kilobytes; a huge threshold pushes everything to gigabytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Kb,
    Mb,
    Gb,
}

impl Scale {
    /// Pick a scale for a threshold expressed in half-kilobyte units.
    pub fn for_threshold(threshold_units: u64) -> Self {
        if threshold_units < 1_000 {
            Scale::Kb
        } else if threshold_units < 1_000_000 {
            Scale::Mb
        } else {
            Scale::Gb
        }
    }

    /// Half-kilobyte units per displayed unit.
    pub fn divisor(self) -> u64 {
        match self {
            Scale::Kb => 2,
            Scale::Mb => 2_048,
            Scale::Gb => 2_097_152,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Scale::Kb => "KB",
            Scale::Mb => "MB",
            Scale::Gb => "GB",
        }
    }

    /// Render a unit count at this scale, e.g. `12 MB`.
    pub fn format(self, units: u64) -> String {
        format!("{} {}", units / self.divisor(), self.label())
    }
}
