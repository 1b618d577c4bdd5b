//! Path inclusion and exclusion by regular expression.

use std::path::Path;

use regex::Regex;

/// Include/exclude filter applied to candidate child paths.
///
/// With a non-empty include list a path must match at least one include
/// pattern; an exclude match then rejects it regardless. Matching is
/// unanchored substring matching unless a pattern anchors itself.
#[derive(Debug, Default)]
pub struct PathFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl PathFilter {
    pub fn new(include: Vec<Regex>, exclude: Vec<Regex>) -> Self {
        Self { include, exclude }
    }

    /// Compile pattern lists as given on the command line.
    pub fn from_patterns(include: &[String], exclude: &[String]) -> Result<Self, regex::Error> {
        let compile = |patterns: &[String]| -> Result<Vec<Regex>, regex::Error> {
            patterns.iter().map(|p| Regex::new(p)).collect()
        };
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    /// Whether a path should be descended into and counted.
    pub fn include(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        if !self.include.is_empty() && !self.include.iter().any(|re| re.is_match(&text)) {
            return false;
        }
        !self.exclude.iter().any(|re| re.is_match(&text))
    }
}
