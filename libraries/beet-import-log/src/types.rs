//! Skip reasons and result mappings for import log scans

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Why an album directory was not imported during a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    /// The album was already in the library (duplicate detection)
    #[serde(rename = "duplicate")]
    Duplicate,

    /// No sufficiently confident match was found for the album
    #[serde(rename = "no strong match")]
    NoStrongMatch,
}

impl SkipReason {
    /// The reason string as consumers see it
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::Duplicate => "duplicate",
            SkipReason::NoStrongMatch => "no strong match",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping from album path (relative to the library's flac tree) to the
/// reason it was skipped
///
/// When the same album appears on multiple log lines, the last line wins.
pub type SkipMap = HashMap<String, SkipReason>;

/// Per-reason tallies from a log scan
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SkipStats {
    pub duplicates: usize,
    pub no_strong_match: usize,
}

impl SkipStats {
    /// Count the reasons recorded in a skip map
    pub fn tally(skipped: &SkipMap) -> Self {
        let mut stats = Self::default();
        for reason in skipped.values() {
            match reason {
                SkipReason::Duplicate => stats.duplicates += 1,
                SkipReason::NoStrongMatch => stats.no_strong_match += 1,
            }
        }
        stats
    }

    /// Total number of skipped albums
    pub fn total(&self) -> usize {
        self.duplicates + self.no_strong_match
    }
}
