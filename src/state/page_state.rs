//! Outcome definitions for links the spider has claimed
//!
//! Every link taken from a frontier ends in exactly one of these outcomes.
use std::fmt;

/// What happened to a single visited link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageOutcome {
    /// Fetched with a success status and written to disk as text
    PersistedText,

    /// Fetched with a success status and written to disk as raw PDF bytes
    PersistedPdf,

    /// Server answered with a non-success status; no children were taken
    SkippedStatus(u16),

    /// Spreadsheet link; marked visited but never fetched
    SkippedSpreadsheet,
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PersistedText => write!(f, "persisted (text)"),
            Self::PersistedPdf => write!(f, "persisted (pdf)"),
            Self::SkippedStatus(code) => write!(f, "skipped (HTTP {})", code),
            Self::SkippedSpreadsheet => write!(f, "skipped (spreadsheet)"),
        }
    }
}
