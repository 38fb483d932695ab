//! Error types for log scanning

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// The log file exists but could not be opened.
    #[error("Failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading a line failed partway through the log.
    #[error("Error reading log file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A skipped-album path did not contain the library marker exactly
    /// once. This breaks the log format contract, so the whole scan is
    /// aborted rather than dropping the line.
    #[error("Unexpected album path in log: {path}")]
    UnexpectedPath { path: String },
}
