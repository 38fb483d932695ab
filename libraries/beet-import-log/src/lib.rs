//! Beet Import Log Scanner
//!
//! This crate parses the log files written by beet's batch imports to
//! determine which album directories were skipped, and why.
//!
//! # Features
//!
//! - Line-by-line classification of the two skip prefixes
//!   (`duplicate-skip`, `skip`)
//! - Album path extraction relative to the library's flac tree
//! - Skip reason mapping with last-entry-wins semantics
//!
//! # Architecture
//!
//! - `scanner`: Log file scanning and album path extraction
//! - `types`: Skip reasons, result mapping, and tallies
//! - `error`: Error types for scan failures

mod error;
mod types;

// Core modules
pub mod scanner;

pub use error::ScanError;
pub use scanner::LogScanner;
pub use types::*;

/// Re-export commonly used types
pub type Result<T> = std::result::Result<T, ScanError>;
