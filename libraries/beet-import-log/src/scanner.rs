//! Import log scanning for skipped albums
//!
//! beet writes one log line per album it touches during a batch import.
//! Two prefixes mark albums that were not imported:
//!
//! ```text
//! duplicate-skip /music/files/flac/Artist - Album
//! skip /music/files/flac/Artist - Album; already in library
//! ```
//!
//! Anything else (`added ...` and friends) is unrelated and ignored.
//! The text after a `;` is a human-readable annotation or multi-disc
//! continuation and is not part of the album path.

use crate::{Result, ScanError, SkipMap, SkipReason, SkipStats};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Log line prefix for albums rejected by duplicate detection
const DUPLICATE_SKIP_PREFIX: &str = "duplicate-skip ";

/// Log line prefix for albums without a strong match
const SKIP_PREFIX: &str = "skip ";

/// Path segment separating the library prefix from album directories
const ALBUM_TREE_MARKER: &str = "/files/flac/";

/// Scanner for beet import logs
#[derive(Debug, Clone)]
pub struct LogScanner {
    /// Base directory the imported albums live under. Anchors the
    /// expected path shape; extraction itself keys off the
    /// `/files/flac/` marker.
    albums_dir: String,
}

impl LogScanner {
    /// Create a new log scanner rooted at `albums_dir`
    pub fn new(albums_dir: impl Into<String>) -> Self {
        Self {
            albums_dir: clean_path(&albums_dir.into()),
        }
    }

    /// The normalized base directory this scanner was created with
    pub fn albums_dir(&self) -> &str {
        &self.albums_dir
    }

    /// Scan a log file to identify which albums from a batch were
    /// skipped, and why.
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the import log written by the batch
    ///
    /// # Returns
    ///
    /// Map from album path (relative to the library's flac tree) to
    /// skip reason. A missing log file means the batch skipped nothing
    /// and yields an empty map, not an error.
    pub fn scan_skipped_albums(&self, log_file: impl AsRef<Path>) -> Result<SkipMap> {
        let log_file = log_file.as_ref();

        let file = match File::open(log_file) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                // No log file means no skips
                tracing::debug!("No import log at {}, nothing skipped", log_file.display());
                return Ok(SkipMap::new());
            }
            Err(err) => {
                return Err(ScanError::Open {
                    path: log_file.to_path_buf(),
                    source: err,
                });
            }
        };

        let mut skipped = SkipMap::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|err| ScanError::Read {
                path: log_file.to_path_buf(),
                source: err,
            })?;

            let Some((reason, rest)) = classify_line(&line) else {
                continue;
            };

            let album = extract_album_path(rest)?;
            tracing::debug!("Album {:?} skipped: {}", album, reason);
            skipped.insert(album, reason);
        }

        let stats = SkipStats::tally(&skipped);
        tracing::debug!(
            "Scanned {}: {} skipped as duplicates, {} without a strong match",
            log_file.display(),
            stats.duplicates,
            stats.no_strong_match
        );

        Ok(skipped)
    }
}

/// Classify a log line by prefix
///
/// Returns the skip reason and the remainder of the line, or `None` for
/// unrelated lines.
fn classify_line(line: &str) -> Option<(SkipReason, &str)> {
    if let Some(rest) = line.strip_prefix(DUPLICATE_SKIP_PREFIX) {
        Some((SkipReason::Duplicate, rest))
    } else if let Some(rest) = line.strip_prefix(SKIP_PREFIX) {
        Some((SkipReason::NoStrongMatch, rest))
    } else {
        None
    }
}

/// Extract the album path relative to the library's flac tree
///
/// The raw remainder of a skip line is truncated at the first `;` and
/// trimmed, then normalized before splitting on the `/files/flac/`
/// marker. The marker must occur exactly once; anything else violates
/// the log format contract and fails the whole scan.
fn extract_album_path(raw: &str) -> Result<String> {
    // Strip annotations and multi-disc continuations after semicolons
    let path = match raw.find(';') {
        Some(idx) => &raw[..idx],
        None => raw,
    };
    let path = clean_path(path.trim());

    let parts: Vec<&str> = path.split(ALBUM_TREE_MARKER).collect();
    if parts.len() != 2 {
        return Err(ScanError::UnexpectedPath { path });
    }

    Ok(parts[1].to_string())
}

/// Lexically normalize a `/`-separated path
///
/// Collapses redundant separators and resolves `.` and `..` segments.
/// Log paths are `/`-separated regardless of the host platform, so
/// this works on the string form directly.
fn clean_path(path: &str) -> String {
    let absolute = path.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if let Some(last) = segments.last() {
                    if *last == ".." {
                        segments.push("..");
                    } else {
                        segments.pop();
                    }
                } else if !absolute {
                    segments.push("..");
                }
            }
            segment => segments.push(segment),
        }
    }

    let cleaned = segments.join("/");
    if absolute {
        format!("/{}", cleaned)
    } else if cleaned.is_empty() {
        ".".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_line() {
        assert_eq!(
            classify_line("duplicate-skip /x/files/flac/album"),
            Some((SkipReason::Duplicate, "/x/files/flac/album"))
        );
        assert_eq!(
            classify_line("skip /x/files/flac/album; no match"),
            Some((SkipReason::NoStrongMatch, "/x/files/flac/album; no match"))
        );
        assert_eq!(classify_line("added /x/files/flac/album"), None);
        assert_eq!(classify_line(""), None);
    }

    #[test]
    fn test_classify_line_requires_trailing_space() {
        assert_eq!(classify_line("skip"), None);
        assert_eq!(classify_line("skipped /x/files/flac/album"), None);
        assert_eq!(classify_line("duplicate-skipped /x/files/flac/album"), None);
    }

    #[test]
    fn test_extract_album_path() {
        assert_eq!(
            extract_album_path("/x/files/flac/album1").unwrap(),
            "album1"
        );
        assert_eq!(
            extract_album_path("/x/files/flac/album1; already in library").unwrap(),
            "album1"
        );
        assert_eq!(
            extract_album_path("  /x/files/flac/album with spaces  ").unwrap(),
            "album with spaces"
        );
    }

    #[test]
    fn test_extract_album_path_normalizes_first() {
        // Redundant separators and dot segments disappear before the split
        assert_eq!(
            extract_album_path("/x//files/flac/./album1/").unwrap(),
            "album1"
        );
        assert_eq!(
            extract_album_path("/x/files//flac/album1").unwrap(),
            "album1"
        );
        assert_eq!(
            extract_album_path("/x/extra/../files/flac/album1").unwrap(),
            "album1"
        );
    }

    #[test]
    fn test_extract_album_path_semicolon_wins_over_marker() {
        // A marker hiding in the annotation does not count
        assert_eq!(
            extract_album_path("/x/files/flac/album1; see /x/files/flac/album2").unwrap(),
            "album1"
        );
    }

    #[test]
    fn test_extract_album_path_missing_marker() {
        let err = extract_album_path("/elsewhere/album1").unwrap_err();
        assert!(matches!(err, ScanError::UnexpectedPath { .. }));
    }

    #[test]
    fn test_extract_album_path_repeated_marker() {
        let err = extract_album_path("/x/files/flac/a/files/flac/b").unwrap_err();
        assert!(matches!(err, ScanError::UnexpectedPath { .. }));
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path("/x//y/"), "/x/y");
        assert_eq!(clean_path("/x/./y"), "/x/y");
        assert_eq!(clean_path("/x/z/../y"), "/x/y");
        assert_eq!(clean_path("/x/y"), "/x/y");
        assert_eq!(clean_path("x/y/"), "x/y");
    }

    #[test]
    fn test_clean_path_degenerate_inputs() {
        assert_eq!(clean_path(""), ".");
        assert_eq!(clean_path("."), ".");
        assert_eq!(clean_path("/"), "/");
        assert_eq!(clean_path("/.."), "/");
        assert_eq!(clean_path("a/.."), ".");
        assert_eq!(clean_path("../a"), "../a");
        assert_eq!(clean_path("a/../../b"), "../b");
    }

    #[test]
    fn test_new_normalizes_albums_dir() {
        let scanner = LogScanner::new("/music//files/flac/");
        assert_eq!(scanner.albums_dir(), "/music/files/flac");

        let scanner = LogScanner::new("/music/./files/flac");
        assert_eq!(scanner.albums_dir(), "/music/files/flac");
    }
}
