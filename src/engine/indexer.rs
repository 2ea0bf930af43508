//! Occurrence indexing
//!
//! Re-reads every visited file and keeps the lines containing the search
//! text, compared case-insensitively.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::file_reader::LineReader;
use crate::engine::error::EngineError;
use crate::engine::result::{FileResult, Occurrence, ResultMap};

/// Outcome of indexing a list of files
#[derive(Debug, Default)]
pub struct Index {
    /// One entry per input file, in input order
    pub results: ResultMap,

    /// Files that became unreadable since resolution
    pub errors: Vec<EngineError>,
}

/// Build the result map for `files`.
///
/// An empty search text matches nothing and leaves the files unread. Files in
/// `unreadable` already failed during resolution: they get no occurrences and
/// are not read again.
pub fn index(files: &[PathBuf], unreadable: &HashSet<PathBuf>, search_text: &str) -> Index {
    let mut index = Index::default();
    let needle = search_text.to_lowercase();

    for path in files {
        let result = if needle.is_empty() || unreadable.contains(path) {
            FileResult::new()
        } else {
            match search_file(path, &needle) {
                Ok(result) => result,
                Err(source) => {
                    let error = EngineError::Search {
                        path: path.clone(),
                        source,
                    };
                    tracing::warn!("{}", error);
                    index.errors.push(error);
                    FileResult::new()
                }
            }
        };

        tracing::debug!(
            "{}: {} occurrence(s)",
            path.display(),
            result.occurrence_count()
        );
        index.results.insert(path.clone(), result);
    }

    index
}

/// Scan one file for lines containing `needle` (already lowercased)
fn search_file(path: &Path, needle: &str) -> io::Result<FileResult> {
    let mut result = FileResult::new();

    for (index, line) in LineReader::open(path)?.enumerate() {
        let line = line?;
        if line.to_lowercase().contains(needle) {
            result.push(Occurrence::new(index + 1, &line));
        }
    }

    Ok(result)
}
