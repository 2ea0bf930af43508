//! Engine module - Include tree traversal and search
//!
//! This module provides:
//! - INCLUDE directive parsing
//! - Include graph resolution with cycle and duplicate safety
//! - Case-insensitive occurrence indexing
//! - The `Engine` query surface consumed by the views

pub mod directive;
pub mod error;
pub mod indexer;
pub mod resolver;
pub mod result;

use std::path::{Path, PathBuf};

pub use error::EngineError;
pub use result::{FileResult, Occurrence, ResultMap};

/// Everything derived from one `find` call
#[derive(Debug, Default)]
pub struct Snapshot {
    root: PathBuf,
    search_text: String,
    files: Vec<PathBuf>,
    results: ResultMap,
    errors: Vec<EngineError>,
}

impl Snapshot {
    /// Resolve the include tree of `root` and index it for `search_text`
    pub fn build(root: &Path, search_text: &str) -> Self {
        let resolution = resolver::resolve(root);
        let index = indexer::index(&resolution.files, &resolution.unreadable, search_text);

        let mut errors = resolution.errors;
        errors.extend(index.errors);

        Self {
            root: root.to_path_buf(),
            search_text: search_text.to_string(),
            files: resolution.files,
            results: index.results,
            errors,
        }
    }
}

/// Search engine over an include tree.
///
/// Every call to [`Engine::find`] replaces all previous state at once; the
/// query methods only read the latest snapshot.
#[derive(Debug, Default)]
pub struct Engine {
    snapshot: Snapshot,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search `search_text` in `root` and every file it includes
    pub fn find(&mut self, root: impl AsRef<Path>, search_text: &str) {
        let root = root.as_ref();
        tracing::debug!("find {:?} in {}", search_text, root.display());
        self.snapshot = Snapshot::build(root, search_text);
    }

    /// Root file as given to the last `find`
    pub fn root(&self) -> &Path {
        &self.snapshot.root
    }

    /// Search text of the last `find`
    pub fn search_text(&self) -> &str {
        &self.snapshot.search_text
    }

    /// Visited files, root first, in open order
    pub fn files(&self) -> &[PathBuf] {
        &self.snapshot.files
    }

    /// Results keyed by visited file, in the order of `files()`
    pub fn results(&self) -> &ResultMap {
        &self.snapshot.results
    }

    /// Number of visited files, root included
    pub fn link_count(&self) -> usize {
        self.snapshot.files.len()
    }

    /// Total occurrences over all files
    pub fn occurrence_count_all(&self) -> usize {
        self.snapshot
            .results
            .values()
            .map(FileResult::occurrence_count)
            .sum()
    }

    pub fn error_count(&self) -> usize {
        self.snapshot.errors.len()
    }

    /// Message of the error at `index`
    pub fn error_at(&self, index: usize) -> Option<String> {
        self.snapshot.errors.get(index).map(ToString::to_string)
    }

    pub fn errors(&self) -> &[EngineError] {
        &self.snapshot.errors
    }

    /// Rows a file's results occupy: one per occurrence, or one placeholder.
    ///
    /// Unknown paths occupy no rows.
    pub fn result_count_lines(&self, path: &Path) -> usize {
        self.snapshot
            .results
            .get(path)
            .map(|result| result.occurrence_count().max(1))
            .unwrap_or(0)
    }
}
