//! Per-file search results

use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

/// One matching line, labelled with its line number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    /// 1-based line number
    pub line_number: usize,

    /// `line NNNNNNN: ` label followed by the raw line content
    pub text: String,

    #[serde(skip)]
    label_len: usize,
}

impl Occurrence {
    pub fn new(line_number: usize, content: &str) -> Self {
        let label = line_label(line_number);
        let label_len = label.len();
        Self {
            line_number,
            text: label + content,
            label_len,
        }
    }

    /// The line content without its label
    pub fn content(&self) -> &str {
        &self.text[self.label_len..]
    }

    /// Byte length of the label prefix
    pub fn label_len(&self) -> usize {
        self.label_len
    }
}

/// Fixed-width line label, e.g. `line      11: `
pub fn line_label(line_number: usize) -> String {
    format!("line {:>7}: ", line_number)
}

/// Occurrences found in one file, in line order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileResult {
    occurrences: Vec<Occurrence>,
}

impl FileResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, occurrence: Occurrence) {
        self.occurrences.push(occurrence);
    }

    pub fn occurrence_count(&self) -> usize {
        self.occurrences.len()
    }

    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }
}

/// Results keyed by canonical path, iterated in visit order
pub type ResultMap = IndexMap<PathBuf, FileResult>;
