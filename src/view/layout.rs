//! Row layout of the result area and scroll extents

use crate::core::paths::normalize_path;
use crate::engine::Engine;

/// Placeholder shown for a file without occurrences
pub const NO_RESULTS: &str = "(no results)";

/// Rows added around each file's results: the header and a trailing blank
pub const FRAME_ROWS: usize = 2;

/// One row of the result area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// `--- path ---`
    FileHeader(String),
    /// Labelled occurrence line, with the byte length of its label
    Occurrence { text: String, label_len: usize },
    NoResults,
    Blank,
}

/// Lay out every visited file, in `files()` order
pub fn rows(engine: &Engine) -> Vec<Row> {
    let mut rows = Vec::new();

    for (path, result) in engine.results() {
        rows.push(Row::FileHeader(normalize_path(path)));
        if result.occurrence_count() == 0 {
            rows.push(Row::NoResults);
        } else {
            rows.extend(result.occurrences().iter().map(|occ| Row::Occurrence {
                text: occ.text.clone(),
                label_len: occ.label_len(),
            }));
        }
        rows.push(Row::Blank);
    }

    rows
}

/// Total rows of the result area, i.e. the largest useful scroll offset
pub fn maximum_scroll(engine: &Engine) -> usize {
    engine
        .files()
        .iter()
        .map(|file| FRAME_ROWS + engine.result_count_lines(file))
        .sum()
}

/// Visible window over the result rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    /// Rows skipped from the top
    pub scroll: usize,
    /// Rows shown; everything after `scroll` when `None`
    pub rows: Option<usize>,
}

impl Page {
    /// Slice the visible rows, clamping to the available range
    pub fn window<'a>(&self, rows: &'a [Row]) -> &'a [Row] {
        let start = self.scroll.min(rows.len());
        let end = match self.rows {
            Some(count) => start.saturating_add(count).min(rows.len()),
            None => rows.len(),
        };
        &rows[start..end]
    }

    /// Scroll offset clamped to the layout
    pub fn clamped_scroll(&self, maximum: usize) -> usize {
        self.scroll.min(maximum)
    }
}
