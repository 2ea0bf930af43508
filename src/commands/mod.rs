//! Commands module - One handler per subcommand
//!
//! Provides:
//! - find: search a deck and its includes
//! - includes: list the include tree
//! - prompt: interactive search loop
//! - recent: recently searched root files

pub mod find;
pub mod includes;
pub mod prompt;
pub mod recent;

use anyhow::Result;
use serde_json::json;
use std::io::Write;

use crate::core::model::{ItemError, ResultItem, ResultSet};
use crate::core::paths::{canonical_path, normalize_path};
use crate::core::render::{OutputFormat, RenderConfig, Renderer};
use crate::engine::Engine;
use crate::history::HistoryLocation;
use crate::view::layout::{maximum_scroll, Page};
use crate::view::Screen;

/// How command output is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    /// Human-oriented text screen
    #[default]
    Screen,
    /// Result set in a structured format
    Structured(OutputFormat),
}

impl std::str::FromStr for Display {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Display::Screen),
            other => other.parse().map(Display::Structured),
        }
    }
}

/// Output settings shared by every command
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub display: Display,
    pub pretty: bool,
    pub color: bool,
}

impl OutputOptions {
    /// Render config for structured output
    pub fn render_config(&self, format: OutputFormat) -> RenderConfig {
        RenderConfig::with_pretty(format, self.pretty)
    }
}

/// Write the engine's last search in the selected display
pub fn write_search<W: Write>(
    engine: &Engine,
    page: Page,
    options: &OutputOptions,
    mut writer: W,
) -> Result<()> {
    match options.display {
        Display::Screen => {
            let screen = Screen::new(engine)
                .with_page(page)
                .with_color(options.color)
                .render();
            writer.write_all(screen.as_bytes())?;
        }
        Display::Structured(format) => {
            let renderer = Renderer::with_config(options.render_config(format));
            renderer.render_to(&engine_result_set(engine), &mut writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Record the engine's last root in the history, under its canonical path.
///
/// A root that could not be opened is not recorded.
pub fn remember(history: &HistoryLocation, engine: &Engine) -> Result<()> {
    let root = engine.root();
    if engine.link_count() == 0 {
        tracing::debug!("not recording unopened root {}", root.display());
        return Ok(());
    }
    let path = canonical_path(root).unwrap_or_else(|_| root.to_path_buf());
    history.record(&normalize_path(&path), engine.search_text())
}

/// Map the engine's last search to the unified result model
pub fn engine_result_set(engine: &Engine) -> ResultSet {
    let mut result_set = ResultSet::new();

    result_set.push(ResultItem::summary(json!({
        "root": normalize_path(engine.root()),
        "search": engine.search_text(),
        "files": engine.link_count(),
        "occurrences": engine.occurrence_count_all(),
        "errors": engine.error_count(),
        "scroll_max": maximum_scroll(engine),
    })));

    for (path, result) in engine.results() {
        let path = normalize_path(path);
        result_set.push(ResultItem::file(path.clone()).with_count(result.occurrence_count()));
        result_set.extend(
            result
                .occurrences()
                .iter()
                .map(|occ| ResultItem::match_result(path.clone(), occ.line_number, occ.content())),
        );
    }

    result_set.extend(engine.errors().iter().map(|error| {
        ResultItem::error(ItemError::new(error.code(), error.to_string()))
            .with_path(normalize_path(error.path()))
    }));

    result_set
}
