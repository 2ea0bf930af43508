//! includes - List the files reachable from a root deck

use anyhow::Result;
use serde_json::json;
use std::io::Write;
use std::path::Path;

use super::{Display, OutputOptions};
use crate::core::model::{ItemError, ResultItem, ResultSet};
use crate::core::paths::normalize_path;
use crate::core::render::Renderer;
use crate::engine::Engine;
use crate::view;

/// Visited files in discovery order, then the errors
pub fn includes_result_set(engine: &Engine) -> ResultSet {
    let mut result_set = ResultSet::new();
    result_set.push(ResultItem::summary(json!({
        "root": normalize_path(engine.root()),
        "files": engine.link_count(),
        "errors": engine.error_count(),
    })));

    result_set.extend(engine.files().iter().enumerate().map(|(index, file)| {
        ResultItem::file(normalize_path(file)).with_data(json!({ "order": index + 1 }))
    }));

    result_set.extend(engine.errors().iter().map(|error| {
        ResultItem::error(ItemError::new(error.code(), error.to_string()))
            .with_path(normalize_path(error.path()))
    }));

    result_set
}

pub fn write_includes<W: Write>(engine: &Engine, options: &OutputOptions, mut writer: W) -> Result<()> {
    match options.display {
        Display::Screen => writer.write_all(view::includes(engine, options.color).as_bytes())?,
        Display::Structured(format) => {
            let renderer = Renderer::with_config(options.render_config(format));
            renderer.render_to(&includes_result_set(engine), &mut writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn run_includes(file: &Path, options: &OutputOptions) -> Result<()> {
    let mut engine = Engine::new();
    engine.find(file, "");
    write_includes(&engine, options, std::io::stdout().lock())
}
