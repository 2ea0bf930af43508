//! recent - Show recently searched root files

use anyhow::Result;
use serde_json::json;
use std::io::Write;

use super::{Display, OutputOptions};
use crate::core::model::{ResultItem, ResultSet};
use crate::core::render::Renderer;
use crate::history::store::RecentFiles;
use crate::history::{store, HistoryLocation};

pub fn recent_result_set(recent: &RecentFiles) -> ResultSet {
    recent
        .entries
        .iter()
        .map(|entry| {
            ResultItem::file(entry.path.clone()).with_data(json!({
                "search": entry.search,
                "used_at": entry.used_at,
            }))
        })
        .collect()
}

/// Numbered text list, most recent first
pub fn recent_text(recent: &RecentFiles) -> String {
    if recent.entries.is_empty() {
        return "(no recent files)\n".to_string();
    }

    let mut out = String::new();
    for (index, entry) in recent.entries.iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. {}  [{}]  {}\n",
            index + 1,
            entry.path,
            entry.search,
            entry.used_at.format("%Y-%m-%d %H:%M:%S")
        ));
    }
    out
}

pub fn write_recent<W: Write>(recent: &RecentFiles, options: &OutputOptions, mut writer: W) -> Result<()> {
    match options.display {
        Display::Screen => writer.write_all(recent_text(recent).as_bytes())?,
        Display::Structured(format) => {
            let renderer = Renderer::with_config(options.render_config(format));
            renderer.render_to(&recent_result_set(recent), &mut writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn run_recent(options: &OutputOptions, history: &HistoryLocation) -> Result<()> {
    let recent = history.path().map(|path| store::load(path)).unwrap_or_default();
    write_recent(&recent, options, std::io::stdout().lock())
}
