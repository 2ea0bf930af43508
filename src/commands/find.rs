//! find - Search a deck and every file it includes

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

use super::{remember, write_search, OutputOptions};
use crate::engine::Engine;
use crate::history::{store, HistoryLocation};
use crate::view::layout::Page;

/// Pick the root to search: the given file, else the most recent one
pub fn resolve_root(file: Option<&Path>, history: &HistoryLocation) -> Result<PathBuf> {
    if let Some(file) = file {
        return Ok(file.to_path_buf());
    }

    let latest = history
        .path()
        .and_then(|path| store::load(path).latest().map(|entry| PathBuf::from(&entry.path)));
    match latest {
        Some(root) => {
            tracing::debug!("no FILE given, using most recent root {}", root.display());
            Ok(root)
        }
        None => bail!("No FILE given and no recent root file in the history"),
    }
}

pub fn run_find(
    file: Option<&Path>,
    search_text: &str,
    page: Page,
    options: &OutputOptions,
    history: &HistoryLocation,
) -> Result<()> {
    let root = resolve_root(file, history)?;

    let mut engine = Engine::new();
    engine.find(&root, search_text);
    tracing::info!(
        "{} occurrences of {:?} in {} files, {} errors",
        engine.occurrence_count_all(),
        search_text,
        engine.link_count(),
        engine.error_count()
    );

    remember(history, &engine)?;
    write_search(&engine, page, options, std::io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_root_prefers_argument() {
        let root = resolve_root(Some(Path::new("deck.dat")), &HistoryLocation::Disabled).unwrap();
        assert_eq!(root, PathBuf::from("deck.dat"));
    }

    #[test]
    fn test_resolve_root_from_history() {
        let temp = tempdir().unwrap();
        let history = HistoryLocation::Explicit(temp.path().join("recent.json"));
        history.record("/deck/old.dat", "").unwrap();
        history.record("/deck/new.dat", "grid").unwrap();

        assert_eq!(resolve_root(None, &history).unwrap(), PathBuf::from("/deck/new.dat"));
    }

    #[test]
    fn test_resolve_root_without_history() {
        let err = resolve_root(None, &HistoryLocation::Disabled).unwrap_err();
        assert!(err.to_string().contains("No FILE given"));
    }
}
