//! History module - Recently searched root files
//!
//! Provides:
//! - Recent files storage (recent.json)
//! - Location resolution (explicit path or platform data directory)

pub mod store;

use std::path::PathBuf;

/// Where the history lives for this invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryLocation {
    /// History disabled
    Disabled,
    /// Explicitly requested file: write failures are errors
    Explicit(PathBuf),
    /// Platform default: write failures are only logged
    Default(PathBuf),
}

impl HistoryLocation {
    /// Pick the location from the CLI options
    pub fn from_options(path: Option<PathBuf>, disabled: bool) -> Self {
        if disabled {
            return HistoryLocation::Disabled;
        }
        match path {
            Some(path) => HistoryLocation::Explicit(path),
            None => store::default_history_path()
                .map(HistoryLocation::Default)
                .unwrap_or(HistoryLocation::Disabled),
        }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            HistoryLocation::Disabled => None,
            HistoryLocation::Explicit(path) | HistoryLocation::Default(path) => Some(path),
        }
    }

    /// Record a searched root
    pub fn record(&self, root: &str, search: &str) -> anyhow::Result<()> {
        let Some(path) = self.path() else {
            return Ok(());
        };

        let mut recent = store::load(path);
        recent.record(root, search);
        match (self, store::save(path, &recent)) {
            (_, Ok(())) => Ok(()),
            (HistoryLocation::Explicit(_), Err(e)) => Err(e),
            (_, Err(e)) => {
                tracing::warn!("{:#}", e);
                Ok(())
            }
        }
    }
}
