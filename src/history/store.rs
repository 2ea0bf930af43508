//! Recent files store - Read/write the recent root files list

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// History file name inside the data directory
pub const HISTORY_FILE: &str = "recent.json";

/// Entries kept, most recent first
pub const MAX_RECENT: usize = 10;

/// One recently searched root file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentEntry {
    /// Root file path, as searched
    pub path: String,

    /// Last search text used with this root
    #[serde(default)]
    pub search: String,

    /// When the root was last searched
    pub used_at: DateTime<Utc>,
}

/// Recent root files, most recent first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentFiles {
    pub entries: Vec<RecentEntry>,
}

impl RecentFiles {
    /// Move `path` to the front, replacing any previous entry for it
    pub fn record(&mut self, path: impl Into<String>, search: impl Into<String>) {
        self.record_at(path, search, Utc::now());
    }

    fn record_at(&mut self, path: impl Into<String>, search: impl Into<String>, used_at: DateTime<Utc>) {
        let path = path.into();
        self.entries.retain(|entry| entry.path != path);
        self.entries.insert(
            0,
            RecentEntry {
                path,
                search: search.into(),
                used_at,
            },
        );
        self.entries.truncate(MAX_RECENT);
    }

    /// Most recently searched root
    pub fn latest(&self) -> Option<&RecentEntry> {
        self.entries.first()
    }
}

/// Default history location in the platform data directory
pub fn default_history_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "nastranfind", "nasfind")
        .map(|dirs| dirs.data_dir().join(HISTORY_FILE))
}

/// Read the history; a missing or unreadable file is an empty history
pub fn load(path: &Path) -> RecentFiles {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("no history at {}: {}", path.display(), e);
            return RecentFiles::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(recent) => recent,
        Err(e) => {
            tracing::warn!(
                "Failed to parse history at {}: {}. Starting with an empty list.",
                path.display(),
                e
            );
            RecentFiles::default()
        }
    }
}

/// Write the history, creating its directory if needed
pub fn save(path: &Path, recent: &RecentFiles) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create history directory: {:?}", dir))?;
        }
    }

    let json = serde_json::to_string_pretty(recent)?;
    fs::write(path, json).with_context(|| format!("Failed to write history: {:?}", path))?;
    tracing::debug!("saved history to {}", path.display());
    Ok(())
}
