//! Lookup history
//!
//! A bounded most-recently-used list of past lookups, newest first. Queries
//! are compared case-insensitively, so searching `pm660` after `PM660`
//! replaces the older entry instead of adding a second one.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use serde::{Deserialize, Serialize};
use crate::Result;

/// Default number of entries kept
pub const DEFAULT_CAPACITY: usize = 25;

/// A remembered lookup and the text it produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    pub text: String,
    /// Seconds since the Unix epoch
    pub searched_at: u64,
}

impl HistoryEntry {
    pub fn new(query: impl Into<String>, text: impl Into<String>) -> Self {
        let searched_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            query: query.into(),
            text: text.into(),
            searched_at,
        }
    }

    fn matches(&self, query: &str) -> bool {
        self.query.to_lowercase() == query.trim().to_lowercase()
    }
}

/// MRU list, optionally backed by a JSON file
#[derive(Debug)]
pub struct History {
    path: Option<PathBuf>,
    capacity: usize,
    entries: Vec<HistoryEntry>,
}

impl History {
    /// An empty history that lives only in memory
    pub fn in_memory(capacity: usize) -> Self {
        Self {
            path: None,
            capacity: capacity.max(1),
            entries: Vec::new(),
        }
    }

    /// Load from `path`; a missing file is an empty history
    pub fn load(path: &Path, capacity: usize) -> Result<Self> {
        let mut history = Self::in_memory(capacity);
        history.path = Some(path.to_path_buf());
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            if !contents.trim().is_empty() {
                history.entries = serde_json::from_str(&contents)?;
                history.entries.truncate(history.capacity);
            }
        }
        Ok(history)
    }

    /// Like [`History::load`], but an unreadable file only costs the cache:
    /// the error is logged and an unsaved in-memory history is returned, so
    /// the damaged file is left as it was.
    pub fn load_or_empty(path: &Path, capacity: usize) -> Self {
        match Self::load(path, capacity) {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!("Ignoring history at {}: {}", path.display(), e);
                Self::in_memory(capacity)
            }
        }
    }

    /// Write back to the backing file, if any
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }

    /// Put `entry` on top, dropping any older entry for the same query
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.retain(|e| !e.matches(&entry.query));
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
    }

    pub fn find(&self, query: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.matches(query))
    }

    /// Remove the entry for `query`; returns whether one existed
    pub fn remove(&mut self, query: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| !e.matches(query));
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries, newest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
