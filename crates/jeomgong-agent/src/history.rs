//! Saved predictions, one per `institution/department`.
//!
//! A JSON file holding a key → entry map; saving an existing key
//! overwrites it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use jeomgong_common::Result;
use jeomgong_ranker::{PredictionInput, PredictionResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub institution: String,
    pub department: String,
    pub input: PredictionInput,
    pub result: PredictionResult,
    pub saved_at: DateTime<Utc>,
}

pub struct HistoryStore {
    path: PathBuf,
    entries: BTreeMap<String, HistoryEntry>,
}

impl HistoryStore {
    /// Open the store at `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert or overwrite `key`, then persist.
    pub fn save(&mut self, key: impl Into<String>, entry: HistoryEntry) -> Result<()> {
        let key = key.into();
        tracing::debug!(key = %key, "Saving prediction to history");
        self.entries.insert(key, entry);
        self.flush()
    }

    /// Look up `key`; spaces around either part are ignored.
    pub fn get(&self, key: &str) -> Option<&HistoryEntry> {
        self.entries.get(&normalize_key(key))
    }

    /// Entries sorted by key.
    pub fn list(&self) -> impl Iterator<Item = (&String, &HistoryEntry)> {
        self.entries.iter()
    }

    pub fn remove(&mut self, key: &str) -> Result<Option<HistoryEntry>> {
        let removed = self.entries.remove(&normalize_key(key));
        if removed.is_some() {
            self.flush()?;
        }
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn flush(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// `institution/department` with each part trimmed.
pub fn normalize_key(raw: &str) -> String {
    match raw.split_once('/') {
        Some((inst, dept)) => format!("{}/{}", inst.trim(), dept.trim()),
        None => raw.trim().to_string(),
    }
}
