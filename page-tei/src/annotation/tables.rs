//! Tag name conversion and nesting rank ("deepness") tables.
//!
//! Both tables are keyed on source tag names as they appear in the custom
//! attribute. The name table is read-only. The rank table grows: a name seen
//! for the first time is assigned one more than the current maximum, and keeps
//! that rank for the rest of the run. Allocation order is observable through
//! tie-breaks, so every access goes through a single lock.

use crate::error::ConvertError;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Source tag name → output element name. Identity when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    names: HashMap<String, String>,
}

impl NameTable {
    pub fn new(names: HashMap<String, String>) -> Self {
        NameTable { names }
    }

    /// Parse a JSON object of `"source": "target"` pairs.
    pub fn from_json(source: &str) -> Result<Self, ConvertError> {
        serde_json::from_str(source)
            .map(NameTable::new)
            .map_err(|e| ConvertError::TagTable(format!("name conversion table: {e}")))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConvertError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
        Self::from_json(&source).map_err(|e| e.in_file(path))
    }

    pub fn convert<'a>(&'a self, tag_name: &'a str) -> &'a str {
        self.names
            .get(tag_name)
            .map(String::as_str)
            .unwrap_or(tag_name)
    }

    /// All configured conversions, sorted by source name.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self
            .names
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort();
        entries
    }
}

#[derive(Debug, Default)]
struct RankState {
    ranks: HashMap<String, i64>,
    max: i64,
}

/// Process-wide, append-only nesting rank registry.
#[derive(Debug, Default)]
pub struct RankTable {
    state: Mutex<RankState>,
}

impl RankTable {
    /// Seed the table. The allocation counter starts at the largest seed
    /// (0 for an empty seed).
    pub fn new(seed: HashMap<String, i64>) -> Self {
        let max = seed.values().copied().max().unwrap_or(0);
        RankTable {
            state: Mutex::new(RankState { ranks: seed, max }),
        }
    }

    /// Parse a JSON object of `"name": rank` pairs.
    pub fn from_json(source: &str) -> Result<Self, ConvertError> {
        serde_json::from_str(source)
            .map(RankTable::new)
            .map_err(|e| ConvertError::TagTable(format!("deepness table: {e}")))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConvertError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
        Self::from_json(&source).map_err(|e| e.in_file(path))
    }

    /// Rank of `tag_name`, allocating the next free rank on first sight.
    ///
    /// Allocation saturates at `i64::MAX`; tags allocated past that point
    /// share the top rank and fall back to input order.
    pub fn rank_of(&self, tag_name: &str) -> i64 {
        let mut state = self.lock();
        if let Some(rank) = state.ranks.get(tag_name) {
            return *rank;
        }
        state.max = state.max.saturating_add(1);
        let rank = state.max;
        state.ranks.insert(tag_name.to_string(), rank);
        tracing::debug!(tag = tag_name, rank, "allocated deepness for unconfigured tag");
        rank
    }

    /// Rank of `tag_name` if already known, without allocating.
    pub fn peek(&self, tag_name: &str) -> Option<i64> {
        self.lock().ranks.get(tag_name).copied()
    }

    /// Current ranks ordered by rank, then name.
    pub fn snapshot(&self) -> Vec<(String, i64)> {
        let state = self.lock();
        let mut entries: Vec<_> = state
            .ranks
            .iter()
            .map(|(name, rank)| (name.clone(), *rank))
            .collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }

    pub fn len(&self) -> usize {
        self.lock().ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, RankState> {
        // A panic while holding the lock cannot leave the map half-updated
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// The two lookup tables the engine consults, one instance per batch run.
#[derive(Debug, Default)]
pub struct TagTables {
    pub names: NameTable,
    pub ranks: RankTable,
}

impl TagTables {
    pub fn new(names: NameTable, ranks: RankTable) -> Self {
        TagTables { names, ranks }
    }
}
