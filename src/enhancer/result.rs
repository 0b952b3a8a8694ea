//! Structured enhancement results and the history log

use serde::{Deserialize, Serialize};

use crate::style::StyleDefinition;

/// Maximum number of history entries kept
pub const HISTORY_LIMIT: usize = 20;

/// Structured output of one enhancement. Every field is required on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementResult {
    pub original: String,
    pub enhanced: String,
    pub explanation: String,
    pub key_changes: Vec<String>,
    pub tips: Vec<String>,
}

/// A past enhancement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    pub timestamp: i64,
    pub style_id: String,
    pub style_name: String,
    pub result: EnhancementResult,
}

impl HistoryItem {
    pub fn new(style: &StyleDefinition, result: EnhancementResult, now_millis: i64) -> Self {
        Self {
            id: now_millis.to_string(),
            timestamp: now_millis,
            style_id: style.id.clone(),
            style_name: style.name.clone(),
            result,
        }
    }
}

/// Newest-first log, capped at [`HISTORY_LIMIT`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    items: Vec<HistoryItem>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a stored snapshot, keeping only the newest entries
    pub fn from_items(mut items: Vec<HistoryItem>) -> Self {
        items.truncate(HISTORY_LIMIT);
        Self { items }
    }

    /// Prepend an item, dropping the oldest beyond the cap.
    /// An id equal to one already logged is bumped to stay unique.
    pub fn push(&mut self, mut item: HistoryItem) {
        while self.items.iter().any(|i| i.id == item.id) {
            let next = item.id.parse::<i64>().map(|n| n + 1).unwrap_or(item.timestamp + 1);
            item.id = next.to_string();
        }

        self.items.insert(0, item);
        self.items.truncate(HISTORY_LIMIT);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn find(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
