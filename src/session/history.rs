//! Capped conversation history.
//!
//! [`ConversationHistory`] keeps translation results in insertion order and
//! drops the oldest once the cap is exceeded (FIFO, not LRU: reading an
//! entry never refreshes it).

use std::collections::VecDeque;

use crate::translate::TranslationResult;

/// Default number of entries kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

// ---------------------------------------------------------------------------
// ConversationHistory
// ---------------------------------------------------------------------------

/// Ordered, capped sequence of [`TranslationResult`]s.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    entries: VecDeque<TranslationResult>,
    limit: usize,
}

impl ConversationHistory {
    /// History holding at most `limit` entries (a limit of 0 is raised to 1).
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit.min(128)),
            limit,
        }
    }

    /// Append `result` unless an identical record is already held.
    ///
    /// Returns `false` when the record was a duplicate. Oldest entries are
    /// dropped once the history exceeds its limit.
    pub fn push(&mut self, result: TranslationResult) -> bool {
        if self.entries.contains(&result) {
            return false;
        }

        self.entries.push_back(result);

        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Oldest-first iterator.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &TranslationResult> {
        self.entries.iter()
    }

    /// Up to `n` most recent entries, newest first.
    pub fn recent(&self, n: usize) -> Vec<&TranslationResult> {
        self.entries.iter().rev().take(n).collect()
    }

    pub fn last(&self) -> Option<&TranslationResult> {
        self.entries.back()
    }

    /// Serialize the whole history (oldest first) as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
