#![forbid(unsafe_code)]

//! Recent searches.
//!
//! Newest first, no duplicates, capped. Up/Down in the search bar walk the
//! list with [`SearchHistory::step`]; position `None` is the live query.

use std::collections::VecDeque;

use hexview_text::SearchKind;

use crate::config::DEFAULT_HISTORY;

/// A remembered search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HistoryEntry {
    pub kind: SearchKind,
    pub value: String,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(kind: SearchKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    position: Option<usize>,
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY)
    }
}

impl SearchHistory {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            position: None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entry currently recalled, `None` for the live query.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        self.position
    }

    /// Newest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Record a search. Blank values are ignored; a repeat moves to the front.
    pub fn push(&mut self, kind: SearchKind, value: &str) {
        self.position = None;
        if value.trim().is_empty() {
            return;
        }
        let entry = HistoryEntry::new(kind, value);
        self.entries.retain(|e| *e != entry);
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Move `delta` entries towards older searches (negative: newer).
    ///
    /// Returns the entry landed on, or `None` when back at the live query or
    /// the history is empty.
    pub fn step(&mut self, delta: i32) -> Option<&HistoryEntry> {
        if self.entries.is_empty() {
            self.position = None;
            return None;
        }
        let last = self.entries.len() as i64 - 1;
        let current = self.position.map_or(-1, |p| p as i64);
        let next = (current + i64::from(delta)).clamp(-1, last);
        self.position = usize::try_from(next).ok();
        self.position.and_then(|p| self.entries.get(p))
    }

    /// Back to the live query.
    pub fn reset(&mut self) {
        self.position = None;
    }
}
