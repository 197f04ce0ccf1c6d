#![forbid(unsafe_code)]

//! Byte pattern search and result navigation.
//!
//! # Example
//! ```
//! use hexview_text::search::{SearchResult, scan};
//! use hexview_text::SearchMode;
//!
//! let results = scan(b"Hello", "ll", SearchMode::text());
//! assert_eq!(results, vec![SearchResult::new(2, 2)]);
//! ```
//!
//! # Invariants
//!
//! - Results are sorted ascending by `index` with no duplicate index.
//! - When several candidates match at one index only the longest is kept.
//! - `selected`, when set, indexes into the current results.

use memchr::memmem;

use crate::encoding::{SearchMode, candidates};

/// One match: `length` bytes starting at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchResult {
    pub index: usize,
    pub length: usize,
}

impl SearchResult {
    #[must_use]
    pub const fn new(index: usize, length: usize) -> Self {
        Self { index, length }
    }

    /// One past the last matched byte.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.index + self.length
    }

    #[must_use]
    pub const fn contains(&self, byte: usize) -> bool {
        byte >= self.index && byte < self.end()
    }
}

/// Sort by index and keep the longest match per index.
fn merge(mut results: Vec<SearchResult>) -> Vec<SearchResult> {
    results.sort_unstable_by(|a, b| a.index.cmp(&b.index).then(b.length.cmp(&a.length)));
    results.dedup_by_key(|r| r.index);
    results
}

/// Find every match of `query` under `mode` in `haystack`.
///
/// Each candidate needle is scanned left to right for non-overlapping
/// matches; the per-candidate lists are then merged.
#[must_use]
pub fn scan(haystack: &[u8], query: &str, mode: SearchMode) -> Vec<SearchResult> {
    let needles = candidates(query, mode);
    let mut results = Vec::new();
    for needle in needles.iter().filter(|n| n.len() <= haystack.len()) {
        results.extend(
            memmem::find_iter(haystack, needle).map(|index| SearchResult::new(index, needle.len())),
        );
    }
    let results = merge(results);
    tracing::debug!(
        query_len = query.len(),
        candidates = needles.len(),
        results = results.len(),
        "search scan"
    );
    results
}

/// Search slice of the viewer store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    pub mode: SearchMode,
    query: String,
    results: Vec<SearchResult>,
    selected: Option<usize>,
    longest: usize,
}

impl SearchState {
    #[must_use]
    pub fn new(mode: SearchMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The selected result itself.
    #[must_use]
    pub fn selected_result(&self) -> Option<SearchResult> {
        self.selected.and_then(|i| self.results.get(i).copied())
    }

    /// Replace the query and rescan.
    pub fn set_query(&mut self, query: impl Into<String>, haystack: &[u8], origin: Option<usize>) {
        self.query = query.into();
        self.rescan(haystack, origin);
    }

    /// Replace the mode and rescan.
    pub fn set_mode(&mut self, mode: SearchMode, haystack: &[u8], origin: Option<usize>) {
        self.mode = mode;
        self.rescan(haystack, origin);
    }

    /// Recompute results for the current query and mode.
    ///
    /// The selection lands on the first result after `origin`.
    pub fn rescan(&mut self, haystack: &[u8], origin: Option<usize>) {
        self.results = scan(haystack, &self.query, self.mode);
        self.longest = self.results.iter().map(|r| r.length).max().unwrap_or(0);
        self.selected = self.first_after(origin);
    }

    /// Forget query and results; the mode is kept.
    pub fn clear(&mut self) {
        self.query.clear();
        self.results.clear();
        self.selected = None;
        self.longest = 0;
    }

    /// First result whose index is greater than `origin`, wrapping to the
    /// first result. `None` only when there are no results.
    #[must_use]
    pub fn first_after(&self, origin: Option<usize>) -> Option<usize> {
        if self.results.is_empty() {
            return None;
        }
        let Some(origin) = origin else {
            return Some(0);
        };
        let pos = self.results.partition_point(|r| r.index <= origin);
        Some(if pos < self.results.len() { pos } else { 0 })
    }

    /// Select result `i`, wrapping cyclically in both directions.
    pub fn select(&mut self, i: i64) {
        let len = self.results.len() as i64;
        self.selected = (len > 0).then(|| i.rem_euclid(len) as usize);
    }

    /// Advance to the next result, wrapping.
    pub fn next(&mut self) {
        match self.selected {
            Some(i) => self.select(i as i64 + 1),
            None => self.select(0),
        }
    }

    /// Step back to the previous result, wrapping.
    pub fn previous(&mut self) {
        match self.selected {
            Some(i) => self.select(i as i64 - 1),
            None => self.select(-1),
        }
    }

    /// Index of a result covering `byte`, preferring the selected one.
    #[must_use]
    pub fn covering(&self, byte: usize) -> Option<usize> {
        if self.selected_result().is_some_and(|r| r.contains(byte)) {
            return self.selected;
        }
        let upper = self.results.partition_point(|r| r.index <= byte);
        self.results[..upper]
            .iter()
            .enumerate()
            .rev()
            .take_while(|(_, r)| r.index + self.longest > byte)
            .find(|(_, r)| r.contains(byte))
            .map(|(i, _)| i)
    }
}
