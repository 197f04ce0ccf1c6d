#![forbid(unsafe_code)]

//! Shareable view state as a URL query.
//!
//! | Key | Meaning                   | Value                          |
//! |-----|---------------------------|--------------------------------|
//! | `a` | cursor index              | decimal                        |
//! | `b` | selection start           | decimal, needs `c`             |
//! | `c` | selection end             | decimal, needs `b`             |
//! | `d` | search kind               | `cursor`, `hex` or `text`      |
//! | `e` | search query              | lowercase hex of its UTF-8     |
//! | `f` | selected result           | decimal                        |
//!
//! Every value is alphanumeric, so no percent-encoding is involved.
//! Decoding skips unknown keys and malformed values and applies the rest on
//! top of the default state.

use hexview_core::bytes::{decode_hex, encode_hex};
use hexview_text::SearchKind;

use crate::store::Store;
use crate::traits::{Serializable, Validatable};

/// The part of the viewer state that survives a link.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocationState {
    pub cursor: Option<usize>,
    /// `(start, end)` with `start <= end`.
    pub selection: Option<(usize, usize)>,
    pub search_kind: SearchKind,
    pub query: String,
    pub selected_result: Option<usize>,
}

impl LocationState {
    /// Snapshot the location-relevant slices of `store`.
    #[must_use]
    pub fn capture(store: &Store) -> Self {
        Self {
            cursor: store.cursor.index,
            selection: store.select.bounds(),
            search_kind: store.search.mode.kind,
            query: store.search.query().to_owned(),
            selected_result: store.search.selected(),
        }
    }

    /// `base` with this state appended as its query.
    #[must_use]
    pub fn share_url(&self, base: &str) -> String {
        let query = self.serialize();
        if query.is_empty() {
            return base.to_owned();
        }
        let sep = if base.contains('?') { '&' } else { '?' };
        format!("{base}{sep}{query}")
    }
}

fn parse_index(value: &str) -> Option<usize> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

fn parse_query(value: &str) -> Option<String> {
    match decode_hex(value) {
        Ok((bytes, None)) => String::from_utf8(bytes).ok(),
        _ => None,
    }
}

impl Serializable for LocationState {
    fn serialize(&self) -> String {
        let mut pairs: Vec<(char, String)> = Vec::new();
        if let Some(cursor) = self.cursor {
            pairs.push(('a', cursor.to_string()));
        }
        if let Some((start, end)) = self.selection {
            pairs.push(('b', start.to_string()));
            pairs.push(('c', end.to_string()));
        }
        if self.search_kind != SearchKind::default() || !self.query.is_empty() {
            pairs.push(('d', self.search_kind.as_str().to_owned()));
        }
        if !self.query.is_empty() {
            pairs.push(('e', encode_hex(self.query.as_bytes())));
        }
        if let Some(selected) = self.selected_result {
            pairs.push(('f', selected.to_string()));
        }
        pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Accepts a bare query, one with a leading `?`, or a whole URL.
    fn deserialize(input: &str) -> Self {
        let query = input.split_once('?').map_or(input, |(_, q)| q);
        let query = query.split_once('#').map_or(query, |(q, _)| q);

        let mut state = Self::default();
        let mut start = None;
        let mut end = None;
        for pair in query.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "a" => state.cursor = parse_index(value).or(state.cursor),
                "b" => start = parse_index(value).or(start),
                "c" => end = parse_index(value).or(end),
                "d" => state.search_kind = SearchKind::parse(value).unwrap_or(state.search_kind),
                "e" => {
                    if let Some(q) = parse_query(value) {
                        state.query = q;
                    }
                }
                "f" => state.selected_result = parse_index(value).or(state.selected_result),
                _ => {}
            }
        }
        if let (Some(s), Some(e)) = (start, end) {
            state.selection = Some((s.min(e), s.max(e)));
        }
        state
    }
}

impl Validatable for LocationState {
    /// Buffer length.
    type Bounds = usize;

    fn validate(mut self, len: &usize) -> Self {
        let last = len.checked_sub(1);
        self.cursor = match (self.cursor, last) {
            (Some(c), Some(last)) => Some(c.min(last)),
            _ => None,
        };
        self.selection = match (self.selection, last) {
            (Some((s, e)), Some(last)) => Some((s.min(last), e.min(last))),
            _ => None,
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_only() {
        let state = LocationState {
            cursor: Some(42),
            ..LocationState::default()
        };
        assert_eq!(state.serialize(), "a=42");
        let back = LocationState::deserialize(&state.serialize());
        assert_eq!(back.cursor, Some(42));
        assert_eq!(back.selection, None);
        assert_eq!(back.search_kind, SearchKind::Text);
        assert!(back.query.is_empty());
        assert_eq!(back.selected_result, None);
    }

    #[test]
    fn default_is_empty() {
        assert_eq!(LocationState::default().serialize(), "");
        assert_eq!(LocationState::default().share_url("https://x/y"), "https://x/y");
    }

    #[test]
    fn full_state() {
        let state = LocationState {
            cursor: Some(1),
            selection: Some((2, 9)),
            search_kind: SearchKind::Hex,
            query: "ff 00".into(),
            selected_result: Some(3),
        };
        let query = state.serialize();
        assert_eq!(query, "a=1&b=2&c=9&d=hex&e=6666203030&f=3");
        assert_eq!(LocationState::deserialize(&query), state);
    }

    #[test]
    fn share_url_separator() {
        let state = LocationState {
            cursor: Some(7),
            ..LocationState::default()
        };
        assert_eq!(state.share_url("http://h/p"), "http://h/p?a=7");
        assert_eq!(state.share_url("http://h/p?x=1"), "http://h/p?x=1&a=7");
    }

    #[test]
    fn malformed_values_ignored() {
        let state = LocationState::deserialize("?a=-1&b=3&d=nope&e=zz&f=1x&g=5&junk");
        assert_eq!(state, LocationState::default());
    }

    #[test]
    fn selection_needs_both_ends_and_is_normalized() {
        assert_eq!(LocationState::deserialize("c=4").selection, None);
        assert_eq!(LocationState::deserialize("b=9&c=4").selection, Some((4, 9)));
    }

    #[test]
    fn whole_url_accepted() {
        let state = LocationState::deserialize("https://h/view?a=5&d=cursor#top");
        assert_eq!(state.cursor, Some(5));
        assert_eq!(state.search_kind, SearchKind::Cursor);
    }

    #[test]
    fn unicode_query_round_trips() {
        let state = LocationState {
            query: "héllo".into(),
            ..LocationState::default()
        };
        assert_eq!(LocationState::deserialize(&state.serialize()), state);
    }

    #[test]
    fn validate_clamps_to_buffer() {
        let state = LocationState {
            cursor: Some(100),
            selection: Some((3, 100)),
            ..LocationState::default()
        };
        let clamped = state.clone().validate(&10);
        assert_eq!(clamped.cursor, Some(9));
        assert_eq!(clamped.selection, Some((3, 9)));
        let empty = state.validate(&0);
        assert_eq!(empty.cursor, None);
        assert_eq!(empty.selection, None);
    }
}
