#![forbid(unsafe_code)]

//! Query encoding.
//!
//! A text query can sit in a binary in several layouts. This module expands a
//! query into every byte sequence the current [`SearchMode`] asks for:
//!
//! | Kind   | Encoding | Candidates                          |
//! |--------|----------|-------------------------------------|
//! | Hex    | any      | decoded hex pairs                   |
//! | Text   | `Bit8`   | UTF-8                               |
//! | Text   | `Bit16`  | UTF-16LE, UTF-16BE                  |
//! | Text   | `Both`   | UTF-8, UTF-16LE, UTF-16BE           |
//! | Cursor | any      | none (the query is an offset)       |
//!
//! With [`TextSpan::Wide`] one zero unit is inserted between characters, so
//! `"ab"` in 8-bit becomes `61 00 62`.

use hexview_core::bytes::decode_hex;
use smallvec::SmallVec;

/// What the query means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchKind {
    /// Query is a byte offset to jump to.
    Cursor,
    /// Query is hex pairs.
    Hex,
    /// Query is text.
    #[default]
    Text,
}

impl SearchKind {
    pub const ALL: [SearchKind; 3] = [SearchKind::Cursor, SearchKind::Hex, SearchKind::Text];

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cursor => "cursor",
            Self::Hex => "hex",
            Self::Text => "text",
        }
    }

    /// Parse a name produced by [`as_str`](Self::as_str).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl std::fmt::Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Character encodings tried for text queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    #[default]
    Bit8,
    Bit16,
    Both,
}

/// Spacing between characters of a text query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextSpan {
    /// Characters are adjacent.
    #[default]
    Direct,
    /// One zero unit between characters.
    Wide,
}

/// Full search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SearchMode {
    pub kind: SearchKind,
    pub encoding: Encoding,
    pub span: TextSpan,
}

impl SearchMode {
    #[must_use]
    pub const fn new(kind: SearchKind) -> Self {
        Self {
            kind,
            encoding: Encoding::Bit8,
            span: TextSpan::Direct,
        }
    }

    #[must_use]
    pub const fn text() -> Self {
        Self::new(SearchKind::Text)
    }

    #[must_use]
    pub const fn hex() -> Self {
        Self::new(SearchKind::Hex)
    }

    #[must_use]
    pub const fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    #[must_use]
    pub const fn with_span(mut self, span: TextSpan) -> Self {
        self.span = span;
        self
    }
}

/// Candidate needles for a query; at most three.
pub type Candidates = SmallVec<[Vec<u8>; 3]>;

#[derive(Clone, Copy)]
enum Unit {
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl Unit {
    const fn width(self) -> usize {
        match self {
            Self::Utf8 => 1,
            Self::Utf16Le | Self::Utf16Be => 2,
        }
    }

    fn push_char(self, ch: char, out: &mut Vec<u8>) {
        match self {
            Self::Utf8 => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            Self::Utf16Le => {
                let mut buf = [0u16; 2];
                for unit in ch.encode_utf16(&mut buf) {
                    out.extend_from_slice(&unit.to_le_bytes());
                }
            }
            Self::Utf16Be => {
                let mut buf = [0u16; 2];
                for unit in ch.encode_utf16(&mut buf) {
                    out.extend_from_slice(&unit.to_be_bytes());
                }
            }
        }
    }
}

fn encode_text(query: &str, unit: Unit, span: TextSpan) -> Vec<u8> {
    let mut out = Vec::with_capacity(query.len() * unit.width() * 2);
    for (i, ch) in query.chars().enumerate() {
        if i > 0 && span == TextSpan::Wide {
            out.resize(out.len() + unit.width(), 0);
        }
        unit.push_char(ch, &mut out);
    }
    out
}

/// Expand `query` into the byte sequences to look for.
///
/// Empty queries, cursor queries and malformed hex produce no candidates.
#[must_use]
pub fn candidates(query: &str, mode: SearchMode) -> Candidates {
    let mut out = Candidates::new();
    if query.is_empty() {
        return out;
    }
    match mode.kind {
        SearchKind::Cursor => {}
        SearchKind::Hex => {
            // A trailing half byte is still being typed; match on what is complete.
            match decode_hex(query) {
                Ok((bytes, _)) if !bytes.is_empty() => out.push(bytes),
                _ => {}
            }
        }
        SearchKind::Text => {
            let units: &[Unit] = match mode.encoding {
                Encoding::Bit8 => &[Unit::Utf8],
                Encoding::Bit16 => &[Unit::Utf16Le, Unit::Utf16Be],
                Encoding::Both => &[Unit::Utf8, Unit::Utf16Le, Unit::Utf16Be],
            };
            for &unit in units {
                let needle = encode_text(query, unit, mode.span);
                if !out.contains(&needle) {
                    out.push(needle);
                }
            }
        }
    }
    out
}

/// Parse a cursor query: decimal, or hex with a `0x` prefix.
#[must_use]
pub fn parse_offset(query: &str) -> Option<usize> {
    let query = query.trim();
    match query
        .strip_prefix("0x")
        .or_else(|| query.strip_prefix("0X"))
    {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => query.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_bit_text() {
        let c = candidates("ll", SearchMode::text());
        assert_eq!(c.as_slice(), &[b"ll".to_vec()]);
    }

    #[test]
    fn sixteen_bit_text_has_both_endians() {
        let c = candidates("ab", SearchMode::text().with_encoding(Encoding::Bit16));
        assert_eq!(
            c.as_slice(),
            &[vec![0x61, 0, 0x62, 0], vec![0, 0x61, 0, 0x62]]
        );
    }

    #[test]
    fn both_has_three_candidates() {
        let c = candidates("a", SearchMode::text().with_encoding(Encoding::Both));
        assert_eq!(c.len(), 3);
        assert_eq!(c[0], vec![0x61]);
    }

    #[test]
    fn wide_span_pads_between_characters() {
        let c = candidates("abc", SearchMode::text().with_span(TextSpan::Wide));
        assert_eq!(c[0], vec![0x61, 0, 0x62, 0, 0x63]);

        let c = candidates(
            "ab",
            SearchMode::text()
                .with_encoding(Encoding::Bit16)
                .with_span(TextSpan::Wide),
        );
        assert_eq!(c[0], vec![0x61, 0, 0, 0, 0x62, 0]);
    }

    #[test]
    fn hex_query_decoding() {
        assert_eq!(candidates("de AD be", SearchMode::hex())[0], vec![0xDE, 0xAD, 0xBE]);
        // Trailing nibble ignored.
        assert_eq!(candidates("dea", SearchMode::hex())[0], vec![0xDE]);
        assert!(candidates("d", SearchMode::hex()).is_empty());
        assert!(candidates("zz", SearchMode::hex()).is_empty());
    }

    #[test]
    fn cursor_and_empty_have_no_candidates() {
        assert!(candidates("12", SearchMode::new(SearchKind::Cursor)).is_empty());
        assert!(candidates("", SearchMode::text()).is_empty());
    }

    #[test]
    fn offsets() {
        assert_eq!(parse_offset("42"), Some(42));
        assert_eq!(parse_offset(" 0x2A "), Some(42));
        assert_eq!(parse_offset("0X2a"), Some(42));
        assert_eq!(parse_offset("-1"), None);
        assert_eq!(parse_offset("0x"), None);
        assert_eq!(parse_offset("abc"), None);
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in SearchKind::ALL {
            assert_eq!(SearchKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(SearchKind::parse("TEXT"), None);
    }
}
