#![forbid(unsafe_code)]

//! Byte model: the parsed, immutable buffer shown by the viewer.
//!
//! The viewer receives its data as hex text (`"48656c6c6f"` or
//! `"48 65 6c 6c 6f"`). [`ByteBuffer::from_hex`] decodes it once; every
//! other component reads bytes by index and derives [`ByteCode`] views on
//! demand.
//!
//! # Invariants
//!
//! - A parsed buffer is never empty and never mutated.
//! - `code(i)` is `Some` exactly when `i < len()`.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Only whitespace | [`DataError::Empty`] |
//! | Odd number of digits | [`DataError::OddLength`] |
//! | Non-hex character | [`DataError::InvalidDigit`] with its position |

use std::fmt;
use std::sync::Arc;

/// Byte classification used for colouring and text decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteClass {
    /// `0x00`.
    Null,
    /// Control bytes `0x01..=0x1F`.
    NonPrintable,
    /// Printable ASCII `0x20..=0x7E`.
    LowerAscii,
    /// `0x7F..=0xFF`.
    HigherAscii,
}

impl ByteClass {
    /// Classify a byte.
    #[must_use]
    pub const fn of(value: u8) -> Self {
        match value {
            0x00 => Self::Null,
            0x01..=0x1F => Self::NonPrintable,
            0x20..=0x7E => Self::LowerAscii,
            _ => Self::HigherAscii,
        }
    }

    /// Stable lowercase name, used as a style class by renderers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::NonPrintable => "non-printable",
            Self::LowerAscii => "lower-ascii",
            Self::HigherAscii => "higher-ascii",
        }
    }
}

/// Replacement characters for bytes that have no printable glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholders {
    /// Shown for [`ByteClass::Null`].
    pub null: char,
    /// Shown for [`ByteClass::NonPrintable`].
    pub non_printable: char,
    /// Shown for [`ByteClass::HigherAscii`].
    pub higher: char,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            null: '0',
            non_printable: '.',
            higher: '.',
        }
    }
}

impl Placeholders {
    /// Use one character for every non-printable class.
    #[must_use]
    pub const fn uniform(ch: char) -> Self {
        Self {
            null: ch,
            non_printable: ch,
            higher: ch,
        }
    }

    /// Character displayed for `value`.
    #[must_use]
    pub const fn decode(&self, value: u8) -> char {
        match ByteClass::of(value) {
            ByteClass::Null => self.null,
            ByteClass::NonPrintable => self.non_printable,
            ByteClass::LowerAscii => value as char,
            ByteClass::HigherAscii => self.higher,
        }
    }
}

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Two uppercase hex digits for a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexPair([u8; 2]);

impl HexPair {
    /// Encode a byte.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self([
            HEX_UPPER[(value >> 4) as usize],
            HEX_UPPER[(value & 0x0F) as usize],
        ])
    }

    /// The two digits as chars.
    #[must_use]
    pub const fn chars(self) -> [char; 2] {
        [self.0[0] as char, self.0[1] as char]
    }
}

impl fmt::Display for HexPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [hi, lo] = self.chars();
        write!(f, "{hi}{lo}")
    }
}

/// One byte of the buffer, viewed at its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteCode {
    /// Position in the buffer.
    pub index: usize,
    /// Raw value.
    pub value: u8,
    /// Classification of `value`.
    pub class: ByteClass,
}

impl ByteCode {
    /// Create a byte code for `value` at `index`.
    #[must_use]
    pub const fn new(index: usize, value: u8) -> Self {
        Self {
            index,
            value,
            class: ByteClass::of(value),
        }
    }

    /// Hex digits of the value.
    #[must_use]
    pub const fn hex_pair(&self) -> HexPair {
        HexPair::new(self.value)
    }

    /// Decoded character using the default placeholders.
    #[must_use]
    pub fn decoded_char(&self) -> char {
        Placeholders::default().decode(self.value)
    }

    /// Decoded character using custom placeholders.
    #[must_use]
    pub const fn decoded_with(&self, placeholders: &Placeholders) -> char {
        placeholders.decode(self.value)
    }
}

/// Errors produced while decoding hex input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// The input holds no hex digits.
    Empty,
    /// The input has an odd number of hex digits.
    OddLength {
        /// Number of digits found.
        digits: usize,
    },
    /// A character that is neither a hex digit nor whitespace.
    InvalidDigit {
        /// Byte offset of the character in the input.
        position: usize,
        /// The offending character.
        found: char,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "buffer is empty"),
            Self::OddLength { digits } => {
                write!(f, "hex data has an odd number of digits ({digits})")
            }
            Self::InvalidDigit { position, found } => {
                write!(f, "invalid hex digit {found:?} at offset {position}")
            }
        }
    }
}

impl std::error::Error for DataError {}

/// Value of one hex digit.
#[inline]
#[must_use]
pub const fn nibble(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None,
    }
}

/// Decode hex text into bytes, skipping ASCII whitespace.
///
/// Returns the bytes plus a trailing unpaired nibble, if any, so callers can
/// decide whether an odd digit count is an error.
pub fn decode_hex(text: &str) -> Result<(Vec<u8>, Option<u8>), DataError> {
    let mut out = Vec::with_capacity(text.len() / 2);
    let mut high: Option<u8> = None;
    for (position, ch) in text.char_indices() {
        if ch.is_ascii_whitespace() {
            continue;
        }
        let value = u8::try_from(ch)
            .ok()
            .and_then(nibble)
            .ok_or(DataError::InvalidDigit {
                position,
                found: ch,
            })?;
        match high.take() {
            Some(hi) => out.push((hi << 4) | value),
            None => high = Some(value),
        }
    }
    Ok((out, high))
}

/// Lowercase hex encoding without separators.
#[must_use]
pub fn encode_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        let [hi, lo] = HexPair::new(b).chars();
        out.push(hi.to_ascii_lowercase());
        out.push(lo.to_ascii_lowercase());
    }
    out
}

/// The immutable byte buffer. Clones share the same allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteBuffer {
    bytes: Arc<[u8]>,
}

impl ByteBuffer {
    /// Wrap raw bytes. Returns [`DataError::Empty`] for an empty slice.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, DataError> {
        let bytes: Vec<u8> = bytes.into();
        if bytes.is_empty() {
            return Err(DataError::Empty);
        }
        Ok(Self {
            bytes: bytes.into(),
        })
    }

    /// Parse hex text. Whitespace between digits is ignored.
    pub fn from_hex(text: &str) -> Result<Self, DataError> {
        let (bytes, rest) = decode_hex(text)?;
        if rest.is_some() {
            let digits = bytes.len() * 2 + 1;
            crate::warn!(digits, "rejecting hex data with odd digit count");
            return Err(DataError::OddLength { digits });
        }
        Self::from_bytes(bytes)
    }

    /// Number of bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false for a parsed buffer; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Raw value at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    /// Byte code at `index`.
    #[must_use]
    pub fn code(&self, index: usize) -> Option<ByteCode> {
        self.get(index).map(|value| ByteCode::new(index, value))
    }

    /// Byte codes for an inclusive index range, clipped to the buffer.
    pub fn codes(&self, start: usize, end: usize) -> impl Iterator<Item = ByteCode> + '_ {
        let stop = end.saturating_add(1).min(self.bytes.len());
        let start = start.min(stop);
        self.bytes[start..stop]
            .iter()
            .enumerate()
            .map(move |(offset, &value)| ByteCode::new(start + offset, value))
    }

    /// Largest valid index.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.bytes.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_boundaries() {
        assert_eq!(ByteClass::of(0x00), ByteClass::Null);
        assert_eq!(ByteClass::of(0x01), ByteClass::NonPrintable);
        assert_eq!(ByteClass::of(0x1F), ByteClass::NonPrintable);
        assert_eq!(ByteClass::of(0x20), ByteClass::LowerAscii);
        assert_eq!(ByteClass::of(0x7E), ByteClass::LowerAscii);
        assert_eq!(ByteClass::of(0x7F), ByteClass::HigherAscii);
        assert_eq!(ByteClass::of(0xFF), ByteClass::HigherAscii);
    }

    #[test]
    fn parses_contiguous_and_spaced_hex() {
        let a = ByteBuffer::from_hex("48656c6c6f").unwrap();
        let b = ByteBuffer::from_hex("48 65 6C 6c\n6f").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_bytes(), b"Hello");
        assert_eq!(a.len(), 5);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(ByteBuffer::from_hex(""), Err(DataError::Empty));
        assert_eq!(ByteBuffer::from_hex("  \n"), Err(DataError::Empty));
        assert_eq!(
            ByteBuffer::from_hex("abc"),
            Err(DataError::OddLength { digits: 3 })
        );
        assert_eq!(
            ByteBuffer::from_hex("4g"),
            Err(DataError::InvalidDigit {
                position: 1,
                found: 'g'
            })
        );
    }

    #[test]
    fn non_ascii_input_is_invalid() {
        let err = ByteBuffer::from_hex("4é").unwrap_err();
        assert!(matches!(err, DataError::InvalidDigit { position: 1, found: 'é' }));
    }

    #[test]
    fn byte_code_views() {
        let buf = ByteBuffer::from_hex("00 0a 41 ff").unwrap();
        let codes: Vec<_> = buf.codes(0, 10).collect();
        assert_eq!(codes.len(), 4);
        assert_eq!(codes[2].hex_pair().to_string(), "41");
        assert_eq!(codes[2].decoded_char(), 'A');
        assert_eq!(codes[0].decoded_char(), '0');
        assert_eq!(codes[1].decoded_char(), '.');
        assert_eq!(codes[3].hex_pair().to_string(), "FF");
        assert_eq!(codes[3].decoded_with(&Placeholders::uniform('·')), '·');
        assert!(buf.code(4).is_none());
    }

    #[test]
    fn codes_range_is_clipped() {
        let buf = ByteBuffer::from_bytes(b"abcdef".to_vec()).unwrap();
        let idx: Vec<_> = buf.codes(4, 100).map(|c| c.index).collect();
        assert_eq!(idx, vec![4, 5]);
        assert_eq!(buf.codes(9, 12).count(), 0);
    }

    #[test]
    fn encode_hex_is_lowercase() {
        assert_eq!(encode_hex(b"\x00\xAB"), "00ab");
    }

    #[test]
    fn display_messages() {
        assert_eq!(DataError::Empty.to_string(), "buffer is empty");
        assert!(
            DataError::OddLength { digits: 3 }
                .to_string()
                .contains("odd")
        );
    }
}
