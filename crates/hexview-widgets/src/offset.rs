#![forbid(unsafe_code)]

//! Offset column formatting.

/// Radix of the offset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OffsetBase {
    Octal,
    Decimal,
    #[default]
    Hex,
}

impl OffsetBase {
    #[must_use]
    pub const fn radix(self) -> u32 {
        match self {
            Self::Octal => 8,
            Self::Decimal => 10,
            Self::Hex => 16,
        }
    }

    /// Base for a radix; only 8, 10 and 16 are supported.
    #[must_use]
    pub const fn from_radix(radix: u32) -> Option<Self> {
        match radix {
            8 => Some(Self::Octal),
            10 => Some(Self::Decimal),
            16 => Some(Self::Hex),
            _ => None,
        }
    }
}

/// How the offset column renders a row's first byte index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetFormat {
    pub base: OffsetBase,
    /// Minimum digits; shorter values are zero-padded.
    pub width: usize,
}

impl Default for OffsetFormat {
    fn default() -> Self {
        Self {
            base: OffsetBase::Hex,
            width: 8,
        }
    }
}

impl OffsetFormat {
    #[must_use]
    pub fn format(&self, offset: usize) -> String {
        let width = self.width;
        match self.base {
            OffsetBase::Octal => format!("{offset:0width$o}"),
            OffsetBase::Decimal => format!("{offset:0width$}"),
            OffsetBase::Hex => format!("{offset:0width$X}"),
        }
    }
}
