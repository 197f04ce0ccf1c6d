#![forbid(unsafe_code)]

//! Geometric primitives.

/// Measured container size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check if either dimension is zero.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Clamp a signed offset into `[0, max]`.
#[inline]
#[must_use]
pub fn clamp_index(value: i64, max: usize) -> usize {
    if value <= 0 {
        0
    } else {
        (value as u64).min(max as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_when_any_side_is_zero() {
        assert!(Size::new(0, 10).is_empty());
        assert!(Size::new(10, 0).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }

    #[test]
    fn clamp_index_bounds() {
        assert_eq!(clamp_index(-5, 10), 0);
        assert_eq!(clamp_index(4, 10), 4);
        assert_eq!(clamp_index(40, 10), 10);
        assert_eq!(clamp_index(i64::MAX, usize::MAX), i64::MAX as usize);
        assert_eq!(clamp_index(i64::MAX, 1 << 40), 1 << 40);
    }
}
