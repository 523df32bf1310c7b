//! Half-open character ranges
//!
//! Pure offset arithmetic with no markdown or annotation knowledge.

use serde::{Deserialize, Serialize};

/// A range of text from start (inclusive) to end (exclusive)
///
/// Offsets count Unicode scalar values, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a range covering a single character
    pub fn single_char(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    /// Empty or inverted ranges cover nothing
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Length in characters (0 for inverted ranges)
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if a position is contained within this range
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Half-open intersection: touching ranges do not intersect
    ///
    /// An empty range strictly inside `other` does intersect it.
    pub fn intersects(&self, other: &TextRange) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Check if this range fully covers `other`
    pub fn covers(&self, other: &TextRange) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Clamp both ends into `[0, len]`, collapsing inverted ranges to empty
    pub fn clamp_to(&self, len: usize) -> TextRange {
        let start = self.start.min(len);
        let end = self.end.min(len).max(start);
        TextRange { start, end }
    }
}

impl From<std::ops::Range<usize>> for TextRange {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_ranges_do_not_intersect() {
        let a = TextRange::new(0, 5);
        let b = TextRange::new(5, 8);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
        assert!(a.intersects(&TextRange::new(3, 8)));
    }

    #[test]
    fn test_empty_range_inside_other_intersects() {
        // Plain interval formula; callers drop empty ranges before checking
        let empty = TextRange::new(3, 3);
        assert!(empty.is_empty());
        assert!(empty.intersects(&TextRange::new(0, 10)));
        assert!(!empty.intersects(&TextRange::new(3, 10)));
        assert!(!empty.intersects(&TextRange::new(0, 3)));
    }

    #[test]
    fn test_inverted_range() {
        let inverted = TextRange::new(7, 2);
        assert!(inverted.is_empty());
        assert_eq!(inverted.len(), 0);
        assert_eq!(inverted.clamp_to(10), TextRange::new(7, 7));
    }

    #[test]
    fn test_clamp_past_end() {
        assert_eq!(TextRange::new(4, 20).clamp_to(6), TextRange::new(4, 6));
        assert_eq!(TextRange::new(9, 20).clamp_to(6), TextRange::new(6, 6));
    }

    #[test]
    fn test_covers() {
        let outer = TextRange::new(2, 10);
        assert!(outer.covers(&TextRange::new(2, 10)));
        assert!(outer.covers(&TextRange::new(4, 6)));
        assert!(!outer.covers(&TextRange::new(1, 6)));
    }
}
