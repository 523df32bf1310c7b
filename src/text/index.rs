//! Character/byte offset conversion
//!
//! Every offset exposed by the crate is a character offset. Rust strings
//! (and regex matches) are indexed by bytes, so slicing goes through a
//! `TextIndex` built once per document version.

use super::range::TextRange;

/// Byte offset of every character start in a text, plus the text length
#[derive(Debug, Clone)]
pub struct TextIndex<'a> {
    text: &'a str,
    starts: Vec<usize>,
}

impl<'a> TextIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut starts: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
        starts.push(text.len());
        Self { text, starts }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Number of characters in the text
    pub fn char_len(&self) -> usize {
        self.starts.len() - 1
    }

    /// Byte offset of a character position, clamped to the text end
    pub fn byte_offset(&self, pos: usize) -> usize {
        self.starts[pos.min(self.char_len())]
    }

    /// Character position of a byte offset
    ///
    /// A byte inside a multi-byte character maps to the following character.
    pub fn char_offset(&self, byte: usize) -> usize {
        match self.starts.binary_search(&byte) {
            Ok(pos) => pos,
            Err(pos) => pos.min(self.char_len()),
        }
    }

    /// Character range of a byte range
    pub fn char_range(&self, bytes: std::ops::Range<usize>) -> TextRange {
        TextRange::new(self.char_offset(bytes.start), self.char_offset(bytes.end))
    }

    /// Slice by character range; out-of-range offsets are clamped
    pub fn slice(&self, range: TextRange) -> &'a str {
        let range = range.clamp_to(self.char_len());
        &self.text[self.byte_offset(range.start)..self.byte_offset(range.end)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_offsets() {
        let index = TextIndex::new("hello");
        assert_eq!(index.char_len(), 5);
        assert_eq!(index.byte_offset(3), 3);
        assert_eq!(index.char_offset(3), 3);
        assert_eq!(index.slice(TextRange::new(1, 4)), "ell");
    }

    #[test]
    fn test_multibyte_offsets() {
        // 'é' is two bytes, '→' is three
        let index = TextIndex::new("é→x");
        assert_eq!(index.char_len(), 3);
        assert_eq!(index.byte_offset(1), 2);
        assert_eq!(index.byte_offset(2), 5);
        assert_eq!(index.char_offset(5), 2);
        assert_eq!(index.char_offset(3), 2);
        assert_eq!(index.slice(TextRange::new(1, 3)), "→x");
    }

    #[test]
    fn test_slice_clamps() {
        let index = TextIndex::new("Hi world");
        assert_eq!(index.slice(TextRange::new(3, 50)), "world");
        assert_eq!(index.slice(TextRange::new(50, 60)), "");
        assert_eq!(index.slice(TextRange::new(5, 2)), "");
    }

    #[test]
    fn test_empty_text() {
        let index = TextIndex::new("");
        assert_eq!(index.char_len(), 0);
        assert_eq!(index.slice(TextRange::new(0, 3)), "");
    }
}
