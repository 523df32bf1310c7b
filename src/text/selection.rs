//! Selection state fed back from the presentation layer
//!
//! The presentation layer reports selections as raw character offsets into
//! the current document. Collapsed and inverted selections carry nothing to
//! annotate and are dropped here.

use serde::{Deserialize, Serialize};

use super::index::TextIndex;
use super::range::TextRange;

/// A non-empty selection with the text it covered when it was made
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub range: TextRange,
    pub text: String,
}

impl Selection {
    /// Build a selection from presentation offsets
    ///
    /// Returns `None` for collapsed (`start == end`) or inverted selections.
    /// Offsets past the end of the document are clamped.
    pub fn from_offsets(document: &str, start: usize, end: usize) -> Option<Selection> {
        if end <= start {
            return None;
        }

        let index = TextIndex::new(document);
        let range = TextRange::new(start, end).clamp_to(index.char_len());
        if range.is_empty() {
            return None;
        }

        Some(Selection {
            range,
            text: index.slice(range).to_string(),
        })
    }
}

/// Truncate `text` to `max_chars` characters, appending an ellipsis when cut
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push('…');
    truncated
}
