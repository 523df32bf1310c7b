//! Segment builder
//!
//! Partitions the document into plain and annotation-bound segments in
//! ascending start order. Annotations are assumed mutually non-overlapping;
//! that invariant is established when they are created and is not checked
//! again here.

use serde::Serialize;

use crate::models::Annotation;
use crate::text::{TextIndex, TextRange};

/// A contiguous slice of the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment<'a> {
    pub text: &'a str,
    pub range: TextRange,
    pub annotation: Option<&'a Annotation>,
}

impl<'a> Segment<'a> {
    fn plain(index: &TextIndex<'a>, range: TextRange) -> Self {
        Self {
            text: index.slice(range),
            range,
            annotation: None,
        }
    }

    pub fn is_annotated(&self) -> bool {
        self.annotation.is_some()
    }

    /// Start offset of the segment in the document
    pub fn offset(&self) -> usize {
        self.range.start
    }
}

/// Split `document` into segments around `annotations`
///
/// Without annotations the whole document (even an empty one) is a single
/// plain segment. Annotation ranges are clamped to the document so stale
/// offsets cannot slice past the end.
pub fn build_segments<'a>(document: &'a str, annotations: &'a [Annotation]) -> Vec<Segment<'a>> {
    let index = TextIndex::new(document);
    let len = index.char_len();

    if annotations.is_empty() {
        return vec![Segment::plain(&index, TextRange::new(0, len))];
    }

    let mut sorted: Vec<&Annotation> = annotations.iter().collect();
    sorted.sort_by_key(|a| a.start);

    let mut segments = Vec::with_capacity(sorted.len() * 2 + 1);
    let mut cursor = 0;

    for annotation in sorted {
        let range = annotation.range().clamp_to(len);
        if range.start > cursor {
            segments.push(Segment::plain(&index, TextRange::new(cursor, range.start)));
        }
        segments.push(Segment {
            text: index.slice(range),
            range,
            annotation: Some(annotation),
        });
        cursor = range.end;
    }

    if cursor < len {
        segments.push(Segment::plain(&index, TextRange::new(cursor, len)));
    }

    segments
}
