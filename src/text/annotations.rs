//! Annotation layer over the document text
//!
//! Stores annotations separately from the text, linked by character ranges.
//! Unlike cursor-tracking layers, ranges here are frozen at creation time:
//! edits before an annotation shift the text under it, and the drift is
//! reported by the anchor diagnostics rather than repaired.

use serde::{Deserialize, Serialize};

use super::range::TextRange;
use crate::models::Annotation;

/// Check whether `candidate` intersects any annotation other than `exclude_id`
///
/// Standard half-open intersection: an annotation ending exactly where the
/// candidate starts (or the reverse) does not overlap.
pub fn overlaps(candidate: TextRange, annotations: &[Annotation], exclude_id: Option<&str>) -> bool {
    annotations
        .iter()
        .filter(|a| Some(a.id.as_str()) != exclude_id)
        .any(|a| candidate.intersects(&a.range()))
}

/// Direction for stepping through annotations in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Previous,
}

/// The annotation collection of a session
///
/// Insertion order is preserved; callers that need document order use
/// [`AnnotationLayer::sorted`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationLayer {
    annotations: Vec<Annotation>,
}

impl AnnotationLayer {
    /// Create a new empty annotation layer
    pub fn new() -> Self {
        Self {
            annotations: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn as_slice(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Annotation> {
        self.annotations.iter_mut().find(|a| a.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Check a candidate range against every stored annotation
    pub fn overlaps(&self, candidate: TextRange, exclude_id: Option<&str>) -> bool {
        overlaps(candidate, &self.annotations, exclude_id)
    }

    /// Append an annotation
    ///
    /// No overlap check happens here; session commands run the check first.
    pub fn push(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// Remove an annotation by id
    pub fn remove(&mut self, id: &str) -> Option<Annotation> {
        let index = self.annotations.iter().position(|a| a.id == id)?;
        Some(self.annotations.remove(index))
    }

    /// Annotations in ascending start order (stable for equal starts)
    pub fn sorted(&self) -> Vec<&Annotation> {
        let mut sorted: Vec<&Annotation> = self.annotations.iter().collect();
        sorted.sort_by_key(|a| a.start);
        sorted
    }

    /// The annotation whose range contains `pos`, if any
    pub fn at(&self, pos: usize) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.range().contains(pos))
    }

    /// Step from one annotation to its neighbour in document order
    ///
    /// Wraps around at both ends. Returns `None` when `from_id` is unknown
    /// or there is nothing else to step to.
    pub fn navigate(&self, from_id: &str, direction: Direction) -> Option<&Annotation> {
        let sorted = self.sorted();
        if sorted.len() < 2 {
            return None;
        }

        let current = sorted.iter().position(|a| a.id == from_id)?;
        let next = match direction {
            Direction::Next => (current + 1) % sorted.len(),
            Direction::Previous => (current + sorted.len() - 1) % sorted.len(),
        };
        sorted.get(next).copied()
    }
}

impl From<Vec<Annotation>> for AnnotationLayer {
    fn from(annotations: Vec<Annotation>) -> Self {
        Self { annotations }
    }
}
