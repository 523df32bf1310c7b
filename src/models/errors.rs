//! Error types for session commands
//!
//! None of these are fatal: a rejected command hands back the unchanged
//! session alongside the error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Candidate range intersects an existing annotation
    #[error("Selection overlaps with an existing annotation ({start}..{end})")]
    Overlap { start: usize, end: usize },

    /// Candidate range reaches past the end of the document
    #[error("Selection end {end} is past the end of the document (length {len})")]
    OutOfBounds { end: usize, len: usize },

    /// No annotation with this id
    #[error("Annotation not found: {0}")]
    NotFound(String),

    /// Annotation type name not recognized
    #[error("Unknown annotation type: {0}")]
    UnknownType(String),
}
