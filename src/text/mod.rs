//! Text core: offsets, ranges and the annotation layer
//!
//! This module knows nothing about markdown. It provides the half-open range
//! model every other layer shares.
//!
//! ## Modules
//!
//! - `range`: Half-open character ranges
//! - `index`: Character/byte offset conversion and clamped slicing
//! - `selection`: Selections reported by the presentation layer
//! - `annotations`: Annotation collection and the overlap check

pub mod range;
pub mod index;
pub mod selection;
pub mod annotations;

// Re-exports for convenience
pub use range::TextRange;
pub use index::TextIndex;
pub use selection::{preview, Selection};
pub use annotations::{overlaps, AnnotationLayer, Direction};
