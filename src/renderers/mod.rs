//! Renderers module for the annotation editor
//!
//! Turns the document, its spans and its annotations into output: display
//! nodes for the editor view and annotated markdown for export.

pub mod segments;
pub mod display_list;
pub mod export;

// Re-export commonly used types
pub use segments::{build_segments, Segment};
pub use display_list::{merge_spans, DisplayNode};
pub use export::{annotated_markdown, full_payload, ExportError, ExportOptions, InstructionsPosition};
