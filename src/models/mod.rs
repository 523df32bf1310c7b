//! Models module for the annotation editor
//!
//! This module contains the data models: annotations, the session value
//! and the errors its commands can return.

pub mod annotation;
pub mod errors;
pub mod session;

// Re-export commonly used types
pub use annotation::{Annotation, AnnotationType};
pub use errors::SessionError;
pub use session::{timestamp, AnnotationUpdate, RenderedSegment, Session, Transition};
