//! Markdown Annotation Editor WASM Module
//!
//! Styling and annotation-overlay core for a markdown review editor. It
//! tokenizes markdown into style spans, partitions the document around
//! reviewer annotations, merges both layers into display nodes, and checks
//! annotation placement and anchoring.

pub mod text;
pub mod models;
pub mod markdown;
pub mod renderers;
pub mod diagnostics;
pub mod storage;
pub mod api;

// Re-export commonly used types
pub use markdown::{tokenize, Span, StyleClass};
pub use models::{Annotation, AnnotationType, AnnotationUpdate, Session, SessionError};
pub use renderers::{build_segments, merge_spans, DisplayNode, Segment};
pub use text::{overlaps, TextRange};
pub use diagnostics::{find_mismatches, AnchorMismatch};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Debug) {
            web_sys::console::warn_1(&format!("failed to initialize logger: {}", e).into());
        }
    }

    log::info!("Markdown annotation editor WASM module initialized");
}
