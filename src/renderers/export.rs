//! Annotated markdown export
//!
//! Produces the text handed to a reviewer: the document with inline
//! annotation markers, a JSON index of the annotations, and fixed
//! instructions describing the format.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::diagnostics::anchors::find_mismatches;
use crate::models::{Annotation, AnnotationType};
use crate::text::TextIndex;

pub const END_MARKER: &str = "<</ANN>>";
pub const INDEX_START: &str = "<!-- ANNOTATION_INDEX_START";
pub const INDEX_END: &str = "ANNOTATION_INDEX_END -->";

const INSTRUCTIONS: &str = "# Reviewer Instructions for Annotated Markdown

You are given a Markdown document with inline annotation markers:
- `<<ANN:id=... type=...>>` ... `<</ANN>>`

There is also an annotation index in a comment block.

Please follow this process exactly:

1. Parse all annotations and summarize them as proposed edits/questions.
2. FIRST show your suggested solutions for each annotation (grouped by annotation ID).
3. Do NOT rewrite the original document yet.
4. Wait for my approval or discussion.
5. After approval, rewrite the original Markdown document (without annotation markers unless I ask to keep them).
6. Finally, show a diff against the original document.
7. Respect all `type=keep` annotations as hard constraints.
8. For `type=ask`, propose options and recommend one.
9. For `type=del`, propose removal and note any surrounding text that may need adjustment.
10. For `type=note`, acknowledge the note but no change is needed unless the note implies one.

When suggesting changes, preserve Markdown structure and formatting.";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to serialize annotation index: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Where the instructions go in the full payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstructionsPosition {
    Top,
    Bottom,
}

/// Export settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    pub instructions_position: InstructionsPosition,
    pub include_index: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            instructions_position: InstructionsPosition::Top,
            include_index: true,
        }
    }
}

/// Opening marker for one annotation
pub fn start_marker(annotation: &Annotation) -> String {
    format!("<<ANN:id={} type={}>>", annotation.id, annotation.kind)
}

/// Round a byte offset down to the nearest char boundary
fn floor_boundary(text: &str, mut byte: usize) -> usize {
    byte = byte.min(text.len());
    while !text.is_char_boundary(byte) {
        byte -= 1;
    }
    byte
}

/// Insert markers around every annotation
///
/// Annotations are processed in descending start order so each insertion
/// lands after every offset still to be processed. Overlapping annotations
/// give unspecified (but non-panicking) output.
pub fn annotated_markdown(document: &str, annotations: &[Annotation]) -> String {
    if annotations.is_empty() {
        return document.to_string();
    }

    let index = TextIndex::new(document);
    let mut sorted: Vec<&Annotation> = annotations.iter().collect();
    sorted.sort_by(|a, b| b.start.cmp(&a.start));

    let mut result = document.to_string();
    for annotation in sorted {
        let end = floor_boundary(&result, index.byte_offset(annotation.end));
        result.insert_str(end, END_MARKER);
        let start = floor_boundary(&result, index.byte_offset(annotation.start));
        result.insert_str(start, &start_marker(annotation));
    }
    result
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexEntry<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: AnnotationType,
    selected_text: &'a str,
    comment: &'a str,
}

/// JSON index of the annotations in document order, wrapped in a comment
pub fn annotation_index(annotations: &[Annotation]) -> Result<String, ExportError> {
    let mut sorted: Vec<&Annotation> = annotations.iter().collect();
    sorted.sort_by_key(|a| a.start);

    let entries: Vec<IndexEntry> = sorted
        .into_iter()
        .map(|a| IndexEntry {
            id: &a.id,
            kind: a.kind,
            selected_text: &a.snapshot,
            comment: &a.comment,
        })
        .collect();

    let json = serde_json::to_string_pretty(&entries)?;
    Ok(format!("{}\n{}\n{}", INDEX_START, json, INDEX_END))
}

/// Fixed reviewer instructions for the annotated format
pub fn instructions() -> &'static str {
    INSTRUCTIONS
}

/// Assemble instructions, annotated document and index
///
/// Stale anchors are logged but never block the export.
pub fn full_payload(
    document: &str,
    annotations: &[Annotation],
    options: &ExportOptions,
) -> Result<String, ExportError> {
    let drifted = find_mismatches(document, annotations).len();
    if drifted > 0 {
        log::warn!("exporting with {} annotation(s) that may have shifted", drifted);
    }

    let mut parts: Vec<String> = Vec::new();

    if options.instructions_position == InstructionsPosition::Top {
        parts.push(INSTRUCTIONS.to_string());
        parts.push("---\n".to_string());
    }

    parts.push("# Annotated Document\n".to_string());
    parts.push(annotated_markdown(document, annotations));

    if options.include_index {
        parts.push("\n\n---\n".to_string());
        parts.push(annotation_index(annotations)?);
    }

    if options.instructions_position == InstructionsPosition::Bottom {
        parts.push("\n\n---\n".to_string());
        parts.push(INSTRUCTIONS.to_string());
    }

    Ok(parts.join("\n"))
}
