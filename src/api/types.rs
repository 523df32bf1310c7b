//! Shared types for the WASM API
//!
//! Result structures returned to JavaScript by the command functions.

use serde::{Deserialize, Serialize};

use crate::models::{Annotation, AnnotationType, SessionError};
use crate::text::preview;

/// Result of a mutation: `{ success, error? }`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CommandResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> From<&Result<T, SessionError>> for CommandResult {
    fn from(result: &Result<T, SessionError>) -> Self {
        match result {
            Ok(_) => Self {
                success: true,
                error: None,
            },
            Err(err) => Self {
                success: false,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Result of `addAnnotation`
///
/// `success` with no `id` means the selection was empty and nothing was
/// created.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AddAnnotationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<Option<String>, SessionError>> for AddAnnotationResult {
    fn from(result: Result<Option<String>, SessionError>) -> Self {
        match result {
            Ok(id) => Self {
                success: true,
                id,
                error: None,
            },
            Err(err) => Self {
                success: false,
                id: None,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Anchor drift report for the banner and export warning
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MismatchReport<'a> {
    pub count: usize,
    pub summary: Option<String>,
    pub mismatches: Vec<crate::diagnostics::AnchorMismatch<'a>>,
}

/// Entry of the annotation type picker
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationTypeInfo {
    #[serde(rename = "type")]
    pub kind: AnnotationType,
    pub label: &'static str,
    pub description: &'static str,
    pub css_class: &'static str,
}

impl From<AnnotationType> for AnnotationTypeInfo {
    fn from(kind: AnnotationType) -> Self {
        Self {
            kind,
            label: kind.label(),
            description: kind.description(),
            css_class: kind.css_class(),
        }
    }
}

/// Row of the annotation list, in document order
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationListItem<'a> {
    pub id: &'a str,
    #[serde(rename = "type")]
    pub kind: AnnotationType,
    pub label: &'static str,
    pub start: usize,
    pub end: usize,
    /// Truncated snapshot of the annotated text
    pub text_preview: String,
    /// Truncated comment
    pub comment_preview: String,
}

impl<'a> AnnotationListItem<'a> {
    pub fn new(annotation: &'a Annotation, max_chars: usize) -> Self {
        Self {
            id: &annotation.id,
            kind: annotation.kind,
            label: annotation.kind.label(),
            start: annotation.start,
            end: annotation.end,
            text_preview: preview(&annotation.snapshot, max_chars),
            comment_preview: preview(&annotation.comment, max_chars),
        }
    }
}
