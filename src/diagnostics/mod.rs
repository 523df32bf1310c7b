//! Diagnostics module for annotation consistency
//!
//! Diagnostics are advisory: they are reported to the user and never block
//! an edit or an export. Anchor drift is the first customer.

pub mod anchors;

use serde::Serialize;

use crate::models::Annotation;
use crate::text::TextRange;

pub use anchors::{anchor_diagnostics, drift_summary, find_mismatches, AnchorMismatch};

/// A diagnostic mark highlighting an issue over a document range
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticMark {
    pub range: TextRange,
    /// Annotation the mark is about
    pub annotation_id: String,
    /// Kind identifier (e.g., "anchor_drift")
    pub kind: &'static str,
    /// Human-readable message
    pub message: String,
}

/// Every mark for a session, plus the banner line
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub marks: Vec<DiagnosticMark>,
    pub summary: Option<String>,
}

impl Diagnostics {
    /// Run all checks over the document and its annotations
    pub fn collect(document: &str, annotations: &[Annotation]) -> Self {
        let marks = anchor_diagnostics(document, annotations);
        let summary = drift_summary(marks.len());
        Self { marks, summary }
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnnotationType;

    fn annotation(id: &str, start: usize, end: usize, snapshot: &str) -> Annotation {
        Annotation {
            id: id.to_string(),
            kind: AnnotationType::Note,
            start,
            end,
            snapshot: snapshot.to_string(),
            comment: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_collect_clean_document() {
        let annotations = vec![annotation("a", 0, 5, "Hello")];
        let diags = Diagnostics::collect("Hello world", &annotations);
        assert_eq!(diags, Diagnostics::default());
    }

    #[test]
    fn test_collect_drifted_document() {
        let annotations = vec![annotation("a", 0, 5, "Hello"), annotation("b", 6, 11, "world")];
        let diags = Diagnostics::collect("Hi world", &annotations);
        assert_eq!(diags.len(), 2);
        assert_eq!(diags.marks[0].annotation_id, "a");
        assert_eq!(diags.marks[1].range, TextRange::new(6, 11));
        assert_eq!(
            diags.summary.as_deref(),
            Some("2 annotation(s) may not match the current text.")
        );

        let json = serde_json::to_value(&diags).unwrap();
        assert_eq!(json["marks"][0]["annotationId"], "a");
        assert_eq!(json["marks"][0]["kind"], "anchor_drift");
    }
}
