//! Anchor drift detection
//!
//! An annotation stores the text it covered at creation. When the document
//! is edited before or inside that range, the stored offsets no longer point
//! at the same text. Offsets are never repaired; drift is only reported.

use serde::Serialize;

use super::DiagnosticMark;
use crate::models::Annotation;
use crate::text::TextIndex;

/// An annotation whose snapshot no longer matches the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorMismatch<'a> {
    pub annotation: &'a Annotation,
    /// Document text currently at the annotation's recorded range
    pub current_text: String,
}

/// Compare every annotation's snapshot against the document
///
/// Ranges past the end of the document are clamped before slicing.
pub fn find_mismatches<'a>(document: &str, annotations: &'a [Annotation]) -> Vec<AnchorMismatch<'a>> {
    let index = TextIndex::new(document);

    annotations
        .iter()
        .filter_map(|annotation| {
            let current = index.slice(annotation.range());
            (current != annotation.snapshot).then(|| AnchorMismatch {
                annotation,
                current_text: current.to_string(),
            })
        })
        .collect()
}

/// One warning mark per drifted annotation
pub fn anchor_diagnostics(document: &str, annotations: &[Annotation]) -> Vec<DiagnosticMark> {
    find_mismatches(document, annotations)
        .into_iter()
        .map(|mismatch| DiagnosticMark {
            range: mismatch.annotation.range(),
            annotation_id: mismatch.annotation.id.clone(),
            kind: "anchor_drift",
            message: format!(
                "Annotation {} expected {:?} but found {:?}",
                mismatch.annotation.id, mismatch.annotation.snapshot, mismatch.current_text
            ),
        })
        .collect()
}

/// User-facing summary line, `None` when nothing drifted
pub fn drift_summary(count: usize) -> Option<String> {
    (count > 0).then(|| format!("{} annotation(s) may not match the current text.", count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnnotationType;

    fn annotation(start: usize, end: usize, snapshot: &str) -> Annotation {
        Annotation {
            id: "a".to_string(),
            kind: AnnotationType::Edit,
            start,
            end,
            snapshot: snapshot.to_string(),
            comment: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_matching_anchor() {
        let annotations = vec![annotation(0, 5, "Hello")];
        assert!(find_mismatches("Hello world", &annotations).is_empty());
    }

    #[test]
    fn test_edit_before_range_drifts() {
        let annotations = vec![annotation(0, 5, "Hello")];
        let mismatches = find_mismatches("Hi world", &annotations);
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].current_text, "Hi wo");
    }

    #[test]
    fn test_range_past_end() {
        let annotations = vec![annotation(6, 11, "world")];
        let mismatches = find_mismatches("Hello", &annotations);
        assert_eq!(mismatches[0].current_text, "");
    }

    #[test]
    fn test_diagnostics_and_summary() {
        let annotations = vec![annotation(0, 5, "Hello")];
        let marks = anchor_diagnostics("Jello world", &annotations);
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].kind, "anchor_drift");
        assert_eq!(marks[0].message, "Annotation a expected \"Hello\" but found \"Jello\"");

        assert_eq!(drift_summary(0), None);
        assert_eq!(
            drift_summary(2).as_deref(),
            Some("2 annotation(s) may not match the current text.")
        );
    }
}
