//! Annotation records
//!
//! An annotation binds a user comment to a half-open character range of the
//! document, together with a snapshot of the text it covered when it was
//! created. Offsets are never re-anchored after the document changes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::SessionError;
use crate::text::TextRange;

/// What the reviewer wants done with the annotated text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationType {
    Edit,
    Ask,
    Keep,
    Del,
    Note,
}

impl AnnotationType {
    pub const ALL: [AnnotationType; 5] = [
        AnnotationType::Edit,
        AnnotationType::Ask,
        AnnotationType::Keep,
        AnnotationType::Del,
        AnnotationType::Note,
    ];

    /// Wire name, as used in export markers and persisted sessions
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationType::Edit => "edit",
            AnnotationType::Ask => "ask",
            AnnotationType::Keep => "keep",
            AnnotationType::Del => "del",
            AnnotationType::Note => "note",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnnotationType::Edit => "Edit",
            AnnotationType::Ask => "Ask",
            AnnotationType::Keep => "Keep",
            AnnotationType::Del => "Delete",
            AnnotationType::Note => "Note",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AnnotationType::Edit => "Request a change to this text",
            AnnotationType::Ask => "Ask a question about this text",
            AnnotationType::Keep => "Mark this text as must not change",
            AnnotationType::Del => "Request deletion of this text",
            AnnotationType::Note => "Add a note about this text",
        }
    }

    /// CSS class applied to segments bound to an annotation of this type
    pub fn css_class(&self) -> &'static str {
        match self {
            AnnotationType::Edit => "ann-edit",
            AnnotationType::Ask => "ann-ask",
            AnnotationType::Keep => "ann-keep",
            AnnotationType::Del => "ann-del",
            AnnotationType::Note => "ann-note",
        }
    }
}

impl fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnnotationType {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnnotationType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SessionError::UnknownType(s.to_string()))
    }
}

/// A single annotation
///
/// Field names on the wire match the persisted session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AnnotationType,
    #[serde(rename = "selectionStart")]
    pub start: usize,
    #[serde(rename = "selectionEnd")]
    pub end: usize,
    /// Document text at `start..end` when the annotation was created
    #[serde(rename = "selectedTextSnapshot")]
    pub snapshot: String,
    pub comment: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Annotation {
    /// Get the range covered by this annotation
    pub fn range(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_round_trips_through_str() {
        for kind in AnnotationType::ALL {
            assert_eq!(kind.as_str().parse::<AnnotationType>().unwrap(), kind);
        }
        assert!("rewrite".parse::<AnnotationType>().is_err());
    }

    #[test]
    fn test_type_metadata() {
        assert_eq!(AnnotationType::Del.label(), "Delete");
        assert_eq!(AnnotationType::Keep.css_class(), "ann-keep");
        assert_eq!(AnnotationType::Ask.to_string(), "ask");
    }

    #[test]
    fn test_annotation_wire_format() {
        let annotation = Annotation {
            id: "abc12345".to_string(),
            kind: AnnotationType::Note,
            start: 0,
            end: 5,
            snapshot: "Hello".to_string(),
            comment: "greeting".to_string(),
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
            updated_at: "2024-01-01T00:00:00+00:00".to_string(),
        };

        let json = serde_json::to_value(&annotation).unwrap();
        assert_eq!(json["type"], "note");
        assert_eq!(json["selectionStart"], 0);
        assert_eq!(json["selectionEnd"], 5);
        assert_eq!(json["selectedTextSnapshot"], "Hello");
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00+00:00");

        let back: Annotation = serde_json::from_value(json).unwrap();
        assert_eq!(back, annotation);
    }
}
