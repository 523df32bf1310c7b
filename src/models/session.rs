//! The document session value
//!
//! A session is the single logical resource of the editor: the document text
//! and its annotations. It is a plain value. Commands consume the current
//! session and hand back the next one together with their result, so a
//! caller holding the value in one place applies mutations one at a time and
//! derives spans, segments and diagnostics from a settled version.

use serde::{Deserialize, Serialize};

use super::annotation::{Annotation, AnnotationType};
use super::errors::SessionError;
use crate::diagnostics::{find_mismatches, AnchorMismatch, Diagnostics};
use crate::markdown::{tokenize, Span};
use crate::renderers::display_list::{merge_spans, DisplayNode};
use crate::renderers::segments::{build_segments, Segment};
use crate::text::{AnnotationLayer, Direction, TextIndex, TextRange};

/// Next session value plus the command result
pub type Transition<T> = (Session, Result<T, SessionError>);

/// Current time as an RFC 3339 UTC string
pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Fields that can change without touching the range
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationUpdate {
    #[serde(rename = "type")]
    pub kind: Option<AnnotationType>,
    pub comment: Option<String>,
}

/// A segment with its merged display nodes
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedSegment<'a> {
    #[serde(flatten)]
    pub segment: Segment<'a>,
    /// `ann-<type>` class for annotated segments
    pub annotation_class: Option<&'static str>,
    pub nodes: Vec<DisplayNode>,
}

/// Persisted record: `{ markdown, annotations, updatedAt }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "markdown")]
    pub document: String,
    pub annotations: AnnotationLayer,
    pub updated_at: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self {
            document: String::new(),
            annotations: AnnotationLayer::new(),
            updated_at: timestamp(),
        }
    }

    pub fn from_document(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            ..Self::new()
        }
    }

    fn touch(mut self) -> Self {
        self.updated_at = timestamp();
        self
    }

    /// Unused 8-character id
    fn generate_id(&self) -> String {
        loop {
            let uuid = uuid::Uuid::new_v4().simple().to_string();
            let id = uuid[..8].to_string();
            if !self.annotations.contains_id(&id) {
                return id;
            }
        }
    }

    /// Check a candidate range for creation or replacement
    fn check_range(&self, range: TextRange, exclude_id: Option<&str>) -> Result<(), SessionError> {
        let len = TextIndex::new(&self.document).char_len();
        if range.end > len {
            return Err(SessionError::OutOfBounds { end: range.end, len });
        }
        if self.annotations.overlaps(range, exclude_id) {
            return Err(SessionError::Overlap {
                start: range.start,
                end: range.end,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Replace the document text
    ///
    /// Annotation offsets are left as they are, even if they now point at
    /// different text; see [`Session::mismatches`].
    pub fn set_document(mut self, document: impl Into<String>) -> Self {
        self.document = document.into();
        self.touch()
    }

    /// Create an annotation over `range`
    ///
    /// Empty or inverted ranges are a no-op (`Ok(None)`). Overlapping or
    /// out-of-bounds ranges are rejected and the session comes back
    /// unchanged.
    pub fn add_annotation(self, range: TextRange, kind: AnnotationType, comment: impl Into<String>) -> Transition<Option<String>> {
        if range.is_empty() {
            log::debug!("ignoring empty annotation range {}..{}", range.start, range.end);
            return (self, Ok(None));
        }
        if let Err(err) = self.check_range(range, None) {
            log::debug!("rejected annotation: {}", err);
            return (self, Err(err));
        }

        let now = timestamp();
        let annotation = Annotation {
            id: self.generate_id(),
            kind,
            start: range.start,
            end: range.end,
            snapshot: TextIndex::new(&self.document).slice(range).to_string(),
            comment: comment.into(),
            created_at: now.clone(),
            updated_at: now,
        };
        let id = annotation.id.clone();

        let mut next = self;
        next.annotations.push(annotation);
        (next.touch(), Ok(Some(id)))
    }

    /// Change the type and/or comment of an annotation
    pub fn update_annotation(mut self, id: &str, update: AnnotationUpdate) -> Transition<()> {
        match self.annotations.get_mut(id) {
            Some(annotation) => {
                if let Some(kind) = update.kind {
                    annotation.kind = kind;
                }
                if let Some(comment) = update.comment {
                    annotation.comment = comment;
                }
                annotation.updated_at = timestamp();
            }
            None => return (self, Err(SessionError::NotFound(id.to_string()))),
        }
        (self.touch(), Ok(()))
    }

    /// Full edit-replace: new range, type and comment with a fresh snapshot
    ///
    /// The overlap check ignores the annotation being replaced. An empty
    /// range leaves the annotation untouched.
    pub fn replace_annotation(
        mut self,
        id: &str,
        range: TextRange,
        kind: AnnotationType,
        comment: impl Into<String>,
    ) -> Transition<()> {
        if !self.annotations.contains_id(id) {
            return (self, Err(SessionError::NotFound(id.to_string())));
        }
        if range.is_empty() {
            return (self, Ok(()));
        }
        if let Err(err) = self.check_range(range, Some(id)) {
            return (self, Err(err));
        }

        let snapshot = TextIndex::new(&self.document).slice(range).to_string();
        if let Some(annotation) = self.annotations.get_mut(id) {
            annotation.start = range.start;
            annotation.end = range.end;
            annotation.kind = kind;
            annotation.comment = comment.into();
            annotation.snapshot = snapshot;
            annotation.updated_at = timestamp();
        }
        (self.touch(), Ok(()))
    }

    /// Remove an annotation, returning it
    pub fn delete_annotation(mut self, id: &str) -> Transition<Annotation> {
        match self.annotations.remove(id) {
            Some(removed) => (self.touch(), Ok(removed)),
            None => (self, Err(SessionError::NotFound(id.to_string()))),
        }
    }

    /// Drop the document and every annotation
    pub fn clear(self) -> Self {
        Self::new()
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    pub fn spans(&self) -> Vec<Span> {
        tokenize(&self.document)
    }

    pub fn segments(&self) -> Vec<Segment<'_>> {
        build_segments(&self.document, self.annotations.as_slice())
    }

    /// Segments with their display nodes, ready for presentation
    pub fn render(&self) -> Vec<RenderedSegment<'_>> {
        let spans = self.spans();
        self.segments()
            .into_iter()
            .map(|segment| RenderedSegment {
                nodes: merge_spans(segment.text, segment.offset(), &spans),
                annotation_class: segment.annotation.map(|a| a.kind.css_class()),
                segment,
            })
            .collect()
    }

    pub fn mismatches(&self) -> Vec<AnchorMismatch<'_>> {
        find_mismatches(&self.document, self.annotations.as_slice())
    }

    /// Advisory marks for the editor gutter and the drift banner
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::collect(&self.document, self.annotations.as_slice())
    }

    pub fn sorted_annotations(&self) -> Vec<&Annotation> {
        self.annotations.sorted()
    }

    /// Annotation under a click position
    pub fn annotation_at(&self, offset: usize) -> Option<&Annotation> {
        self.annotations.at(offset)
    }

    pub fn navigate(&self, from_id: &str, direction: Direction) -> Option<&Annotation> {
        self.annotations.navigate(from_id, direction)
    }
}
