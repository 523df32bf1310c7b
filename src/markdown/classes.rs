//! Style classes and spans emitted by the tokenizer

use serde::{Serialize, Serializer};
use std::fmt;

use crate::text::TextRange;

/// A style tag, rendered as a CSS class name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleClass {
    /// Syntax characters (delimiters, markers) shown de-emphasized
    Dim,
    CodeFence,
    CodeBlock,
    HeadingMarker,
    Heading,
    /// Heading level 1-6
    HeadingLevel(u8),
    Rule,
    BlockquoteMarker,
    BlockquoteContent,
    ListMarker,
    Code,
    Bold,
    Italic,
    Strikethrough,
    LinkText,
    LinkUrl,
}

impl StyleClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleClass::Dim => "md-dim",
            StyleClass::CodeFence => "md-codeblock-fence",
            StyleClass::CodeBlock => "md-codeblock-content",
            StyleClass::HeadingMarker => "md-heading-marker",
            StyleClass::Heading => "md-heading",
            StyleClass::HeadingLevel(1) => "md-heading-1",
            StyleClass::HeadingLevel(2) => "md-heading-2",
            StyleClass::HeadingLevel(3) => "md-heading-3",
            StyleClass::HeadingLevel(4) => "md-heading-4",
            StyleClass::HeadingLevel(5) => "md-heading-5",
            StyleClass::HeadingLevel(_) => "md-heading-6",
            StyleClass::Rule => "md-hr",
            StyleClass::BlockquoteMarker => "md-blockquote-marker",
            StyleClass::BlockquoteContent => "md-blockquote-content",
            StyleClass::ListMarker => "md-list-marker",
            StyleClass::Code => "md-code",
            StyleClass::Bold => "md-bold",
            StyleClass::Italic => "md-italic",
            StyleClass::Strikethrough => "md-strikethrough",
            StyleClass::LinkText => "md-link-text",
            StyleClass::LinkUrl => "md-link-url",
        }
    }
}

impl fmt::Display for StyleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StyleClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A classified range of the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub range: TextRange,
    pub classes: Vec<StyleClass>,
}

impl Span {
    pub fn new(range: TextRange, classes: Vec<StyleClass>) -> Self {
        Self { range, classes }
    }

    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }

    /// Space-separated class names
    pub fn class_names(&self) -> String {
        join_classes(&self.classes)
    }
}

/// Join classes into a `class` attribute value
pub fn join_classes(classes: &[StyleClass]) -> String {
    classes
        .iter()
        .map(StyleClass::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
