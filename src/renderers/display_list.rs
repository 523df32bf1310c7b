//! Render merger
//!
//! Intersects one segment with the tokenizer spans and returns a flat list
//! of display nodes. Spans and annotation segments are independent interval
//! layers, and spans may co-cover characters (blockquote content under
//! emphasis), so every sub-range carries the union of the classes covering
//! it.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::markdown::{join_classes, Span, StyleClass};
use crate::text::{TextIndex, TextRange};

/// A run of text with uniform styling
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DisplayNode {
    /// Unstyled text
    Text { range: TextRange, text: String },
    /// Text with one or more style classes
    Styled {
        range: TextRange,
        classes: Vec<StyleClass>,
        text: String,
    },
}

impl DisplayNode {
    pub fn text(&self) -> &str {
        match self {
            DisplayNode::Text { text, .. } | DisplayNode::Styled { text, .. } => text,
        }
    }

    pub fn range(&self) -> TextRange {
        match self {
            DisplayNode::Text { range, .. } | DisplayNode::Styled { range, .. } => *range,
        }
    }

    pub fn classes(&self) -> &[StyleClass] {
        match self {
            DisplayNode::Text { .. } => &[],
            DisplayNode::Styled { classes, .. } => classes,
        }
    }

    /// Space-separated class names, empty for plain text
    pub fn class_names(&self) -> String {
        join_classes(self.classes())
    }
}

/// Merge `spans` over the segment `text` starting at document offset `offset`
pub fn merge_spans(text: &str, offset: usize, spans: &[Span]) -> Vec<DisplayNode> {
    let index = TextIndex::new(text);
    let segment = TextRange::new(offset, offset + index.char_len());

    let relevant: Vec<&Span> = spans.iter().filter(|s| s.range.intersects(&segment)).collect();
    if relevant.is_empty() {
        return vec![DisplayNode::Text {
            range: segment,
            text: text.to_string(),
        }];
    }

    let mut boundaries = BTreeSet::new();
    boundaries.insert(segment.start);
    boundaries.insert(segment.end);
    for span in &relevant {
        for point in [span.start(), span.end()] {
            if point > segment.start && point < segment.end {
                boundaries.insert(point);
            }
        }
    }

    let points: Vec<usize> = boundaries.into_iter().collect();
    let mut nodes = Vec::with_capacity(points.len().saturating_sub(1));

    for pair in points.windows(2) {
        let sub = TextRange::new(pair[0], pair[1]);

        let mut classes: Vec<StyleClass> = Vec::new();
        for span in relevant.iter().filter(|s| s.range.covers(&sub)) {
            for class in &span.classes {
                if !classes.contains(class) {
                    classes.push(*class);
                }
            }
        }

        let local = TextRange::new(sub.start - offset, sub.end - offset);
        let text = index.slice(local).to_string();
        if classes.is_empty() {
            nodes.push(DisplayNode::Text { range: sub, text });
        } else {
            nodes.push(DisplayNode::Styled {
                range: sub,
                classes,
                text,
            });
        }
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::tokenize;

    fn span(start: usize, end: usize, classes: &[StyleClass]) -> Span {
        Span::new(TextRange::new(start, end), classes.to_vec())
    }

    #[test]
    fn test_no_spans_is_identity() {
        let nodes = merge_spans("plain text", 7, &[]);
        assert_eq!(
            nodes,
            vec![DisplayNode::Text {
                range: TextRange::new(7, 17),
                text: "plain text".to_string(),
            }]
        );
    }

    #[test]
    fn test_spans_outside_segment_ignored() {
        let spans = vec![span(0, 5, &[StyleClass::Bold])];
        let nodes = merge_spans("world", 5, &spans);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].classes(), &[] as &[StyleClass]);
    }

    #[test]
    fn test_span_clipped_to_segment() {
        // Bold content 2..6 of "**bold**", segment covers "ol" only
        let spans = tokenize("**bold**");
        let nodes = merge_spans("ol", 3, &spans);
        assert_eq!(
            nodes,
            vec![DisplayNode::Styled {
                range: TextRange::new(3, 5),
                classes: vec![StyleClass::Bold],
                text: "ol".to_string(),
            }]
        );
    }

    #[test]
    fn test_overlapping_spans_union_classes() {
        let spans = tokenize("> a **b**");
        let nodes = merge_spans("> a **b**", 0, &spans);

        let texts: Vec<&str> = nodes.iter().map(DisplayNode::text).collect();
        assert_eq!(texts, vec!["> ", "a ", "**", "b", "**"]);
        assert_eq!(nodes[1].class_names(), "md-blockquote-content");
        assert_eq!(nodes[2].class_names(), "md-blockquote-content md-dim");
        assert_eq!(nodes[3].class_names(), "md-blockquote-content md-bold");
    }

    #[test]
    fn test_duplicate_classes_removed() {
        let spans = vec![
            span(0, 4, &[StyleClass::Dim, StyleClass::Code]),
            span(0, 4, &[StyleClass::Code, StyleClass::Italic]),
        ];
        let nodes = merge_spans("abcd", 0, &spans);
        assert_eq!(nodes[0].classes(), &[StyleClass::Dim, StyleClass::Code, StyleClass::Italic]);
    }

    #[test]
    fn test_gaps_become_plain_nodes() {
        let text = "a **b** c";
        let nodes = merge_spans(text, 0, &tokenize(text));
        let plain: Vec<&str> = nodes
            .iter()
            .filter(|n| matches!(n, DisplayNode::Text { .. }))
            .map(DisplayNode::text)
            .collect();
        assert_eq!(plain, vec!["a ", " c"]);
        assert_eq!(nodes.iter().map(DisplayNode::text).collect::<String>(), text);
    }

    #[test]
    fn test_multibyte_segment() {
        let text = "→ *é*";
        let nodes = merge_spans(text, 10, &[span(13, 14, &[StyleClass::Italic])]);
        let texts: Vec<&str> = nodes.iter().map(DisplayNode::text).collect();
        assert_eq!(texts, vec!["→ *", "é", "*"]);
    }
}
