//! Markdown tokenizer
//!
//! Turns document text into classified spans for live styling. This is not
//! a markdown parser: it recognizes a fixed set of block and inline rules
//! and never fails.
//!
//! Two passes run in order:
//! 1. `block`: line rules (fences, headings, rules, quotes, lists)
//! 2. `inline`: pattern rules over everything the block pass left unclaimed
//!
//! Every character is claimed by at most one span. The one exception is
//! blockquote content, which is emitted without a claim so emphasis inside
//! quotes is still styled; the render merger combines the two.

pub mod block;
pub mod claims;
pub mod classes;
pub mod inline;

pub use claims::{try_claim, Claim, ClaimMap};
pub use classes::{join_classes, Span, StyleClass};

use crate::text::TextIndex;

/// Tokenize a whole document
///
/// Spans come out in emission order: block spans line by line, then inline
/// spans rule by rule. Offsets are character offsets.
pub fn tokenize(text: &str) -> Vec<Span> {
    let index = TextIndex::new(text);
    let mut blocks = block::scan_blocks(text);
    let inline_spans = inline::scan_inline(&index, &mut blocks);

    let mut spans = blocks.spans;
    spans.extend(inline_spans);
    log::debug!("tokenized {} chars into {} spans", index.char_len(), spans.len());
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TextRange;

    fn span(start: usize, end: usize, classes: &[StyleClass]) -> Span {
        Span::new(TextRange::new(start, end), classes.to_vec())
    }

    /// Spans that claimed their characters (everything but quote content)
    fn claimed(spans: &[Span]) -> Vec<&Span> {
        spans
            .iter()
            .filter(|s| !s.classes.contains(&StyleClass::BlockquoteContent))
            .collect()
    }

    #[test]
    fn test_bold() {
        assert_eq!(
            tokenize("**bold**"),
            vec![
                span(0, 2, &[StyleClass::Dim]),
                span(2, 6, &[StyleClass::Bold]),
                span(6, 8, &[StyleClass::Dim]),
            ]
        );
    }

    #[test]
    fn test_heading_then_italic() {
        let spans = tokenize("# Title\nSome *text*.");
        assert_eq!(
            spans,
            vec![
                span(0, 2, &[StyleClass::HeadingMarker, StyleClass::Dim]),
                span(2, 7, &[StyleClass::Heading, StyleClass::HeadingLevel(1)]),
                span(13, 14, &[StyleClass::Dim]),
                span(14, 18, &[StyleClass::Italic]),
                span(18, 19, &[StyleClass::Dim]),
            ]
        );
    }

    #[test]
    fn test_fenced_content_not_inline_styled() {
        let spans = tokenize("```\n`code` and **x**\n```");
        assert!(spans.iter().all(|s| !s.classes.contains(&StyleClass::Code)));
        assert!(spans.iter().all(|s| !s.classes.contains(&StyleClass::Bold)));
        assert!(spans.contains(&span(4, 20, &[StyleClass::CodeBlock])));
    }

    #[test]
    fn test_plain_fenced_block() {
        let spans = tokenize("```\ncode\n```");
        assert_eq!(
            spans,
            vec![
                span(0, 3, &[StyleClass::CodeFence, StyleClass::Dim]),
                span(4, 8, &[StyleClass::CodeBlock]),
                span(9, 12, &[StyleClass::CodeFence, StyleClass::Dim]),
            ]
        );
    }

    #[test]
    fn test_inline_code_shields_emphasis() {
        let spans = tokenize("`**not bold**`");
        assert_eq!(
            spans,
            vec![
                span(0, 1, &[StyleClass::Dim]),
                span(1, 13, &[StyleClass::Code]),
                span(13, 14, &[StyleClass::Dim]),
            ]
        );
    }

    #[test]
    fn test_strikethrough() {
        let spans = tokenize("~~gone~~");
        assert_eq!(spans[1], span(2, 6, &[StyleClass::Strikethrough]));
    }

    #[test]
    fn test_link() {
        let spans = tokenize("[a](b)");
        assert_eq!(
            spans,
            vec![
                span(0, 1, &[StyleClass::Dim]),
                span(1, 2, &[StyleClass::LinkText]),
                span(2, 4, &[StyleClass::Dim]),
                span(4, 5, &[StyleClass::LinkUrl, StyleClass::Dim]),
                span(5, 6, &[StyleClass::Dim]),
            ]
        );
    }

    #[test]
    fn test_link_text_already_bold_is_blocked() {
        let spans = tokenize("[**b**](u)");
        // Bold claimed the text first; the link keeps only its free parts
        assert!(spans.contains(&span(3, 4, &[StyleClass::Bold])));
        assert!(spans.iter().all(|s| !s.classes.contains(&StyleClass::LinkText)));
        assert!(spans.contains(&span(0, 1, &[StyleClass::Dim])));
        assert!(spans.contains(&span(8, 9, &[StyleClass::LinkUrl, StyleClass::Dim])));
    }

    #[test]
    fn test_emphasis_inside_blockquote() {
        let spans = tokenize("> a **b**");
        assert!(spans.contains(&span(2, 9, &[StyleClass::BlockquoteContent])));
        assert!(spans.contains(&span(6, 7, &[StyleClass::Bold])));
    }

    #[test]
    fn test_list_line_keeps_inline_styling() {
        let spans = tokenize("- *one*");
        assert_eq!(spans[0], span(0, 2, &[StyleClass::ListMarker]));
        assert!(spans.contains(&span(3, 6, &[StyleClass::Italic])));
    }

    #[test]
    fn test_heading_content_blocks_inline_rules() {
        let spans = tokenize("# **x**");
        assert!(spans.iter().all(|s| !s.classes.contains(&StyleClass::Bold)));
    }

    #[test]
    fn test_claimed_spans_never_overlap() {
        let docs = [
            "# H *i* **b**\n> q `c` [l](u)\n- **x** ~~y~~\n```\nz\n```\n---\n*a **b** c*",
            "***tri*** and ``` inline",
            "**a*b**c*",
            "~~~\nopen fence **never** closes",
        ];
        for doc in docs {
            let spans = tokenize(doc);
            let claimed = claimed(&spans);
            for (i, a) in claimed.iter().enumerate() {
                assert!(!a.range.is_empty(), "empty span in {:?}", doc);
                for b in claimed.iter().skip(i + 1) {
                    assert!(!a.range.intersects(&b.range), "{:?} overlaps {:?} in {:?}", a, b, doc);
                }
            }
        }
    }

    #[test]
    fn test_unterminated_fence_suppresses_inline_rules() {
        let doc = "~~~\nopen fence **never** closes\n*a* `b` [c](d)";
        let spans = tokenize(doc);

        assert!(spans.contains(&span(4, 31, &[StyleClass::CodeBlock])));
        assert!(spans.contains(&span(32, 46, &[StyleClass::CodeBlock])));
        for inline in [StyleClass::Bold, StyleClass::Italic, StyleClass::Code, StyleClass::LinkText] {
            assert!(
                spans.iter().all(|s| !s.classes.contains(&inline)),
                "{:?} found inside unterminated fence",
                inline
            );
        }
    }

    #[test]
    fn test_empty_document() {
        assert!(tokenize("").is_empty());
    }
}
