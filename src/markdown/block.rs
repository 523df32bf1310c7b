//! Block pass: line-oriented rules
//!
//! Rules are tried per line in priority order: fence, heading, horizontal
//! rule, blockquote, list marker. Fence, heading and rule lines are claimed
//! whole; blockquote and list lines only claim their markers.

use once_cell::sync::Lazy;
use regex::Regex;

use super::claims::ClaimMap;
use super::classes::{Span, StyleClass};
use crate::text::TextRange;

static FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:`{3,}|~{3,})").expect("valid fence pattern"));
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s").expect("valid heading pattern"));
static BLOCKQUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s{0,3}>+\s?").expect("valid blockquote pattern"));
static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)(?:[-*+]|\d+[.)]) ").expect("valid list pattern"));

/// Result of the block pass
#[derive(Debug, Default)]
pub struct BlockPass {
    pub spans: Vec<Span>,
    pub claims: ClaimMap,
    /// Fenced regions, opening fence through closing fence (or document end)
    pub code_blocks: Vec<TextRange>,
}

impl BlockPass {
    fn claim_span(&mut self, range: TextRange, classes: Vec<StyleClass>) {
        self.claims.claim(range);
        self.push_span(range, classes);
    }

    fn push_span(&mut self, range: TextRange, classes: Vec<StyleClass>) {
        if !range.is_empty() {
            self.spans.push(Span::new(range, classes));
        }
    }

    /// Check whether a position lies in a fenced code block
    pub fn in_code_block(&self, pos: usize) -> bool {
        self.code_blocks.iter().any(|block| block.contains(pos))
    }
}

/// Run the block rules over every line of `text`
pub fn scan_blocks(text: &str) -> BlockPass {
    let mut pass = BlockPass::default();
    let mut offset = 0;
    let mut open_fence: Option<usize> = None;

    for line in text.split('\n') {
        let line_start = offset;
        let line_end = line_start + line.chars().count();
        let whole_line = TextRange::new(line_start, line_end);
        offset = line_end + 1;

        if FENCE.is_match(line) {
            pass.claim_span(whole_line, vec![StyleClass::CodeFence, StyleClass::Dim]);
            match open_fence.take() {
                Some(block_start) => pass.code_blocks.push(TextRange::new(block_start, line_end)),
                None => open_fence = Some(line_start),
            }
            continue;
        }

        if open_fence.is_some() {
            pass.claim_span(whole_line, vec![StyleClass::CodeBlock]);
            continue;
        }

        if let Some(caps) = HEADING.captures(line) {
            let level = caps[1].len() as u8;
            let marker_end = line_start + caps[0].chars().count();
            pass.claim_span(
                TextRange::new(line_start, marker_end),
                vec![StyleClass::HeadingMarker, StyleClass::Dim],
            );
            pass.claim_span(
                TextRange::new(marker_end, line_end),
                vec![StyleClass::Heading, StyleClass::HeadingLevel(level)],
            );
            continue;
        }

        if is_thematic_break(line) {
            pass.claim_span(whole_line, vec![StyleClass::Rule]);
            continue;
        }

        if let Some(m) = BLOCKQUOTE.find(line) {
            let marker_end = line_start + m.as_str().chars().count();
            pass.claim_span(
                TextRange::new(line_start, marker_end),
                vec![StyleClass::BlockquoteMarker, StyleClass::Dim],
            );
            // Content stays unclaimed so inline rules still apply inside quotes
            pass.push_span(TextRange::new(marker_end, line_end), vec![StyleClass::BlockquoteContent]);
            continue;
        }

        if let Some(caps) = LIST_MARKER.captures(line) {
            let marker_start = line_start + caps[1].chars().count();
            let marker_end = line_start + caps[0].chars().count();
            pass.claim_span(TextRange::new(marker_start, marker_end), vec![StyleClass::ListMarker]);
        }
    }

    if let Some(block_start) = open_fence {
        log::debug!("unterminated code fence at {}, treating rest of document as code", block_start);
        pass.code_blocks.push(TextRange::new(block_start, offset.saturating_sub(1)));
    }

    pass
}

/// Horizontal rule: up to three leading whitespace characters, then at
/// least three of the same `-`, `*` or `_`, separated only by whitespace
fn is_thematic_break(line: &str) -> bool {
    let mut chars = line.chars().skip_while(|c| c.is_whitespace());
    let indent = line.chars().take_while(|c| c.is_whitespace()).count();
    if indent > 3 {
        return false;
    }

    let marker = match chars.next() {
        Some(c @ ('-' | '*' | '_')) => c,
        _ => return false,
    };

    let mut count = 1;
    for c in chars {
        if c == marker {
            count += 1;
        } else if !c.is_whitespace() {
            return false;
        }
    }
    count >= 3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes_at(pass: &BlockPass, range: TextRange) -> Option<Vec<StyleClass>> {
        pass.spans.iter().find(|s| s.range == range).map(|s| s.classes.clone())
    }

    #[test]
    fn test_heading_marker_and_content() {
        let pass = scan_blocks("## Section");
        assert_eq!(
            classes_at(&pass, TextRange::new(0, 3)),
            Some(vec![StyleClass::HeadingMarker, StyleClass::Dim])
        );
        assert_eq!(
            classes_at(&pass, TextRange::new(3, 10)),
            Some(vec![StyleClass::Heading, StyleClass::HeadingLevel(2)])
        );
    }

    #[test]
    fn test_seven_hashes_is_not_heading() {
        let pass = scan_blocks("####### nope");
        assert!(pass.spans.is_empty());
    }

    #[test]
    fn test_marker_only_heading() {
        let pass = scan_blocks("# ");
        assert_eq!(pass.spans.len(), 1);
        assert_eq!(pass.spans[0].range, TextRange::new(0, 2));
    }

    #[test]
    fn test_fenced_block() {
        let text = "```\ncode\n```\nafter";
        let pass = scan_blocks(text);
        assert_eq!(pass.code_blocks, vec![TextRange::new(0, 12)]);
        assert_eq!(
            classes_at(&pass, TextRange::new(4, 8)),
            Some(vec![StyleClass::CodeBlock])
        );
        assert!(pass.in_code_block(5));
        assert!(!pass.in_code_block(13));
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let text = "intro\n~~~\nstill code\n# not a heading";
        let pass = scan_blocks(text);
        assert_eq!(pass.code_blocks, vec![TextRange::new(6, text.chars().count())]);
        assert!(pass.spans.iter().all(|s| !s.classes.contains(&StyleClass::Heading)));
    }

    #[test]
    fn test_thematic_breaks() {
        assert!(is_thematic_break("---"));
        assert!(is_thematic_break(" * * *"));
        assert!(is_thematic_break("___   "));
        assert!(!is_thematic_break("--"));
        assert!(!is_thematic_break("    ---"));
        assert!(!is_thematic_break("-*-"));
        assert!(!is_thematic_break("--- x"));
    }

    #[test]
    fn test_rule_wins_over_list() {
        let pass = scan_blocks("- - -");
        assert_eq!(pass.spans.len(), 1);
        assert_eq!(pass.spans[0].classes, vec![StyleClass::Rule]);
    }

    #[test]
    fn test_blockquote_content_unclaimed() {
        let pass = scan_blocks("> quoted");
        assert_eq!(
            classes_at(&pass, TextRange::new(0, 2)),
            Some(vec![StyleClass::BlockquoteMarker, StyleClass::Dim])
        );
        assert_eq!(
            classes_at(&pass, TextRange::new(2, 8)),
            Some(vec![StyleClass::BlockquoteContent])
        );
        assert!(pass.claims.is_claimed(1));
        assert!(!pass.claims.is_claimed(3));
    }

    #[test]
    fn test_list_markers() {
        let pass = scan_blocks("  - item\n12. twelve\n3) three");
        assert_eq!(
            classes_at(&pass, TextRange::new(2, 4)),
            Some(vec![StyleClass::ListMarker])
        );
        assert_eq!(
            classes_at(&pass, TextRange::new(9, 13)),
            Some(vec![StyleClass::ListMarker])
        );
        assert_eq!(
            classes_at(&pass, TextRange::new(20, 23)),
            Some(vec![StyleClass::ListMarker])
        );
        assert!(!pass.claims.is_claimed(0));
    }

    #[test]
    fn test_offsets_count_characters() {
        let pass = scan_blocks("é\n# Tête");
        assert_eq!(
            classes_at(&pass, TextRange::new(4, 8)),
            Some(vec![StyleClass::Heading, StyleClass::HeadingLevel(1)])
        );
    }
}
