//! Inline pass: whole-document pattern scans
//!
//! Each rule produces its full list of candidates up front. Candidates are
//! then filtered through the claim map in rule order: code, bold, italic,
//! strikethrough, links. A candidate part that hits an earlier claim is
//! dropped silently.

use once_cell::sync::Lazy;
use regex::Regex;

use super::block::BlockPass;
use super::classes::{Span, StyleClass};
use crate::text::{TextIndex, TextRange};

static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`[^`\n]+`").expect("valid code pattern"));
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*[^\r\n]+?\*\*").expect("valid bold pattern"));
static STRIKETHROUGH: Lazy<Regex> = Lazy::new(|| Regex::new(r"~~[^\r\n]+?~~").expect("valid strikethrough pattern"));
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").expect("valid link pattern"));

/// One classified piece of a candidate match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub range: TextRange,
    pub classes: Vec<StyleClass>,
}

impl Part {
    fn new(range: TextRange, classes: Vec<StyleClass>) -> Self {
        Self { range, classes }
    }
}

/// A rule match, split into independently claimed parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub range: TextRange,
    pub parts: Vec<Part>,
}

/// Split a match into opening delimiter, content and closing delimiter
fn delimited(range: TextRange, width: usize, class: StyleClass) -> Candidate {
    let content = TextRange::new(range.start + width, range.end - width);
    Candidate {
        range,
        parts: vec![
            Part::new(TextRange::new(range.start, content.start), vec![StyleClass::Dim]),
            Part::new(content, vec![class]),
            Part::new(TextRange::new(content.end, range.end), vec![StyleClass::Dim]),
        ],
    }
}

fn delimited_matches(re: &Regex, index: &TextIndex, width: usize, class: StyleClass) -> Vec<Candidate> {
    re.find_iter(index.text())
        .map(|m| delimited(index.char_range(m.range()), width, class))
        .collect()
}

pub fn inline_code(index: &TextIndex) -> Vec<Candidate> {
    delimited_matches(&INLINE_CODE, index, 1, StyleClass::Code)
}

pub fn bold(index: &TextIndex) -> Vec<Candidate> {
    delimited_matches(&BOLD, index, 2, StyleClass::Bold)
}

pub fn strikethrough(index: &TextIndex) -> Vec<Candidate> {
    delimited_matches(&STRIKETHROUGH, index, 2, StyleClass::Strikethrough)
}

/// Single-star emphasis
///
/// A delimiter is a `*` with no `*` on either side. Content is at least one
/// character, stays on one line (`\r` ends a line too), and ends at the first
/// closing delimiter.
pub fn italic(index: &TextIndex) -> Vec<Candidate> {
    let chars: Vec<char> = index.text().chars().collect();
    let lone_star = |k: usize| {
        chars[k] == '*'
            && (k == 0 || chars[k - 1] != '*')
            && chars.get(k + 1).map_or(true, |&c| c != '*')
    };

    let mut candidates = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if !lone_star(i) {
            i += 1;
            continue;
        }

        let mut close = None;
        for j in (i + 2)..chars.len() {
            if matches!(chars[j - 1], '\n' | '\r') {
                break;
            }
            if lone_star(j) {
                close = Some(j);
                break;
            }
        }

        match close {
            Some(j) => {
                candidates.push(delimited(TextRange::new(i, j + 1), 1, StyleClass::Italic));
                i = j + 1;
            }
            None => i += 1,
        }
    }
    candidates
}

/// `[text](url)` as five adjacent parts
pub fn links(index: &TextIndex) -> Vec<Candidate> {
    LINK.captures_iter(index.text())
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let range = index.char_range(whole.range());
            let text_end = range.start + 1 + caps[1].chars().count();
            let url_start = text_end + 2;
            let url_end = url_start + caps[2].chars().count();

            Some(Candidate {
                range,
                parts: vec![
                    Part::new(TextRange::single_char(range.start), vec![StyleClass::Dim]),
                    Part::new(TextRange::new(range.start + 1, text_end), vec![StyleClass::LinkText]),
                    Part::new(TextRange::new(text_end, url_start), vec![StyleClass::Dim]),
                    Part::new(TextRange::new(url_start, url_end), vec![StyleClass::LinkUrl, StyleClass::Dim]),
                    Part::new(TextRange::new(url_end, range.end), vec![StyleClass::Dim]),
                ],
            })
        })
        .collect()
}

/// Filter every rule's candidates through the claims left by the block pass
pub fn scan_inline(index: &TextIndex, blocks: &mut BlockPass) -> Vec<Span> {
    let rules: [fn(&TextIndex) -> Vec<Candidate>; 5] = [inline_code, bold, italic, strikethrough, links];
    let mut spans = Vec::new();

    for rule in rules {
        for candidate in rule(index) {
            if blocks.in_code_block(candidate.range.start) {
                continue;
            }
            for part in candidate.parts {
                if blocks.claims.claim(part.range) && !part.range.is_empty() {
                    spans.push(Span::new(part.range, part.classes));
                }
            }
        }
    }
    spans
}
