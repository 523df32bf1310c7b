//! Exclusive claims over character ranges
//!
//! Each character may be styled by at most one claimed span. Claims are kept
//! as a sorted list of disjoint, non-empty ranges rather than a per-character
//! set, so a query is a binary search.

use crate::text::TextRange;

/// Outcome of a claim attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    Accepted,
    Rejected,
}

/// Decide whether `candidate` is free in `claimed`
///
/// `claimed` must be sorted by start and pairwise disjoint. Empty candidates
/// are always accepted (they cover nothing).
pub fn try_claim(claimed: &[TextRange], candidate: TextRange) -> Claim {
    if candidate.is_empty() {
        return Claim::Accepted;
    }

    // Disjoint sorted ranges have sorted ends, so the first range ending
    // after candidate.start is the only one that can intersect it first.
    let idx = claimed.partition_point(|r| r.end <= candidate.start);
    match claimed.get(idx) {
        Some(r) if r.start < candidate.end => Claim::Rejected,
        _ => Claim::Accepted,
    }
}

/// The claimed ranges of one tokenizer run
#[derive(Debug, Clone, Default)]
pub struct ClaimMap {
    ranges: Vec<TextRange>,
}

impl ClaimMap {
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Claim `range` if it is entirely free
    ///
    /// Returns `true` on success. Empty ranges succeed without being stored.
    pub fn claim(&mut self, range: TextRange) -> bool {
        if try_claim(&self.ranges, range) == Claim::Rejected {
            return false;
        }
        if !range.is_empty() {
            let idx = self.ranges.partition_point(|r| r.start < range.start);
            self.ranges.insert(idx, range);
        }
        true
    }

    pub fn is_claimed(&self, pos: usize) -> bool {
        try_claim(&self.ranges, TextRange::single_char(pos)) == Claim::Rejected
    }

    pub fn ranges(&self) -> &[TextRange] {
        &self.ranges
    }
}
