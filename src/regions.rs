//! Tracking of already-rewritten spans within a single description.
//!
//! The description rewriter claims the span of every replacement it makes so
//! that later, broader rules cannot re-substitute inside text an earlier rule
//! already produced. A tracker lives for exactly one rewrite call; spans are
//! byte offsets into the *current* working string.

/// Half-open byte interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted span [{start}, {end})");
        Self { start, end }
    }

    /// True if the two half-open intervals share at least one offset.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Set of claimed spans for one rewrite call.
///
/// Claimed spans never overlap: the rewriter only claims spans that
/// `is_free` reported free, and replacements are spliced in at the claimed
/// offset so earlier claims keep their positions.
#[derive(Debug, Default)]
pub struct RegionTracker {
    claimed: Vec<Span>,
}

impl RegionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `span` overlaps none of the claimed regions.
    pub fn is_free(&self, span: Span) -> bool {
        self.claimed.iter().all(|claimed| !claimed.overlaps(&span))
    }

    /// Record `span` as rewritten.
    pub fn claim(&mut self, span: Span) {
        debug_assert!(self.is_free(span), "claiming an overlapping span");
        self.claimed.push(span);
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}
