//! # Spans and Span Occupancy
//!
//! Structured matches claim ranges of the input text. Those ranges are kept
//! as half-open character intervals so they can be compared directly with the
//! character offsets a tagger reports for its tokens.
//!
//! | Question                                  | Method                          |
//! |-------------------------------------------|---------------------------------|
//! | Does a later match sit inside a claim?    | [`SpanOccupancy::contains_span`]|
//! | Does a noun start inside a claim?         | [`SpanOccupancy::contains_point`]|

use serde::{Deserialize, Serialize};

/// Half-open interval `[start, end)` over character offsets.
///
/// # Example
/// In `"call 010-1234-5678"` the phone number occupies `Span { start: 5, end: 18 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// First character covered (inclusive)
    pub start: usize,
    /// First character after the span (exclusive)
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` when `pos` lies in `[start, end)`.
    pub fn contains_point(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// `true` when `other` lies entirely within this span (edges included).
    pub fn contains_span(&self, other: &Span) -> bool {
        other.start >= self.start && other.end <= self.end
    }
}

/// Ordered accumulator of claimed spans.
///
/// Spans are appended in acceptance order and never removed during a call,
/// so every containment check sees exactly the claims made before it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanOccupancy {
    spans: Vec<Span>,
}

impl SpanOccupancy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, span: Span) {
        self.spans.push(span);
    }

    /// `true` when some recorded span fully contains `span`.
    pub fn contains_span(&self, span: &Span) -> bool {
        self.spans.iter().any(|claimed| claimed.contains_span(span))
    }

    /// `true` when some recorded span covers the character at `pos`.
    pub fn contains_point(&self, pos: usize) -> bool {
        self.spans.iter().any(|claimed| claimed.contains_point(pos))
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Maps byte offsets of a `&str` to character offsets.
///
/// Regex engines report byte positions; tokens and spans use characters.
pub(crate) struct CharIndex {
    /// Byte position at which each character starts, plus the total length.
    boundaries: Vec<usize>,
}

impl CharIndex {
    pub(crate) fn new(text: &str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        boundaries.push(text.len());
        Self { boundaries }
    }

    /// Character offset of a byte offset that falls on a char boundary.
    pub(crate) fn char_offset(&self, byte: usize) -> usize {
        match self.boundaries.binary_search(&byte) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        }
    }

    pub(crate) fn span(&self, byte_start: usize, byte_end: usize) -> Span {
        Span::new(self.char_offset(byte_start), self.char_offset(byte_end))
    }
}
