//! Address spans and the overlap-ordered key used by the symbol table
//!
//! A span covers `start..=start + length`. Both ends are inclusive: an
//! address equal to `start + length` belongs to the span, so two spans that
//! merely touch are considered overlapping.

use std::cmp::Ordering;
use std::fmt;

use crate::domain::{Address, SymbolTableError};

/// A block of code occupying a range of address space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressSpan {
    start: Address,
    length: u64,
}

impl AddressSpan {
    /// Create a span without validating it
    ///
    /// `start + length` overflowing `u64` is an unchecked precondition; the
    /// end of such a span saturates at `u64::MAX`. Use [`AddressSpan::try_new`]
    /// for untrusted input.
    #[must_use]
    pub fn new(start: Address, length: u64) -> Self {
        Self { start, length }
    }

    /// Create a span, rejecting one whose end does not fit in 64 bits
    ///
    /// # Errors
    /// Returns `SymbolTableError::InvalidSpan` if `start + length` overflows
    pub fn try_new(start: Address, length: u64) -> Result<Self, SymbolTableError> {
        if start.checked_add(length).is_none() {
            return Err(SymbolTableError::InvalidSpan { start, length });
        }
        Ok(Self { start, length })
    }

    /// Zero-length span used as a lookup key for a single address
    #[must_use]
    pub fn point(addr: Address) -> Self {
        Self { start: addr, length: 0 }
    }

    #[must_use]
    pub fn start(&self) -> Address {
        self.start
    }

    #[must_use]
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Inclusive end address
    #[must_use]
    pub fn end(&self) -> Address {
        self.start.saturating_add(self.length)
    }

    /// Check if an address falls within this span (both ends inclusive)
    #[must_use]
    pub fn contains(&self, addr: Address) -> bool {
        addr >= self.start && addr <= self.end()
    }

    /// True if either span's start falls inside the other
    #[must_use]
    pub fn overlaps(&self, other: &AddressSpan) -> bool {
        self.contains(other.start) || other.contains(self.start)
    }

    /// Three-way comparison that treats any overlap as equality
    ///
    /// Disjoint spans order by start address. This is a matching predicate,
    /// not a total order: it is not transitive once overlapping spans are
    /// involved.
    #[must_use]
    pub fn overlap_cmp(&self, other: &AddressSpan) -> Ordering {
        if self.overlaps(other) {
            Ordering::Equal
        } else if self.start < other.start {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}

impl fmt::Display for AddressSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end())
    }
}

/// Ordered-container key comparing spans with [`AddressSpan::overlap_cmp`]
///
/// `Ord` and `Eq` here are only lawful while every key stored in the same
/// container is disjoint from every other; a probe key may then overlap at
/// most one stored key. `SymbolTable` maintains that invariant by evicting
/// overlapping entries before every insert.
#[derive(Debug, Clone, Copy)]
pub struct SpanKey(AddressSpan);

impl SpanKey {
    #[must_use]
    pub fn new(span: AddressSpan) -> Self {
        Self(span)
    }

    #[must_use]
    pub fn span(&self) -> &AddressSpan {
        &self.0
    }
}

impl Ord for SpanKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.overlap_cmp(&other.0)
    }
}

impl PartialOrd for SpanKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SpanKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SpanKey {}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: u64, length: u64) -> AddressSpan {
        AddressSpan::new(Address(start), length)
    }

    #[test]
    fn test_display_uses_end_address() {
        assert_eq!(span(0x1000, 0x10).to_string(), "0x1000-0x1010");
        assert_eq!(AddressSpan::point(Address(0xabc)).to_string(), "0xabc-0xabc");
    }

    #[test]
    fn test_contains_is_inclusive_at_both_ends() {
        let s = span(0x1000, 0x10);
        assert!(!s.contains(Address(0x0fff)));
        assert!(s.contains(Address(0x1000)));
        assert!(s.contains(Address(0x1008)));
        assert!(s.contains(Address(0x1010)));
        assert!(!s.contains(Address(0x1011)));
    }

    #[test]
    fn test_overlap_cmp_matches_point_inside() {
        let s = span(0x1000, 0x10);
        for addr in 0x1000..=0x1010 {
            let p = AddressSpan::point(Address(addr));
            assert_eq!(s.overlap_cmp(&p), Ordering::Equal, "addr {addr:#x}");
            assert_eq!(p.overlap_cmp(&s), Ordering::Equal, "addr {addr:#x}");
        }
    }

    #[test]
    fn test_overlap_cmp_orders_disjoint_spans() {
        let low = span(0x1000, 0x10);
        let high = span(0x2000, 0x10);
        assert_eq!(low.overlap_cmp(&high), Ordering::Less);
        assert_eq!(high.overlap_cmp(&low), Ordering::Greater);

        let just_past = AddressSpan::point(Address(0x1011));
        assert_eq!(low.overlap_cmp(&just_past), Ordering::Less);
        assert_eq!(just_past.overlap_cmp(&low), Ordering::Greater);
    }

    #[test]
    fn test_touching_spans_overlap() {
        let a = span(0x1000, 0x10);
        let b = span(0x1010, 0x10);
        assert!(a.overlaps(&b));
        assert_eq!(a.overlap_cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_containing_span_overlaps_contained() {
        let outer = span(0x1000, 0x100);
        let inner = span(0x1040, 0x10);
        assert_eq!(outer.overlap_cmp(&inner), Ordering::Equal);
        assert_eq!(inner.overlap_cmp(&outer), Ordering::Equal);
    }

    #[test]
    fn test_overlap_cmp_is_not_transitive() {
        // a == b and b == c, yet a < c: why keys must stay disjoint
        let a = span(0x1000, 0x10);
        let b = span(0x1008, 0x10);
        let c = span(0x1014, 0x10);
        assert_eq!(a.overlap_cmp(&b), Ordering::Equal);
        assert_eq!(b.overlap_cmp(&c), Ordering::Equal);
        assert_eq!(a.overlap_cmp(&c), Ordering::Less);
    }

    #[test]
    fn test_try_new_rejects_overflow() {
        assert!(AddressSpan::try_new(Address(u64::MAX - 0x10), 0x10).is_ok());
        assert_eq!(
            AddressSpan::try_new(Address(u64::MAX - 0x10), 0x11),
            Err(SymbolTableError::InvalidSpan { start: Address(u64::MAX - 0x10), length: 0x11 })
        );
    }

    #[test]
    fn test_unchecked_span_end_saturates() {
        let s = span(u64::MAX - 1, 0x10);
        assert_eq!(s.end(), Address(u64::MAX));
        assert!(s.contains(Address(u64::MAX)));
    }

    #[test]
    fn test_span_key_equality_is_overlap() {
        let stored = SpanKey::new(span(0x1000, 0x10));
        assert_eq!(stored, SpanKey::new(AddressSpan::point(Address(0x1010))));
        assert_ne!(stored, SpanKey::new(AddressSpan::point(Address(0x1011))));
        assert!(stored < SpanKey::new(span(0x2000, 0x10)));
    }
}
