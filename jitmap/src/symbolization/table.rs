use log::debug;
use std::collections::btree_map::{BTreeMap, Values};

use super::span::{AddressSpan, SpanKey};
use super::symbol::Symbol;
use crate::domain::Address;

/// Address to symbol index for JIT-generated code
///
/// Entries are keyed by [`SpanKey`], so a point lookup lands on the one
/// stored span that contains the address in O(log n). No two stored spans
/// ever overlap: inserting over an occupied range evicts whatever was there.
///
/// Not synchronised. One table belongs to one trace replay.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: BTreeMap<SpanKey, Symbol>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol, replacing every entry its span overlaps
    ///
    /// Newly generated code wins over whatever previously occupied the same
    /// addresses (recompilation, deoptimisation). The evicted symbols are
    /// returned in ascending address order; this is never an error.
    pub fn insert(&mut self, symbol: Symbol) -> Vec<Symbol> {
        let key = SpanKey::new(*symbol.span());

        let mut replaced = Vec::new();
        while let Some(old) = self.entries.remove(&key) {
            debug!("{symbol} replaces {old}");
            replaced.push(old);
        }
        replaced.sort_unstable_by_key(Symbol::start);

        self.entries.insert(key, symbol);
        replaced
    }

    /// Find the symbol whose span contains `addr`
    #[must_use]
    pub fn lookup(&self, addr: Address) -> Option<&Symbol> {
        self.entries.get(&SpanKey::new(AddressSpan::point(addr)))
    }

    /// Remove the entry stored under exactly `symbol`'s span
    ///
    /// A symbol that was already removed, or whose range has since been
    /// taken over by a different span, is left alone and `None` is returned.
    pub fn remove(&mut self, symbol: &Symbol) -> Option<Symbol> {
        self.remove_exact(symbol.span())
    }

    /// Remove the entry whose span starts exactly at `addr`
    pub fn remove_at(&mut self, addr: Address) -> Option<Symbol> {
        let stored = *self.lookup(addr)?.span();
        if stored.start() != addr {
            return None;
        }
        self.remove_exact(&stored)
    }

    fn remove_exact(&mut self, span: &AddressSpan) -> Option<Symbol> {
        let key = SpanKey::new(*span);
        let exact = matches!(
            self.entries.get_key_value(&key),
            Some((stored, _)) if stored.span() == span
        );
        if exact {
            self.entries.remove(&key)
        } else {
            None
        }
    }

    /// Iterate symbols in ascending start address order
    pub fn iter(&self) -> Values<'_, SpanKey, Symbol> {
        self.entries.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = &'a Symbol;
    type IntoIter = Values<'a, SpanKey, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
