//! # Trace Replay Session
//!
//! A [`TraceSession`] owns the symbol table for exactly one replay. Code
//! events mutate the table in log order; ticks are resolved against the table
//! as it stands at that point in the log, which is the only moment their
//! addresses mean anything. Dropping or finishing the session discards the
//! table.
//!
//! ## Event Handling
//!
//! - `Create` → insert, evicting any code object it overlaps
//! - `Move`   → remove the object starting at `from`, re-insert at `to`
//! - `Delete` → remove the object starting at `address`
//! - `Tick`   → resolve the PC and stack, keep the result
//!
//! Moves and deletes naming an address with no code object are logged and
//! counted, never fatal: logs routinely reference code created before
//! profiling began. A move whose target range would run past the top of the
//! address space is counted the same way; the object is dropped, since it no
//! longer lives at its old address either.

use log::{debug, info, warn};
use serde::Serialize;

use super::events::CodeEvent;
use super::stack_resolver::{ResolvedStack, StackResolver};
use crate::domain::{Address, SymbolKind};
use crate::symbolization::{Symbol, SymbolTable};

/// Counters collected while replaying
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub created: usize,
    pub moved: usize,
    pub deleted: usize,
    pub ticks: usize,
    /// Code objects evicted because newer code overlapped them
    pub replaced: usize,
    pub unresolved_moves: usize,
    pub unresolved_deletes: usize,
}

/// What remains of a session once replay is over
#[derive(Debug)]
pub struct SessionReport {
    pub table: SymbolTable,
    pub samples: Vec<ResolvedStack>,
    pub stats: SessionStats,
}

/// Replay state for one trace
#[derive(Debug, Default)]
pub struct TraceSession {
    table: SymbolTable,
    samples: Vec<ResolvedStack>,
    stats: SessionStats,
}

impl TraceSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a single event
    pub fn apply(&mut self, event: CodeEvent) {
        match event {
            CodeEvent::Create { name, kind, address, length } => {
                self.handle_create(name, kind, address, length);
            }
            CodeEvent::Move { from, to } => self.handle_move(from, to),
            CodeEvent::Delete { address } => self.handle_delete(address),
            CodeEvent::Tick { pc, stack } => self.handle_tick(pc, &stack),
        }
    }

    /// Apply events in order
    pub fn replay<I: IntoIterator<Item = CodeEvent>>(&mut self, events: I) {
        for event in events {
            self.apply(event);
        }
        info!(
            "Replayed {} creations, {} moves, {} deletions, {} ticks ({} live symbols)",
            self.stats.created,
            self.stats.moved,
            self.stats.deleted,
            self.stats.ticks,
            self.table.len()
        );
    }

    #[must_use]
    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    #[must_use]
    pub fn samples(&self) -> &[ResolvedStack] {
        &self.samples
    }

    #[must_use]
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// End the session, handing back its final state
    #[must_use]
    pub fn finish(self) -> SessionReport {
        SessionReport { table: self.table, samples: self.samples, stats: self.stats }
    }

    // Private event handlers

    fn handle_create(&mut self, name: String, kind: SymbolKind, address: Address, length: u64) {
        self.stats.created += 1;
        let replaced = self.table.insert(Symbol::new(name, kind, address, length));
        self.stats.replaced += replaced.len();
    }

    fn handle_move(&mut self, from: Address, to: Address) {
        let Some(symbol) = self.table.remove_at(from) else {
            warn!("code-move from {from}: no code object starts there");
            self.stats.unresolved_moves += 1;
            return;
        };

        let moved = match symbol.moved_to(to) {
            Ok(moved) => moved,
            Err(e) => {
                warn!("code-move of {symbol} to {to}: {e}");
                self.stats.unresolved_moves += 1;
                return;
            }
        };

        debug!("Moving {symbol} to {to}");
        self.stats.moved += 1;
        let replaced = self.table.insert(moved);
        self.stats.replaced += replaced.len();
    }

    fn handle_delete(&mut self, address: Address) {
        if self.table.remove_at(address).is_some() {
            self.stats.deleted += 1;
        } else {
            warn!("code-delete at {address}: no code object starts there");
            self.stats.unresolved_deletes += 1;
        }
    }

    fn handle_tick(&mut self, pc: Address, stack: &[Address]) {
        self.stats.ticks += 1;
        let resolved = StackResolver::new(&self.table).resolve(pc, stack);
        self.samples.push(resolved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, address: u64, length: u64) -> CodeEvent {
        CodeEvent::Create {
            name: name.to_string(),
            kind: SymbolKind::FUNCTION,
            address: Address(address),
            length,
        }
    }

    fn tick(pc: u64) -> CodeEvent {
        CodeEvent::Tick { pc: Address(pc), stack: Vec::new() }
    }

    fn top_name(stack: &ResolvedStack) -> &str {
        stack.top().map_or("<none>", |f| f.function())
    }

    #[test]
    fn test_ticks_resolve_against_table_at_that_point() {
        let mut session = TraceSession::new();
        session.replay([
            create("a", 0x1000, 0x10),
            tick(0x1008),
            CodeEvent::Delete { address: Address(0x1000) },
            tick(0x1008),
        ]);

        let names: Vec<&str> = session.samples().iter().map(top_name).collect();
        assert_eq!(names, ["a", "<unknown>"]);
        assert!(session.table().is_empty());
    }

    #[test]
    fn test_move_relocates_symbol() {
        let mut session = TraceSession::new();
        session.replay([
            create("a", 0x1000, 0x10),
            CodeEvent::Move { from: Address(0x1000), to: Address(0x8000) },
        ]);

        let table = session.table();
        assert!(table.lookup(Address(0x1008)).is_none());
        let moved = table.lookup(Address(0x8008)).expect("moved symbol");
        assert_eq!(moved.name(), "a");
        assert_eq!(moved.span().length(), 0x10);
        assert_eq!(session.stats().moved, 1);
    }

    #[test]
    fn test_unknown_move_and_delete_are_counted() {
        let mut session = TraceSession::new();
        session.replay([
            create("a", 0x1000, 0x10),
            CodeEvent::Move { from: Address(0x1004), to: Address(0x8000) },
            CodeEvent::Delete { address: Address(0x3000) },
        ]);

        let stats = session.stats();
        assert_eq!(stats.unresolved_moves, 1);
        assert_eq!(stats.unresolved_deletes, 1);
        assert_eq!(stats.moved, 0);
        assert_eq!(session.table().len(), 1);
    }

    #[test]
    fn test_move_past_address_space_end_is_rejected() {
        let mut session = TraceSession::new();
        session.replay([
            create("f", 0x1000, 0x10),
            CodeEvent::Move { from: Address(0x1000), to: Address(0xffff_ffff_ffff_fff8) },
        ]);

        let stats = session.stats();
        assert_eq!(stats.unresolved_moves, 1);
        assert_eq!(stats.moved, 0);
        assert!(session.table().is_empty());
        assert!(session.table().lookup(Address(u64::MAX)).is_none());
    }

    #[test]
    fn test_move_onto_live_code_evicts_it() {
        let mut session = TraceSession::new();
        session.replay([
            create("mover", 0x1000, 0x10),
            create("resident", 0x8000, 0x20),
            CodeEvent::Move { from: Address(0x1000), to: Address(0x8010) },
            tick(0x8004),
            tick(0x8018),
        ]);

        let stats = session.stats();
        assert_eq!(stats.moved, 1);
        assert_eq!(stats.replaced, 1);
        assert_eq!(session.table().len(), 1);
        let names: Vec<&str> = session.samples().iter().map(top_name).collect();
        assert_eq!(names, ["<unknown>", "mover"]);
    }

    #[test]
    fn test_recompiled_code_replaces_old_entry() {
        let mut session = TraceSession::new();
        session.replay([create("old", 0x1000, 0x40), create("new", 0x1020, 0x40), tick(0x1004)]);

        assert_eq!(session.stats().replaced, 1);
        assert_eq!(top_name(&session.samples()[0]), "<unknown>");
    }

    #[test]
    fn test_finish_hands_back_state() {
        let mut session = TraceSession::new();
        session.replay([create("a", 0x1000, 0x10), tick(0x1000), tick(0x1010)]);

        let report = session.finish();
        assert_eq!(report.samples.len(), 2);
        assert_eq!(report.stats.ticks, 2);
        assert_eq!(report.table.len(), 1);
    }
}
