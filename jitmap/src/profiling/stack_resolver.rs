//! Stack trace resolution and display
//!
//! Turns the raw addresses of one profiler tick into frames named after the
//! code objects that were live when the tick was taken.

use log::debug;
use std::fmt::Write as _;

use crate::domain::{Address, SymbolKind};
use crate::symbolization::{Symbol, SymbolTable};

/// Snapshot of the symbol a frame resolved to
///
/// Owned, so resolved stacks stay valid after the table changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRef {
    pub name: String,
    pub kind: SymbolKind,
    pub start: Address,
}

impl From<&Symbol> for SymbolRef {
    fn from(symbol: &Symbol) -> Self {
        Self { name: symbol.name().to_string(), kind: symbol.kind(), start: symbol.start() }
    }
}

/// One frame of a resolved stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFrame {
    pub addr: Address,
    pub symbol: Option<SymbolRef>,
}

impl ResolvedFrame {
    /// Symbol name, or `<unknown>` if no code object covered the address
    #[must_use]
    pub fn function(&self) -> &str {
        self.symbol.as_ref().map_or("<unknown>", |s| s.name.as_str())
    }

    /// Format the frame for display
    #[must_use]
    pub fn format(&self, frame_num: usize) -> String {
        let mut output = format!("#{frame_num:<2} 0x{:016x} {}", self.addr, self.function());
        if let Some(ref symbol) = self.symbol {
            let offset = self.addr.offset_from(symbol.start);
            if offset > 0 {
                let _ = write!(output, "+0x{offset:x}");
            }
            let _ = write!(output, " [{}]", symbol.kind);
        }
        output
    }
}

/// All frames of one tick, innermost first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedStack {
    pub frames: Vec<ResolvedFrame>,
}

impl ResolvedStack {
    /// The frame that was executing when the sample was taken
    #[must_use]
    pub fn top(&self) -> Option<&ResolvedFrame> {
        self.frames.first()
    }

    /// Number of frames that resolved to a symbol
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.frames.iter().filter(|f| f.symbol.is_some()).count()
    }

    #[must_use]
    pub fn format(&self) -> String {
        self.frames
            .iter()
            .enumerate()
            .map(|(i, frame)| frame.format(i))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Stack trace resolver backed by a symbol table
pub struct StackResolver<'a> {
    table: &'a SymbolTable,
}

impl<'a> StackResolver<'a> {
    #[must_use]
    pub fn new(table: &'a SymbolTable) -> Self {
        Self { table }
    }

    /// Resolve a sampled program counter and its callers
    ///
    /// The walk stops at the first null address.
    #[must_use]
    pub fn resolve(&self, pc: Address, stack: &[Address]) -> ResolvedStack {
        let mut frames = Vec::with_capacity(stack.len() + 1);

        for (i, &addr) in std::iter::once(&pc).chain(stack).enumerate() {
            if addr.is_null() {
                debug!("Frame {i} has address 0, stopping");
                break;
            }
            frames.push(self.resolve_frame(addr));
        }

        ResolvedStack { frames }
    }

    #[must_use]
    pub fn resolve_frame(&self, addr: Address) -> ResolvedFrame {
        let symbol = self.table.lookup(addr).map(SymbolRef::from);
        if symbol.is_none() {
            debug!("No code object covers {addr}");
        }
        ResolvedFrame { addr, symbol }
    }
}
