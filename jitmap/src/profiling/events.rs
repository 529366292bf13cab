//! Code-lifecycle events driving a trace replay
//!
//! All addresses here are already absolute; decoding happens in the loader.

use crate::domain::{Address, SymbolKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeEvent {
    /// The engine generated a block of code
    Create { name: String, kind: SymbolKind, address: Address, length: u64 },
    /// A code block was relocated (e.g. by a compacting GC)
    Move { from: Address, to: Address },
    /// A code block was freed
    Delete { address: Address },
    /// A profiler sample: program counter plus caller return addresses
    Tick { pc: Address, stack: Vec<Address> },
}
