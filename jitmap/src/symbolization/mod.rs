//! # Symbol Resolution for JIT Code
//!
//! This module maps raw program counters sampled from a JIT-compiling script
//! engine back to the code object that was executing. Unlike ahead-of-time
//! binaries there is no DWARF to consult: the engine announces every block
//! of code it generates, moves or frees through its profiler log, and this
//! module keeps an index of those announcements.
//!
//! ## The Lookup Problem
//!
//! A tick records an address like `0x2c1a0047`. To name it we need the code
//! object whose range covers that address:
//!
//! ```text
//!   0x2c1a0000          0x2c1a0040     0x2c1a0080
//!   ├── LazyCompile foo ─┤             ├── Stub CEntry ──┤
//!                ▲
//!             tick pc = 0x2c1a0027  →  foo
//! ```
//!
//! Code objects come and go while the program runs, so the index must
//! support cheap inserts and removals as well as lookups. A linear scan is
//! too slow for long traces; a sorted map answers all three in O(log n).
//!
//! ## Overlap Ordering
//!
//! The map is a `BTreeMap` keyed by [`SpanKey`], whose ordering declares two
//! spans *equal* when they overlap:
//!
//! ```text
//! compare(a, b):
//!   b.start in [a.start, a.end]  → Equal
//!   a.start in [b.start, b.end]  → Equal
//!   a.start < b.start            → Less
//!   otherwise                    → Greater
//! ```
//!
//! A lookup builds a zero-length span at the address; the tree search stops
//! at the one stored span it falls inside. This only works while stored spans
//! never overlap each other, so [`SymbolTable::insert`] evicts anything the
//! new span touches first. Ends are inclusive: `start + length` is still part
//! of a span.
//!
//! ## Address Compression
//!
//! Logs write many addresses as deltas from the previous one of the same
//! kind. [`AddressDecodeContext`] turns those back into absolute addresses
//! before anything reaches the table.
//!
//! ## Module Structure
//!
//! - **`span`**: `AddressSpan` interval value and the `SpanKey` ordering
//! - **`symbol`**: `Symbol` (name, kind, span)
//! - **`table`**: `SymbolTable` insert / lookup / remove / ordered iteration
//! - **`address_context`**: delta decoding for log address fields
//!
//! ## Example
//!
//! ```rust
//! use jitmap::domain::{Address, SymbolKind};
//! use jitmap::symbolization::{Symbol, SymbolTable};
//!
//! let mut table = SymbolTable::new();
//! table.insert(Symbol::new("foo", SymbolKind::LAZY_COMPILE, Address(0x1000), 0x40));
//!
//! assert_eq!(table.lookup(Address(0x1027)).map(Symbol::name), Some("foo"));
//! assert!(table.lookup(Address(0x2000)).is_none());
//! ```

pub mod address_context;
pub mod span;
pub mod symbol;
pub mod table;

pub use address_context::AddressDecodeContext;
pub use span::{AddressSpan, SpanKey};
pub use symbol::Symbol;
pub use table::SymbolTable;
