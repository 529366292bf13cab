//! Trace replay modules
//!
//! This module contains the pipeline that turns decoded code events into
//! resolved stack samples:
//! - Code-lifecycle event model
//! - Replay session owning the symbol table
//! - Stack trace resolution

pub mod events;
pub mod session;
pub mod stack_resolver;

// Re-export common types
pub use events::CodeEvent;
pub use session::{SessionReport, SessionStats, TraceSession};
pub use stack_resolver::{ResolvedFrame, ResolvedStack, StackResolver, SymbolRef};
