//! # jitmap - Symbol Resolution for JIT Profiler Traces
//!
//! jitmap replays a captured profiler trace from a JIT-compiling script
//! engine and resolves every sampled program counter to the code object that
//! was executing. The engine's code lives at addresses that only exist while
//! the program runs: functions get compiled, recompiled, moved by the garbage
//! collector and freed. The trace records each of those events, and jitmap
//! keeps an address index in step with them.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Trace file (JSON)                           │
//! │  code-creation / code-move / code-delete / tick                 │
//! │  addresses absolute or delta-encoded                            │
//! └───────────────────────┬─────────────────────────────────────────┘
//!                         │ trace_data (AddressDecodeContext per kind)
//!                         ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      jitmap (This Crate)                        │
//! │                                                                 │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐         │
//! │  │ TraceSession │──▶│ SymbolTable  │◀──│StackResolver │         │
//! │  │  (replay)    │   │ (BTreeMap by │   │  (ticks)     │         │
//! │  └──────────────┘   │  SpanKey)    │   └──────┬───────┘         │
//! │                     └──────┬───────┘          │                 │
//! │                            ▼                  ▼                 │
//! │                     ┌──────────────┐   ┌──────────────┐         │
//! │                     │    Export    │   │   Analysis   │         │
//! │                     │ (dump, JSON) │   │  (hotspots)  │         │
//! │                     └──────────────┘   └──────────────┘         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`symbolization`]: the address index
//!   - `AddressSpan` / `SpanKey`: intervals ordered so that overlap means equal
//!   - `SymbolTable`: O(log n) insert, point lookup and removal
//!   - `AddressDecodeContext`: delta-compressed address decoding
//!
//! - [`profiling`]: replay pipeline
//!   - `TraceSession`: owns one table for one trace and applies events
//!   - `StackResolver`: names the frames of a tick
//!
//! - [`analysis`]: per-symbol tick counts and caller breakdown
//!
//! - [`export`]: ordered symbol dump and JSON replay export
//!
//! - [`trace_data`]: trace file parsing and address decoding
//!
//! - [`cli`]: command-line argument parsing
//!
//! - [`domain`]: core types (`Address`, `SymbolKind`) and errors
//!
//! ## Typical Usage
//!
//! ```bash
//! # Print resolved stacks and the hottest symbols
//! jitmap trace.json
//!
//! # Summary only, plus the symbol table left at the end of the trace
//! RUST_LOG=info jitmap -q --dump-symbols trace.json
//!
//! # The same table as JSON rows
//! jitmap -q --dump-symbols --dump-format json trace.json
//!
//! # Write everything as JSON for other tools
//! jitmap trace.json --export resolved.json
//! ```
//!
//! ## Key Concepts
//!
//! - **Code object**: a block of machine code the engine generated, announced
//!   with a name, kind, start address and length
//! - **Tick**: a profiler sample; a PC plus the return addresses above it
//! - **Overlap wins**: new code over an occupied range evicts the old entry,
//!   which is what recompilation looks like in the log
//! - **Inclusive ends**: `start + length` belongs to the span

pub mod analysis;
pub mod cli;
pub mod domain;
pub mod export;
pub mod profiling;
pub mod symbolization;
pub mod trace_data;
