//! Export functionality
//!
//! - `dump`: ordered listing of live symbols (JSON or text table)
//! - `replay`: JSON document with resolved samples, hotspots and the final table

pub mod dump;
pub mod replay;

pub use dump::{dump_entries, format_dump_table, write_dump_json, DumpEntry};
pub use replay::ReplayExporter;
