//! CLI argument definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "jitmap",
    about = "Resolve JIT code addresses in a profiler trace to symbols",
    after_help = "\
EXAMPLES:
    jitmap trace.json                        Print resolved stacks and a summary
    jitmap -q --dump-symbols trace.json      Summary plus the final symbol table
    jitmap -q --dump-symbols --dump-format json trace.json
                                             Final symbol table as JSON
    jitmap trace.json --export out.json      Also write everything as JSON"
)]
pub struct Args {
    /// Trace file to replay
    #[arg(value_name = "TRACE")]
    pub trace: PathBuf,

    /// Print the symbol table as it stands at the end of the trace
    #[arg(long)]
    pub dump_symbols: bool,

    /// Format used by --dump-symbols
    #[arg(long, value_enum, default_value_t = DumpFormat::Table)]
    pub dump_format: DumpFormat,

    /// Export resolved samples, hotspots and symbols to a JSON file
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Number of hotspot rows to print
    #[arg(long, default_value = "10")]
    pub top: usize,

    /// Suppress per-sample stack output
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    Table,
    Json,
}
