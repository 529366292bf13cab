//! Analysis logic for replayed traces
//!
//! Pure aggregation over resolved samples, separated from presentation.

pub mod hotspot_analyzer;

pub use hotspot_analyzer::{analyze_samples, SampleStats, SymbolHotspot};
