//! Hotspot analysis for resolved samples.
//!
//! This module aggregates resolved ticks by the symbol on top of the stack to
//! show which code objects the engine spent its time in.
//!
//! # Architecture
//!
//! - **`SampleStats`** - Incremental aggregation as samples are resolved
//! - **`analyze_samples()`** - Batch analysis over a finished replay
//!
//! Ticks whose PC fell outside every known code object are grouped under
//! `<unknown>`; they still count towards the percentage denominator.

// Percentage calculations intentionally convert usize to f64
#![allow(clippy::cast_precision_loss)]

use serde::Serialize;
use std::collections::HashMap;

use crate::domain::SymbolKind;
use crate::profiling::ResolvedStack;

/// Maximum distinct callers kept per hotspot.
const MAX_CALLERS_PER_HOTSPOT: usize = 5;

const UNKNOWN: &str = "<unknown>";

/// A symbol hotspot with aggregated statistics.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolHotspot {
    /// Symbol name, or `<unknown>` for unresolved PCs.
    pub name: String,

    /// Kind of the symbol, if it resolved.
    #[serde(serialize_with = "serialize_kind")]
    pub kind: Option<SymbolKind>,

    /// Number of ticks with this symbol on top.
    pub count: usize,

    /// Percentage of all ticks (0.0 - 100.0).
    pub percentage: f64,

    /// Most frequent immediate callers, most common first.
    pub callers: Vec<(String, usize)>,
}

#[allow(clippy::ref_option)]
fn serialize_kind<S: serde::Serializer>(
    kind: &Option<SymbolKind>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match kind {
        Some(kind) => serializer.serialize_str(&kind.to_string()),
        None => serializer.serialize_none(),
    }
}

#[derive(Debug, Clone, Default)]
struct SymbolStats {
    kind: Option<SymbolKind>,
    count: usize,
    callers: HashMap<String, usize>,
}

/// Incremental hotspot aggregator.
#[derive(Debug, Default)]
pub struct SampleStats {
    symbols: HashMap<String, SymbolStats>,
    total_samples: usize,
}

impl SampleStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one resolved tick. Empty stacks are ignored.
    pub fn record(&mut self, stack: &ResolvedStack) {
        let Some(top) = stack.top() else {
            return;
        };
        self.total_samples += 1;

        let name = top.function().to_string();
        let stats = self.symbols.entry(name).or_default();
        stats.count += 1;
        if stats.kind.is_none() {
            stats.kind = top.symbol.as_ref().map(|s| s.kind);
        }

        if let Some(caller) = stack.frames.get(1) {
            *stats.callers.entry(caller.function().to_string()).or_insert(0) += 1;
        }
    }

    #[must_use]
    pub fn total_samples(&self) -> usize {
        self.total_samples
    }

    /// Hotspots sorted by count (descending), ties by name
    #[must_use]
    pub fn to_hotspots(&self) -> Vec<SymbolHotspot> {
        let mut hotspots: Vec<SymbolHotspot> = self
            .symbols
            .iter()
            .map(|(name, stats)| {
                let percentage = if self.total_samples > 0 {
                    (stats.count as f64 / self.total_samples as f64) * 100.0
                } else {
                    0.0
                };

                let mut callers: Vec<(String, usize)> =
                    stats.callers.iter().map(|(caller, &n)| (caller.clone(), n)).collect();
                callers.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                callers.truncate(MAX_CALLERS_PER_HOTSPOT);

                SymbolHotspot {
                    name: name.clone(),
                    kind: stats.kind,
                    count: stats.count,
                    percentage,
                    callers,
                }
            })
            .collect();

        hotspots.sort_unstable_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        hotspots
    }

    /// Share of ticks that landed outside every known code object
    #[must_use]
    pub fn unknown_percentage(&self) -> f64 {
        match self.symbols.get(UNKNOWN) {
            Some(stats) if self.total_samples > 0 => {
                (stats.count as f64 / self.total_samples as f64) * 100.0
            }
            _ => 0.0,
        }
    }
}

/// Analyze resolved samples to identify hotspots (batch analysis).
#[must_use]
pub fn analyze_samples(samples: &[ResolvedStack]) -> Vec<SymbolHotspot> {
    let mut stats = SampleStats::new();
    for stack in samples {
        stats.record(stack);
    }
    stats.to_hotspots()
}
