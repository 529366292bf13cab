use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::analysis::{analyze_samples, SymbolHotspot};
use crate::domain::ExportError;
use crate::profiling::{ResolvedFrame, SessionReport, SessionStats};

use super::dump::{dump_entries, DumpEntry};

#[derive(Debug, Serialize)]
struct ExportedFrame {
    /// Frame address as `0x`-prefixed hex
    addr: String,
    function: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<u64>,
}

impl From<&ResolvedFrame> for ExportedFrame {
    fn from(frame: &ResolvedFrame) -> Self {
        Self {
            addr: frame.addr.to_string(),
            function: frame.function().to_string(),
            kind: frame.symbol.as_ref().map(|s| s.kind.to_string()),
            offset: frame.symbol.as_ref().map(|s| frame.addr.offset_from(s.start)),
        }
    }
}

/// Export document container
#[derive(Debug, Serialize)]
struct ReplayExport {
    stats: SessionStats,
    hotspots: Vec<SymbolHotspot>,
    samples: Vec<Vec<ExportedFrame>>,
    symbols: Vec<DumpEntry>,
}

/// JSON exporter for a finished replay
pub struct ReplayExporter {
    document: ReplayExport,
}

impl ReplayExporter {
    #[must_use]
    pub fn new(report: &SessionReport) -> Self {
        let document = ReplayExport {
            stats: report.stats,
            hotspots: analyze_samples(&report.samples),
            samples: report
                .samples
                .iter()
                .map(|stack| stack.frames.iter().map(ExportedFrame::from).collect())
                .collect(),
            symbols: dump_entries(&report.table),
        };
        Self { document }
    }

    /// Write the export document to `writer`
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails
    pub fn export<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        serde_json::to_writer_pretty(writer, &self.document)?;
        Ok(())
    }

    /// Write the export document to a file, creating or truncating it
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| ExportError::WriteFailed(format!("{}: {e}", path.display())))?;
        let mut writer = BufWriter::new(file);
        self.export(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
