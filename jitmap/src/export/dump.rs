//! Diagnostic dump of a symbol table
//!
//! Lists live code objects in ascending address order as
//! `(name, start, length)` rows. Read-only; nothing here mutates the table.

use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;

use crate::domain::ExportError;
use crate::symbolization::{Symbol, SymbolTable};

/// One row of the dump
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DumpEntry {
    pub name: String,
    /// Start address as lowercase hex without prefix
    pub start: String,
    pub length: u64,
}

impl From<&Symbol> for DumpEntry {
    fn from(symbol: &Symbol) -> Self {
        Self {
            name: symbol.name().to_string(),
            start: format!("{:x}", symbol.start()),
            length: symbol.span().length(),
        }
    }
}

/// Dump rows in ascending start address order
#[must_use]
pub fn dump_entries(table: &SymbolTable) -> Vec<DumpEntry> {
    table.iter().map(DumpEntry::from).collect()
}

/// Write the dump as a JSON array
///
/// # Errors
/// Returns an error if serialization or the write fails
pub fn write_dump_json<W: Write>(table: &SymbolTable, writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, &dump_entries(table))?;
    Ok(())
}

/// Render the dump as an aligned text table
#[must_use]
pub fn format_dump_table(table: &SymbolTable) -> String {
    let entries = dump_entries(table);
    let name_width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0).max("Name".len());

    let mut output = format!("{:<name_width$}  {:>16}  {:>8}\n", "Name", "Address", "Length");
    for entry in &entries {
        let _ = writeln!(
            output,
            "{:<name_width$}  {:>16}  {:>8}",
            entry.name, entry.start, entry.length
        );
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, SymbolKind};

    fn table() -> SymbolTable {
        let mut table = SymbolTable::new();
        table.insert(Symbol::new("second", SymbolKind::STUB, Address(0x2000), 0x20));
        table.insert(Symbol::new("first", SymbolKind::FUNCTION, Address(0x1000), 0x10));
        table
    }

    #[test]
    fn test_dump_entries_are_ordered() {
        assert_eq!(
            dump_entries(&table()),
            vec![
                DumpEntry { name: "first".to_string(), start: "1000".to_string(), length: 16 },
                DumpEntry { name: "second".to_string(), start: "2000".to_string(), length: 32 },
            ]
        );
    }

    #[test]
    fn test_write_dump_json() {
        let mut buffer = Vec::new();
        write_dump_json(&table(), &mut buffer).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed[0]["name"], "first");
        assert_eq!(parsed[1]["start"], "2000");
        assert_eq!(parsed[1]["length"], 32);
    }

    #[test]
    fn test_format_dump_table() {
        let text = format_dump_table(&table());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Name"));
        assert!(lines[1].starts_with("first "));
        assert!(lines[1].ends_with("16"));
        assert!(lines[2].contains("2000"));
    }

    #[test]
    fn test_empty_table_dumps_header_only() {
        assert_eq!(format_dump_table(&SymbolTable::new()).lines().count(), 1);
    }
}
