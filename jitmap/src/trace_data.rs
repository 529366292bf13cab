//! Trace file loading
//!
//! A trace file is JSON holding code-lifecycle events and ticks in log order:
//!
//! ```json
//! { "events": [
//!     { "type": "code-creation", "kind": 3, "address": "0x2c1a0000", "length": 64, "name": "foo" },
//!     { "type": "code-move", "from": "+0", "to": "0x2c1b0000" },
//!     { "type": "code-delete", "address": "2c1b0000" },
//!     { "type": "tick", "pc": "0x2c1a0027", "stack": ["+40", "-8"] }
//! ] }
//! ```
//!
//! Address fields may be absolute or delta-encoded. Code addresses share one
//! decode context, tick PCs another and stack entries a third, so a delta is
//! always relative to the previous address of the same kind.

use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::domain::{Address, AddressDecodeError, SymbolKind, TraceError};
use crate::profiling::CodeEvent;
use crate::symbolization::{AddressDecodeContext, AddressSpan};

#[derive(Debug, Deserialize)]
struct TraceFile {
    events: Vec<RawEvent>,
}

/// Event as written in the file, addresses still encoded
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum RawEvent {
    CodeCreation { kind: u32, address: String, length: u64, name: String },
    CodeMove { from: String, to: String },
    CodeDelete { address: String },
    Tick {
        pc: String,
        #[serde(default)]
        stack: Vec<String>,
    },
}

/// Per-kind decode state for one pass over a trace
struct Decoder {
    code: AddressDecodeContext,
    pc: AddressDecodeContext,
    stack: AddressDecodeContext,
}

impl Decoder {
    fn new() -> Self {
        Self {
            code: AddressDecodeContext::new("code"),
            pc: AddressDecodeContext::new("pc"),
            stack: AddressDecodeContext::new("stack"),
        }
    }

    fn decode(&mut self, index: usize, raw: RawEvent) -> Result<CodeEvent, TraceError> {
        let wrap = move |source: AddressDecodeError| TraceError::AddressDecode { index, source };

        let event = match raw {
            RawEvent::CodeCreation { kind, address, length, name } => {
                let address = self.code.decode(&address).map_err(wrap)?;
                AddressSpan::try_new(address, length)
                    .map_err(|source| TraceError::InvalidEvent { index, source })?;
                CodeEvent::Create { name, kind: SymbolKind(kind), address, length }
            }
            RawEvent::CodeMove { from, to } => {
                let from = self.code.decode(&from).map_err(wrap)?;
                let to = self.code.decode(&to).map_err(wrap)?;
                CodeEvent::Move { from, to }
            }
            RawEvent::CodeDelete { address } => {
                CodeEvent::Delete { address: self.code.decode(&address).map_err(wrap)? }
            }
            RawEvent::Tick { pc, stack } => {
                let pc = self.pc.decode(&pc).map_err(wrap)?;
                let stack = stack
                    .iter()
                    .map(|token| self.stack.decode(token))
                    .collect::<Result<Vec<Address>, _>>()
                    .map_err(wrap)?;
                CodeEvent::Tick { pc, stack }
            }
        };
        Ok(event)
    }
}

/// Decoded trace, ready for replay
#[derive(Debug, Default)]
pub struct TraceData {
    pub events: Vec<CodeEvent>,
}

impl TraceData {
    /// Parse a trace file into absolute-address events
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not a valid trace,
    /// or contains an address that does not decode
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a trace from any reader
    ///
    /// # Errors
    /// Same as [`TraceData::from_file`], minus opening the file
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TraceError> {
        let trace: TraceFile = serde_json::from_reader(reader)?;

        let mut decoder = Decoder::new();
        let events = trace
            .events
            .into_iter()
            .enumerate()
            .map(|(index, raw)| decoder.decode(index, raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { events })
    }

    /// Number of tick events in the trace
    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, CodeEvent::Tick { .. })).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
