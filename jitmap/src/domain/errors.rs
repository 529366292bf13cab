//! Structured error types for jitmap
//!
//! Using thiserror for automatic Display implementation and error chaining.
//! Lookups that miss are not errors; they return `None`.

use super::types::Address;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SymbolTableError {
    #[error("Invalid address span: start {start} + length {length:#x} overflows")]
    InvalidSpan { start: Address, length: u64 },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AddressDecodeError {
    #[error("Malformed {context} address token: {token:?}")]
    Malformed { context: &'static str, token: String },

    #[error("{context} address token {token:?} moves out of range from {prev}")]
    OutOfRange { context: &'static str, token: String, prev: Address },
}

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Event #{index}: {source}")]
    AddressDecode {
        index: usize,
        #[source]
        source: AddressDecodeError,
    },

    #[error("Event #{index}: {source}")]
    InvalidEvent {
        index: usize,
        #[source]
        source: SymbolTableError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write export file: {0}")]
    WriteFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
