use std::fmt;

use super::span::AddressSpan;
use crate::domain::{Address, SymbolKind, SymbolTableError};

/// A named block of generated code
///
/// Code-creation events produce these; tick program counters are looked up
/// against them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    name: String,
    kind: SymbolKind,
    span: AddressSpan,
}

impl Symbol {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SymbolKind, address: Address, length: u64) -> Self {
        Self::with_span(name, kind, AddressSpan::new(address, length))
    }

    #[must_use]
    pub fn with_span(name: impl Into<String>, kind: SymbolKind, span: AddressSpan) -> Self {
        Self { name: name.into(), kind, span }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    #[must_use]
    pub fn span(&self) -> &AddressSpan {
        &self.span
    }

    #[must_use]
    pub fn start(&self) -> Address {
        self.span.start()
    }

    /// Same symbol relocated to a new start address
    ///
    /// # Errors
    /// Returns `InvalidSpan` if the relocated span would run past the top of
    /// the address space
    pub fn moved_to(&self, address: Address) -> Result<Self, SymbolTableError> {
        let span = AddressSpan::try_new(address, self.span.length())?;
        Ok(Self::with_span(self.name.clone(), self.kind, span))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.name, self.span)
    }
}
