//! Domain types providing compile-time safety and self-documentation
//!
//! These newtype wrappers keep raw code addresses, lengths and symbol kinds
//! from being mixed up in function signatures.

use std::fmt;

/// Absolute code address in the traced engine's address space
///
/// Always an integer. Profiler logs sometimes carry addresses as doubles,
/// which silently lose precision above 2^53; nothing here does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub u64);

impl Address {
    pub const NULL: Address = Address(0);

    /// Returns true for the null address, which terminates stack walks
    #[must_use]
    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn checked_add(self, delta: u64) -> Option<Address> {
        self.0.checked_add(delta).map(Address)
    }

    #[must_use]
    pub fn checked_sub(self, delta: u64) -> Option<Address> {
        self.0.checked_sub(delta).map(Address)
    }

    #[must_use]
    pub fn saturating_add(self, delta: u64) -> Address {
        Address(self.0.saturating_add(delta))
    }

    /// Distance from `base` to this address (0 if `base` is above it)
    #[must_use]
    pub fn offset_from(self, base: Address) -> u64 {
        self.0.saturating_sub(base.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// Kind tag attached to a code region by the engine
///
/// Opaque to the symbol table. The constants cover the tags V8's profiler
/// emits; callers may use any other value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SymbolKind(pub u32);

impl SymbolKind {
    pub const BUILTIN: SymbolKind = SymbolKind(0);
    pub const STUB: SymbolKind = SymbolKind(1);
    pub const SCRIPT: SymbolKind = SymbolKind(2);
    pub const LAZY_COMPILE: SymbolKind = SymbolKind(3);
    pub const FUNCTION: SymbolKind = SymbolKind(4);
    pub const REG_EXP: SymbolKind = SymbolKind(5);
    pub const CALLBACK: SymbolKind = SymbolKind(6);

    /// Human-readable label for the well-known kinds
    #[must_use]
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::BUILTIN => Some("Builtin"),
            Self::STUB => Some("Stub"),
            Self::SCRIPT => Some("Script"),
            Self::LAZY_COMPILE => Some("LazyCompile"),
            Self::FUNCTION => Some("Function"),
            Self::REG_EXP => Some("RegExp"),
            Self::CALLBACK => Some("Callback"),
            _ => None,
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => f.write_str(label),
            None => write!(f, "Kind#{}", self.0),
        }
    }
}

impl From<u32> for SymbolKind {
    fn from(kind: u32) -> Self {
        SymbolKind(kind)
    }
}
