//! Decoding of delta-compressed addresses
//!
//! Profiler logs shrink address fields by writing many of them relative to
//! the previous address of the same entry kind:
//!
//! ```text
//! 0x2c1a0040   absolute (the "0x" prefix is optional)
//! +1f0         previous + 0x1f0
//! -40          previous - 0x40
//! ```
//!
//! One [`AddressDecodeContext`] tracks the running value for one entry kind.
//! The symbol table never sees encoded values; callers decode first.

use crate::domain::{Address, AddressDecodeError};

/// Last absolute address seen for one kind of log entry
#[derive(Debug, Clone)]
pub struct AddressDecodeContext {
    name: &'static str,
    prev: Address,
}

impl AddressDecodeContext {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self { name, prev: Address::NULL }
    }

    /// Last successfully decoded address
    #[must_use]
    pub fn get(&self) -> Address {
        self.prev
    }

    pub fn reset(&mut self) {
        self.prev = Address::NULL;
    }

    /// Decode an absolute or relative address token
    ///
    /// The running address only advances on success.
    ///
    /// # Errors
    /// Returns `Malformed` for anything that is not (signed) hex and
    /// `OutOfRange` if a delta leaves the 64-bit address space
    pub fn decode(&mut self, token: &str) -> Result<Address, AddressDecodeError> {
        let token = token.trim();

        let addr = if let Some(delta) = token.strip_prefix('+') {
            let delta = self.parse_hex(token, delta)?;
            self.prev.checked_add(delta).ok_or_else(|| self.out_of_range(token))?
        } else if let Some(delta) = token.strip_prefix('-') {
            let delta = self.parse_hex(token, delta)?;
            self.prev.checked_sub(delta).ok_or_else(|| self.out_of_range(token))?
        } else {
            Address(self.parse_hex(token, token)?)
        };

        self.prev = addr;
        Ok(addr)
    }

    fn parse_hex(&self, token: &str, digits: &str) -> Result<u64, AddressDecodeError> {
        let digits =
            digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")).unwrap_or(digits);

        // from_str_radix would also accept a sign here
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(self.malformed(token));
        }
        u64::from_str_radix(digits, 16).map_err(|_| self.malformed(token))
    }

    fn malformed(&self, token: &str) -> AddressDecodeError {
        AddressDecodeError::Malformed { context: self.name, token: token.to_string() }
    }

    fn out_of_range(&self, token: &str) -> AddressDecodeError {
        AddressDecodeError::OutOfRange {
            context: self.name,
            token: token.to_string(),
            prev: self.prev,
        }
    }
}
