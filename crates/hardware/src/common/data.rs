//! Memory Access Kinds.
//!
//! This module defines the classification of trace accesses. The kind selects
//! which first-level cache services the access:
//! 1. **Instruction fetches** go through the L1 instruction cache.
//! 2. **Data accesses** go through the L1 data cache.

use std::fmt;

/// Kind of memory access issued by the trace driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Instruction fetch, serviced by the L1 instruction cache.
    Instruction,

    /// Data load or store, serviced by the L1 data cache.
    ///
    /// Loads and stores are not distinguished; the hierarchy models no
    /// write policy.
    Data,
}

impl AccessKind {
    /// Parses the single-letter trace mnemonic (`I` or `D`, case-insensitive).
    pub fn from_mnemonic(token: &str) -> Option<Self> {
        match token {
            "I" | "i" => Some(Self::Instruction),
            "D" | "d" => Some(Self::Data),
            _ => None,
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instruction => write!(f, "I"),
            Self::Data => write!(f, "D"),
        }
    }
}
