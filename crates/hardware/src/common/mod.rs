//! Common types shared by every part of the cache simulator.
//!
//! This module provides the fundamental building blocks used across levels:
//! 1. **Address Decoding:** Tag/index masks and the decoded address pair.
//! 2. **Access Kinds:** Instruction versus data accesses from the trace.
//! 3. **Error Handling:** Configuration and trace error types.

/// Address decomposition into tag, index, and block offset.
pub mod addr;

/// Access kind definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{AddressMasks, DecodedAddr};
pub use data::AccessKind;
pub use error::{ConfigError, TraceError};
