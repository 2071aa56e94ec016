//! Error definitions.
//!
//! Cache accesses themselves never fail: every access yields a latency. Errors
//! only arise at the edges of the simulator:
//! 1. **Configuration:** Geometries the address decoder cannot represent.
//! 2. **Traces:** Unreadable files and malformed trace lines.

use thiserror::Error;

use crate::config::Level;

/// Rejected hierarchy configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The shared block size is zero or not a power of two.
    #[error("block size {0} is not a power of two")]
    BlockSize(u32),

    /// A set count is not a power of two.
    #[error("{level} set count {sets} is not a power of two")]
    SetCount {
        /// Offending level.
        level: Level,
        /// Configured set count.
        sets: u32,
    },

    /// The L2 has zero sets; it is the last level before memory and cannot be bypassed.
    #[error("L2 cannot be disabled (set count must be non-zero)")]
    L2Disabled,

    /// Index and offset bits together exceed the address width.
    #[error("{level} needs {bits} index+offset bits, more than a 32-bit address holds")]
    AddressWidth {
        /// Offending level.
        level: Level,
        /// Required index + offset width.
        bits: u32,
    },

    /// A `sets:ways:hit_time` geometry string could not be parsed.
    #[error("invalid cache geometry '{0}' (expected sets:ways:hit_time)")]
    Geometry(String),

    /// JSON configuration could not be deserialized.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure while reading a memory trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace source could not be read.
    #[error("could not read trace: {0}")]
    Io(#[from] std::io::Error),

    /// A line is not an access kind followed by a hexadecimal address.
    #[error("malformed trace line {line}: '{content}'")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// The offending line, trimmed.
        content: String,
    },
}
