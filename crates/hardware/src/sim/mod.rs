//! Trace-driven simulation.
//!
//! Provides trace loading and the replay loop that feeds a cache hierarchy
//! one access at a time.

/// Trace file parsing.
pub mod trace;

/// Replay of parsed traces through a hierarchy.
pub mod replay;

pub use replay::{ReplaySummary, replay};
pub use trace::{TraceEntry, load_trace, parse_line, read_trace};
