//! Trace replay.
//!
//! Drives a [`CacheHierarchy`] over a sequence of trace entries, issuing
//! exactly one access per entry, strictly in order.

use serde::Serialize;

use super::trace::TraceEntry;
use crate::common::data::AccessKind;
use crate::hierarchy::CacheHierarchy;

/// Totals of one replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    /// Instruction fetches issued.
    pub instructions: u64,
    /// Data accesses issued.
    pub data: u64,
    /// Sum of the latencies returned by every access.
    pub total_cycles: u64,
}

impl ReplaySummary {
    /// Total accesses issued.
    pub const fn accesses(&self) -> u64 {
        self.instructions + self.data
    }

    /// Mean latency per access (0.0 for an empty trace).
    pub fn avg_latency(&self) -> f64 {
        let accesses = self.accesses();
        if accesses == 0 {
            0.0
        } else {
            self.total_cycles as f64 / accesses as f64
        }
    }
}

/// Replays `entries` through `hierarchy`.
pub fn replay<I>(hierarchy: &mut CacheHierarchy, entries: I) -> ReplaySummary
where
    I: IntoIterator<Item = TraceEntry>,
{
    let mut summary = ReplaySummary::default();
    for TraceEntry { kind, addr } in entries {
        let cycles = hierarchy.access(kind, addr);
        match kind {
            AccessKind::Instruction => summary.instructions += 1,
            AccessKind::Data => summary.data += 1,
        }
        summary.total_cycles += u64::from(cycles);
    }
    tracing::debug!(
        accesses = summary.accesses(),
        total_cycles = summary.total_cycles,
        "trace replay complete"
    );
    summary
}
