//! Two-level cache hierarchy latency simulator.
//!
//! This crate models split L1 instruction and data caches backed by a unified
//! L2 and fixed-latency main memory, for trace-driven architectural studies:
//! 1. **Decoding:** Tag/index masks derived from each level's geometry.
//! 2. **Caches:** Set-associative storage with strict LRU replacement and optional inclusion.
//! 3. **Hierarchy:** A single instance owning every level, with one entry point per access kind.
//! 4. **Simulation:** Trace loading, replay, configuration, and statistics reporting.

/// Set-associative cache levels (storage, L1, L2, inclusion).
pub mod cache;
/// Common types (address masks, access kinds, errors).
pub mod common;
/// Hierarchy configuration (defaults, per-level geometry, validation).
pub mod config;
/// The cache hierarchy instance and its access entry points.
pub mod hierarchy;
/// Trace loading and replay.
pub mod sim;
/// Per-level statistics and reporting.
pub mod stats;

/// Root configuration type; use `HierarchyConfig::default()` or deserialize from JSON.
pub use crate::config::HierarchyConfig;
/// The simulator instance; construct with `CacheHierarchy::new`.
pub use crate::hierarchy::CacheHierarchy;
/// Statistics snapshot returned by `CacheHierarchy::stats`.
pub use crate::stats::HierarchyStats;
