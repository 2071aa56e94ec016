//! Set-associative cache levels.
//!
//! This module implements the levels of the two-level hierarchy:
//! 1. **Storage:** `SetStore`, a lazily populated map of LRU-ordered tag lists.
//! 2. **L1:** Split instruction and data caches that forward misses to the L2.
//! 3. **L2:** The unified level in front of fixed-latency main memory.
//! 4. **Inclusion:** The capability the L2 uses to invalidate L1 copies.

/// Inclusion enforcement between the L2 and the L1 caches.
pub mod inclusion;

/// First-level instruction and data caches.
pub mod l1;

/// Unified second-level cache.
pub mod l2;

/// Per-level set storage with LRU replacement.
pub mod set_store;

pub use inclusion::{Invalidate, enforce_inclusion};
pub use l1::L1Cache;
pub use l2::L2Cache;
pub use set_store::{CacheSet, SetStore};
