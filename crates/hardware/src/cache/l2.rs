//! Unified second-level cache.
//!
//! The L2 services misses from both L1 caches and is the last level before
//! main memory. Main memory is not modeled as a cache: an L2 miss always
//! costs the configured fixed latency. In an inclusive hierarchy every L2
//! eviction is propagated upward through [`Invalidate`].

use super::inclusion::{Invalidate, enforce_inclusion};
use super::set_store::SetStore;
use crate::common::addr::{AddressMasks, DecodedAddr};
use crate::config::CacheConfig;
use crate::stats::CacheStats;

/// Unified L2 cache backed by fixed-latency main memory.
#[derive(Debug, Clone)]
pub struct L2Cache {
    hit_time: u32,
    memory_latency: u32,
    inclusive: bool,
    masks: AddressMasks,
    sets: SetStore,
    stats: CacheStats,
}

impl L2Cache {
    /// Creates an empty L2 with zeroed statistics.
    ///
    /// # Arguments
    ///
    /// * `config` - Geometry and hit time; the set count must be non-zero.
    /// * `block_size` - Line size shared with the L1 caches.
    /// * `memory_latency` - Cycles charged for every L2 miss.
    /// * `inclusive` - Whether evictions invalidate the L1 copies.
    pub fn new(config: &CacheConfig, block_size: u32, memory_latency: u32, inclusive: bool) -> Self {
        Self {
            hit_time: config.hit_time,
            memory_latency,
            inclusive,
            masks: AddressMasks::derive(config.sets, block_size),
            sets: SetStore::new(config.ways),
            stats: CacheStats::default(),
        }
    }

    /// Services an access that missed (or bypassed) an L1.
    ///
    /// On a hit the L2 hit time is returned. On a miss the line is filled,
    /// evicting the set's LRU line when full; if the hierarchy is inclusive
    /// the victim is invalidated in every level of `uppers`. The miss costs
    /// the hit time plus the memory latency, and the memory latency is
    /// accumulated as this level's penalty.
    ///
    /// # Arguments
    ///
    /// * `addr` - The accessed address.
    /// * `uppers` - Upper levels that may hold a copy of an evicted line.
    ///
    /// # Returns
    ///
    /// The cycles this access costs from the L2's point of view.
    pub fn access(&mut self, addr: u32, uppers: &mut [&mut dyn Invalidate]) -> u32 {
        self.stats.references += 1;

        let DecodedAddr { tag, index } = self.masks.decode(addr);
        if self.sets.lookup(index, tag) {
            return self.hit_time;
        }

        self.stats.misses += 1;
        if let Some(victim) = self.sets.insert(index, tag) {
            let victim_addr = self.masks.compose(victim, index);
            tracing::trace!(addr, victim_addr, index, "L2 eviction");
            if self.inclusive {
                let _ = enforce_inclusion(victim_addr, uppers);
            }
        }

        self.stats.penalties += u64::from(self.memory_latency);
        self.hit_time.saturating_add(self.memory_latency)
    }

    /// Checks whether the line containing `addr` is resident, without touching LRU state.
    pub fn contains(&self, addr: u32) -> bool {
        let DecodedAddr { tag, index } = self.masks.decode(addr);
        self.sets.contains(index, tag)
    }

    /// Line addresses (offset bits zero) of every resident line.
    pub fn lines(&self) -> Vec<u32> {
        self.sets
            .iter()
            .map(|(index, tag)| self.masks.compose(tag, index))
            .collect()
    }

    /// Hit time in cycles.
    pub const fn hit_time(&self) -> u32 {
        self.hit_time
    }

    /// Main-memory latency charged on a miss.
    pub const fn memory_latency(&self) -> u32 {
        self.memory_latency
    }

    /// Whether evictions are propagated to the L1 caches.
    pub const fn is_inclusive(&self) -> bool {
        self.inclusive
    }

    /// Address masks of this level.
    pub const fn masks(&self) -> &AddressMasks {
        &self.masks
    }

    /// Resident lines.
    pub const fn sets(&self) -> &SetStore {
        &self.sets
    }

    /// Access statistics.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }
}
