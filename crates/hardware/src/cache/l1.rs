//! First-level instruction and data caches.
//!
//! Both L1 caches share this implementation and differ only in configuration.
//! A miss is forwarded to the [`L2Cache`], whose latency is charged on top of
//! the L1 hit time. A level configured with zero sets is disabled and passes
//! every access straight through to the L2.

use super::inclusion::Invalidate;
use super::l2::L2Cache;
use super::set_store::SetStore;
use crate::common::addr::{AddressMasks, DecodedAddr};
use crate::config::{CacheConfig, Level};
use crate::stats::CacheStats;

/// A first-level cache (instruction or data).
#[derive(Debug, Clone)]
pub struct L1Cache {
    level: Level,
    hit_time: u32,
    /// `None` when the level is disabled.
    masks: Option<AddressMasks>,
    sets: SetStore,
    stats: CacheStats,
}

impl L1Cache {
    /// Creates an empty L1 with zeroed statistics.
    ///
    /// # Arguments
    ///
    /// * `level` - Which L1 this is; used for reporting and tracing.
    /// * `config` - Geometry and hit time; zero sets disables the level.
    /// * `block_size` - Line size shared with the L2.
    pub fn new(level: Level, config: &CacheConfig, block_size: u32) -> Self {
        Self {
            level,
            hit_time: config.hit_time,
            masks: config
                .is_enabled()
                .then(|| AddressMasks::derive(config.sets, block_size)),
            sets: SetStore::new(config.ways),
            stats: CacheStats::default(),
        }
    }

    /// Performs an access through this cache.
    ///
    /// A disabled level returns the L2 latency unchanged. Otherwise a hit
    /// costs the hit time; a miss fetches from the L2, fills the line (the
    /// LRU line is dropped if the set is full) and costs the hit time plus
    /// the L2 latency, which is accumulated as this level's penalty.
    ///
    /// # Arguments
    ///
    /// * `addr` - The accessed address.
    /// * `l2` - The next level.
    /// * `peer` - The other L1, reachable by the L2 for inclusion enforcement.
    ///
    /// # Returns
    ///
    /// The cycles this access costs.
    pub fn access(&mut self, addr: u32, l2: &mut L2Cache, peer: &mut dyn Invalidate) -> u32 {
        self.stats.references += 1;

        let Some(masks) = self.masks else {
            return l2.access(addr, &mut [peer]);
        };

        let DecodedAddr { tag, index } = masks.decode(addr);
        if self.sets.lookup(index, tag) {
            return self.hit_time;
        }

        self.stats.misses += 1;
        let penalty = {
            let mut uppers: [&mut dyn Invalidate; 2] = [&mut *self, peer];
            l2.access(addr, &mut uppers)
        };
        // L1 victims are dropped silently; the hierarchy models no write-back.
        let _ = self.sets.insert(index, tag);

        self.stats.penalties += u64::from(penalty);
        self.hit_time.saturating_add(penalty)
    }

    /// Checks whether the line containing `addr` is resident, without touching LRU state.
    pub fn contains(&self, addr: u32) -> bool {
        self.masks.is_some_and(|masks| {
            let DecodedAddr { tag, index } = masks.decode(addr);
            self.sets.contains(index, tag)
        })
    }

    /// Line addresses (offset bits zero) of every resident line.
    pub fn lines(&self) -> Vec<u32> {
        self.masks.map_or_else(Vec::new, |masks| {
            self.sets
                .iter()
                .map(|(index, tag)| masks.compose(tag, index))
                .collect()
        })
    }

    /// Which L1 this is.
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Returns `false` if the level is bypassed.
    pub const fn is_enabled(&self) -> bool {
        self.masks.is_some()
    }

    /// Hit time in cycles.
    pub const fn hit_time(&self) -> u32 {
        self.hit_time
    }

    /// Address masks, or `None` for a disabled level.
    pub const fn masks(&self) -> Option<&AddressMasks> {
        self.masks.as_ref()
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

impl Invalidate for L1Cache {
    fn invalidate(&mut self, addr: u32) -> bool {
        let Some(masks) = self.masks else {
            return false;
        };
        let DecodedAddr { tag, index } = masks.decode(addr);
        let removed = self.sets.remove(index, tag);
        if removed {
            tracing::trace!(level = %self.level, addr, "L1 line invalidated");
        }
        removed
    }
}
