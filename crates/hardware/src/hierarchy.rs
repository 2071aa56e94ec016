//! The cache hierarchy instance.
//!
//! `CacheHierarchy` owns every piece of simulator state: the two L1 caches,
//! the unified L2, and their statistics. The trace driver calls one access
//! entry point per trace line and reads statistics when it is done.
//!
//! Data flows downward (L1 → L2 → memory). The only upward flow is inclusion
//! invalidation, which the L2 performs on the L1s through the
//! [`Invalidate`](crate::cache::Invalidate) capability during the same call.

use crate::cache::{L1Cache, L2Cache};
use crate::common::data::AccessKind;
use crate::common::error::ConfigError;
use crate::config::{HierarchyConfig, Level};
use crate::stats::HierarchyStats;

/// Split L1 instruction/data caches backed by a unified L2 and main memory.
///
/// # Examples
///
/// ```
/// use cachesim_core::CacheHierarchy;
/// use cachesim_core::config::{CacheConfig, HierarchyConfig};
///
/// let config = HierarchyConfig {
///     icache: CacheConfig::new(1, 2, 1),
///     dcache: CacheConfig::disabled(),
///     l2: CacheConfig::new(1, 4, 10),
///     inclusive: false,
///     block_size: 1,
///     memory_latency: 100,
/// };
/// let mut hierarchy = CacheHierarchy::new(&config).unwrap();
///
/// assert_eq!(hierarchy.instruction_access(0), 1 + 10 + 100);
/// assert_eq!(hierarchy.instruction_access(0), 1);
/// // Disabled L1-D: the L2 latency is returned unchanged.
/// assert_eq!(hierarchy.data_access(0), 10);
/// ```
#[derive(Debug, Clone)]
pub struct CacheHierarchy {
    config: HierarchyConfig,
    icache: L1Cache,
    dcache: L1Cache,
    l2: L2Cache,
}

impl CacheHierarchy {
    /// Validates `config`, derives every level's masks, and starts with empty
    /// caches and zeroed statistics.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`HierarchyConfig::validate`].
    pub fn new(config: &HierarchyConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        tracing::debug!(
            icache = %config.icache,
            dcache = %config.dcache,
            l2 = %config.l2,
            block_size = config.block_size,
            memory_latency = config.memory_latency,
            inclusive = config.inclusive,
            "cache hierarchy initialized"
        );

        Ok(Self {
            config: *config,
            icache: L1Cache::new(Level::Instruction, &config.icache, config.block_size),
            dcache: L1Cache::new(Level::Data, &config.dcache, config.block_size),
            l2: L2Cache::new(
                &config.l2,
                config.block_size,
                config.memory_latency,
                config.inclusive,
            ),
        })
    }

    /// Empties every level and zeroes all statistics, keeping the configuration.
    pub fn reset(&mut self) {
        let config = self.config;
        self.icache = L1Cache::new(Level::Instruction, &config.icache, config.block_size);
        self.dcache = L1Cache::new(Level::Data, &config.dcache, config.block_size);
        self.l2 = L2Cache::new(
            &config.l2,
            config.block_size,
            config.memory_latency,
            config.inclusive,
        );
    }

    /// Performs an instruction fetch of `addr` and returns its latency in cycles.
    pub fn instruction_access(&mut self, addr: u32) -> u32 {
        self.icache.access(addr, &mut self.l2, &mut self.dcache)
    }

    /// Performs a data access of `addr` and returns its latency in cycles.
    pub fn data_access(&mut self, addr: u32) -> u32 {
        self.dcache.access(addr, &mut self.l2, &mut self.icache)
    }

    /// Dispatches to [`instruction_access`](Self::instruction_access) or
    /// [`data_access`](Self::data_access) by `kind`.
    pub fn access(&mut self, kind: AccessKind, addr: u32) -> u32 {
        match kind {
            AccessKind::Instruction => self.instruction_access(addr),
            AccessKind::Data => self.data_access(addr),
        }
    }

    /// Snapshot of every level's counters.
    pub const fn stats(&self) -> HierarchyStats {
        HierarchyStats {
            icache: *self.icache.stats(),
            dcache: *self.dcache.stats(),
            l2: *self.l2.stats(),
        }
    }

    /// The configuration the hierarchy was built from.
    pub const fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    /// L1 instruction cache.
    pub const fn icache(&self) -> &L1Cache {
        &self.icache
    }

    /// L1 data cache.
    pub const fn dcache(&self) -> &L1Cache {
        &self.dcache
    }

    /// Unified L2 cache.
    pub const fn l2(&self) -> &L2Cache {
        &self.l2
    }
}
