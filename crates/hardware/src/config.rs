//! Configuration system for the cache hierarchy.
//!
//! This module defines the structures used to parameterize the simulator. It provides:
//! 1. **Defaults:** Baseline geometry for the L1 instruction, L1 data, and L2 caches.
//! 2. **Structures:** Per-level `CacheConfig` and the root `HierarchyConfig`.
//! 3. **Validation:** Rejection of geometries the address decoder cannot represent.
//!
//! Configuration is supplied as JSON (`HierarchyConfig::from_json`), assembled
//! from `sets:ways:hit_time` strings on the command line, or taken from
//! `HierarchyConfig::default()`.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::common::addr::{ADDRESS_BITS, ceil_log2};
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline hierarchy when not explicitly overridden.
mod defaults {
    /// Default L1 instruction cache set count.
    pub const ICACHE_SETS: u32 = 128;

    /// Default L1 instruction cache associativity.
    pub const ICACHE_WAYS: u32 = 2;

    /// Default L1 instruction cache hit time in cycles.
    pub const ICACHE_HIT_TIME: u32 = 1;

    /// Default L1 data cache set count.
    pub const DCACHE_SETS: u32 = 128;

    /// Default L1 data cache associativity.
    pub const DCACHE_WAYS: u32 = 4;

    /// Default L1 data cache hit time in cycles.
    pub const DCACHE_HIT_TIME: u32 = 1;

    /// Default L2 set count.
    pub const L2_SETS: u32 = 512;

    /// Default L2 associativity.
    pub const L2_WAYS: u32 = 8;

    /// Default L2 hit time in cycles.
    pub const L2_HIT_TIME: u32 = 10;

    /// Default line size in bytes, shared by every level.
    pub const BLOCK_SIZE: u32 = 64;

    /// Default main-memory latency in cycles.
    pub const MEMORY_LATENCY: u32 = 100;
}

/// Identifies one cache level of the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// First-level instruction cache.
    Instruction,
    /// First-level data cache.
    Data,
    /// Unified second-level cache.
    Unified,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Instruction => "L1-I",
            Self::Data => "L1-D",
            Self::Unified => "L2",
        };
        f.write_str(name)
    }
}

/// Geometry and timing of a single cache level.
///
/// A set count of zero disables the level: accesses pass straight through to
/// the next level and no hit time is charged. Only the L1 caches may be
/// disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Number of sets (power of two, or 0 to disable the level).
    #[serde(default)]
    pub sets: u32,

    /// Associativity (ways per set). Zero forces every access to miss.
    #[serde(default)]
    pub ways: u32,

    /// Cycles charged for a hit at this level.
    #[serde(default)]
    pub hit_time: u32,
}

impl CacheConfig {
    /// Creates a level configuration.
    pub const fn new(sets: u32, ways: u32, hit_time: u32) -> Self {
        Self {
            sets,
            ways,
            hit_time,
        }
    }

    /// A level with zero sets, bypassed on every access.
    pub const fn disabled() -> Self {
        Self::new(0, 0, 0)
    }

    /// Returns `true` unless the level is bypassed.
    pub const fn is_enabled(&self) -> bool {
        self.sets != 0
    }

    /// Total number of lines the level can hold.
    pub const fn capacity_lines(&self) -> u64 {
        self.sets as u64 * self.ways as u64
    }

    fn default_icache() -> Self {
        Self::new(
            defaults::ICACHE_SETS,
            defaults::ICACHE_WAYS,
            defaults::ICACHE_HIT_TIME,
        )
    }

    fn default_dcache() -> Self {
        Self::new(
            defaults::DCACHE_SETS,
            defaults::DCACHE_WAYS,
            defaults::DCACHE_HIT_TIME,
        )
    }

    fn default_l2() -> Self {
        Self::new(defaults::L2_SETS, defaults::L2_WAYS, defaults::L2_HIT_TIME)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

impl FromStr for CacheConfig {
    type Err = ConfigError;

    /// Parses the `sets:ways:hit_time` notation, e.g. `128:2:1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim().split(':').collect();
        let [sets, ways, hit_time] = fields.as_slice() else {
            return Err(ConfigError::Geometry(s.to_string()));
        };
        let parse = |field: &str| {
            field
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::Geometry(s.to_string()))
        };
        Ok(Self::new(parse(*sets)?, parse(*ways)?, parse(*hit_time)?))
    }
}

impl fmt::Display for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.sets, self.ways, self.hit_time)
    }
}

/// Root configuration for the two-level hierarchy.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{CacheConfig, HierarchyConfig};
///
/// let json = r#"{
///     "icache": { "sets": 64, "ways": 2, "hit_time": 1 },
///     "dcache": { "sets": 0 },
///     "l2": { "sets": 256, "ways": 8, "hit_time": 10 },
///     "inclusive": true,
///     "block_size": 32,
///     "memory_latency": 80
/// }"#;
///
/// let config = HierarchyConfig::from_json(json).unwrap();
/// assert_eq!(config.icache, CacheConfig::new(64, 2, 1));
/// assert!(!config.dcache.is_enabled());
/// assert!(config.inclusive);
/// assert_eq!(config.memory_latency, 80);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HierarchyConfig {
    /// L1 instruction cache.
    #[serde(default = "CacheConfig::default_icache")]
    pub icache: CacheConfig,

    /// L1 data cache.
    #[serde(default = "CacheConfig::default_dcache")]
    pub dcache: CacheConfig,

    /// Unified L2 cache.
    #[serde(default = "CacheConfig::default_l2")]
    pub l2: CacheConfig,

    /// When set, L2 evictions invalidate the matching L1 lines.
    #[serde(default)]
    pub inclusive: bool,

    /// Line size in bytes, shared by every level.
    #[serde(default = "HierarchyConfig::default_block_size")]
    pub block_size: u32,

    /// Fixed main-memory latency in cycles charged on an L2 miss.
    #[serde(default = "HierarchyConfig::default_memory_latency")]
    pub memory_latency: u32,
}

impl HierarchyConfig {
    fn default_block_size() -> u32 {
        defaults::BLOCK_SIZE
    }

    fn default_memory_latency() -> u32 {
        defaults::MEMORY_LATENCY
    }

    /// Deserializes a configuration from JSON; missing fields take their defaults.
    ///
    /// The result is not validated; `CacheHierarchy::new` does that.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the configuration of `level`.
    pub const fn level(&self, level: Level) -> &CacheConfig {
        match level {
            Level::Instruction => &self.icache,
            Level::Data => &self.dcache,
            Level::Unified => &self.l2,
        }
    }

    /// Checks that every level can be decoded with power-of-two masks.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::BlockSize`] if the block size is not a power of two.
    /// - [`ConfigError::L2Disabled`] if the L2 has zero sets.
    /// - [`ConfigError::SetCount`] if an enabled level has a non-power-of-two set count.
    /// - [`ConfigError::AddressWidth`] if index and offset do not fit in 32 bits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.block_size.is_power_of_two() {
            return Err(ConfigError::BlockSize(self.block_size));
        }
        if !self.l2.is_enabled() {
            return Err(ConfigError::L2Disabled);
        }

        let offset_bits = ceil_log2(self.block_size);
        for level in [Level::Instruction, Level::Data, Level::Unified] {
            let sets = self.level(level).sets;
            if sets == 0 {
                continue;
            }
            if !sets.is_power_of_two() {
                return Err(ConfigError::SetCount { level, sets });
            }
            let bits = offset_bits + ceil_log2(sets);
            if bits > ADDRESS_BITS {
                return Err(ConfigError::AddressWidth { level, bits });
            }
        }
        Ok(())
    }
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            icache: CacheConfig::default_icache(),
            dcache: CacheConfig::default_dcache(),
            l2: CacheConfig::default_l2(),
            inclusive: false,
            block_size: defaults::BLOCK_SIZE,
            memory_latency: defaults::MEMORY_LATENCY,
        }
    }
}
