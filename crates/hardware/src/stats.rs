//! Cache statistics collection and reporting.
//!
//! This module tracks the per-level counters of the hierarchy. It provides:
//! 1. **Counters:** References, misses, and accumulated penalty cycles for each level.
//! 2. **Derived metrics:** Hit count, miss rate, average miss penalty, average access time.
//! 3. **Reporting:** A fixed-width text report and serde serialization for JSON output.

use std::fmt;

use serde::Serialize;

use crate::config::{CacheConfig, HierarchyConfig, Level};

/// Counters for a single cache level.
///
/// Reset to zero when the hierarchy is initialized and only ever increased by
/// that level's access path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Accesses that reached this level (including bypassed accesses of a disabled L1).
    pub references: u64,
    /// Accesses that missed at this level.
    pub misses: u64,
    /// Cycles accumulated from lower levels while servicing misses.
    pub penalties: u64,
}

impl CacheStats {
    /// Accesses that hit at this level.
    pub const fn hits(&self) -> u64 {
        self.references.saturating_sub(self.misses)
    }

    /// Fraction of references that missed (0.0 when there were no references).
    pub fn miss_rate(&self) -> f64 {
        if self.references == 0 {
            0.0
        } else {
            self.misses as f64 / self.references as f64
        }
    }

    /// Mean penalty per miss (0.0 when there were no misses).
    pub fn avg_miss_penalty(&self) -> f64 {
        if self.misses == 0 {
            0.0
        } else {
            self.penalties as f64 / self.misses as f64
        }
    }

    /// Mean cycles per reference for a level with the given hit time.
    ///
    /// Every reference pays the hit time; misses additionally pay their penalty.
    pub fn avg_access_time(&self, hit_time: u32) -> f64 {
        if self.references == 0 {
            0.0
        } else {
            f64::from(hit_time) + self.penalties as f64 / self.references as f64
        }
    }
}

/// Snapshot of every level's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HierarchyStats {
    /// L1 instruction cache.
    pub icache: CacheStats,
    /// L1 data cache.
    pub dcache: CacheStats,
    /// Unified L2 cache.
    pub l2: CacheStats,
}

impl HierarchyStats {
    /// Returns the counters of `level`.
    pub const fn level(&self, level: Level) -> &CacheStats {
        match level {
            Level::Instruction => &self.icache,
            Level::Data => &self.dcache,
            Level::Unified => &self.l2,
        }
    }

    /// Pairs these counters with the configuration they were collected under.
    pub const fn report<'a>(&'a self, config: &'a HierarchyConfig) -> Report<'a> {
        Report {
            stats: self,
            config,
        }
    }

    /// Prints the report to stdout.
    pub fn print(&self, config: &HierarchyConfig) {
        print!("{}", self.report(config));
    }
}

/// Text rendering of [`HierarchyStats`] for a given configuration.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    stats: &'a HierarchyStats,
    config: &'a HierarchyConfig,
}

impl Report<'_> {
    fn write_level(
        f: &mut fmt::Formatter<'_>,
        level: Level,
        config: &CacheConfig,
        stats: &CacheStats,
    ) -> fmt::Result {
        if !config.is_enabled() {
            writeln!(f, "{:<5} disabled", level.to_string())?;
            writeln!(f, "  references             {}", stats.references)?;
            return Ok(());
        }
        writeln!(
            f,
            "{:<5} sets: {:<6} ways: {:<4} hit_time: {}",
            level.to_string(),
            config.sets,
            config.ways,
            config.hit_time
        )?;
        writeln!(f, "  references             {}", stats.references)?;
        writeln!(f, "  misses                 {}", stats.misses)?;
        writeln!(f, "  penalties              {}", stats.penalties)?;
        writeln!(f, "  miss_rate              {:.2}%", stats.miss_rate() * 100.0)?;
        writeln!(
            f,
            "  avg_access_time        {:.2} cycles",
            stats.avg_access_time(config.hit_time)
        )
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "----------------------------------------------------------";
        writeln!(f, "==========================================================")?;
        writeln!(f, "CACHE HIERARCHY STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(
            f,
            "block_size {} B | memory_latency {} cycles | inclusive {}",
            self.config.block_size, self.config.memory_latency, self.config.inclusive
        )?;
        for level in [Level::Instruction, Level::Data, Level::Unified] {
            writeln!(f, "{rule}")?;
            Self::write_level(f, level, self.config.level(level), self.stats.level(level))?;
        }
        writeln!(f, "==========================================================")
    }
}
