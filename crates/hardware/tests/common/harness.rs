use cachesim_core::CacheHierarchy;
use cachesim_core::config::{CacheConfig, HierarchyConfig};
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness (enable with `RUST_LOG=trace`).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Fluent builder for small, deterministic hierarchies.
///
/// Defaults: L1-I and L1-D 4:2:1, L2 16:4:10, 16-byte blocks,
/// 100-cycle memory, not inclusive.
#[derive(Debug, Clone, Copy)]
pub struct HierarchyBuilder {
    config: HierarchyConfig,
}

impl Default for HierarchyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self {
            config: HierarchyConfig {
                icache: CacheConfig::new(4, 2, 1),
                dcache: CacheConfig::new(4, 2, 1),
                l2: CacheConfig::new(16, 4, 10),
                inclusive: false,
                block_size: 16,
                memory_latency: 100,
            },
        }
    }

    pub fn icache(mut self, sets: u32, ways: u32, hit_time: u32) -> Self {
        self.config.icache = CacheConfig::new(sets, ways, hit_time);
        self
    }

    pub fn dcache(mut self, sets: u32, ways: u32, hit_time: u32) -> Self {
        self.config.dcache = CacheConfig::new(sets, ways, hit_time);
        self
    }

    pub fn l2(mut self, sets: u32, ways: u32, hit_time: u32) -> Self {
        self.config.l2 = CacheConfig::new(sets, ways, hit_time);
        self
    }

    pub fn inclusive(mut self, inclusive: bool) -> Self {
        self.config.inclusive = inclusive;
        self
    }

    pub fn block_size(mut self, block_size: u32) -> Self {
        self.config.block_size = block_size;
        self
    }

    pub fn memory_latency(mut self, cycles: u32) -> Self {
        self.config.memory_latency = cycles;
        self
    }

    pub fn config(&self) -> HierarchyConfig {
        self.config
    }

    pub fn build(self) -> CacheHierarchy {
        init_tracing();
        CacheHierarchy::new(&self.config).expect("test configuration must be valid")
    }
}

/// The hierarchy from the worked example: one-set caches with 1-byte blocks,
/// so every address is its own tag and all addresses share one set.
///
/// L1-I 1:2:1, L1-D disabled, L2 1:1:10, memory 100.
pub fn single_set(inclusive: bool) -> HierarchyBuilder {
    HierarchyBuilder::new()
        .icache(1, 2, 1)
        .dcache(0, 0, 0)
        .l2(1, 1, 10)
        .block_size(1)
        .memory_latency(100)
        .inclusive(inclusive)
}
