//! L2 Cache Unit Tests.
//!
//! Exercises the unified L2 in isolation: upper levels are replaced by
//! `mockall` mocks of the `Invalidate` capability, so inclusion enforcement
//! can be observed call by call.

use cachesim_core::cache::{Invalidate, L2Cache};
use cachesim_core::config::CacheConfig;
use cachesim_core::stats::CacheStats;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;

use crate::common::mocks::invalidate::MockUpper;

const HIT: u32 = 10;
const MEMORY: u32 = 100;

/// One set, one way, one-byte blocks: every new address evicts the last.
fn tiny_l2(inclusive: bool) -> L2Cache {
    L2Cache::new(&CacheConfig::new(1, 1, HIT), 1, MEMORY, inclusive)
}

#[test]
fn miss_then_hit() {
    let mut l2 = tiny_l2(false);
    assert_eq!(l2.access(0x40, &mut []), HIT + MEMORY);
    assert_eq!(l2.access(0x40, &mut []), HIT);
    assert!(l2.contains(0x40));
}

#[test]
fn stats_track_references_misses_and_memory_penalty() {
    let mut l2 = tiny_l2(false);
    for addr in [1, 1, 2, 1] {
        let _ = l2.access(addr, &mut []);
    }
    assert_eq!(
        *l2.stats(),
        CacheStats {
            references: 4,
            misses: 3,
            penalties: 3 * u64::from(MEMORY),
        }
    );
}

#[test]
fn inclusive_eviction_invalidates_every_upper_level() {
    let mut l2 = tiny_l2(true);
    let mut icache = MockUpper::new();
    let mut dcache = MockUpper::new();

    // Cold fill: nothing evicted, nothing invalidated.
    icache.expect_invalidate().never();
    dcache.expect_invalidate().never();
    assert_eq!(l2.access(7, &mut [&mut icache, &mut dcache]), HIT + MEMORY);
    icache.checkpoint();
    dcache.checkpoint();

    // Filling 9 evicts 7 from the only way.
    icache
        .expect_invalidate()
        .with(eq(7))
        .times(1)
        .return_const(true);
    dcache
        .expect_invalidate()
        .with(eq(7))
        .times(1)
        .return_const(false);
    assert_eq!(l2.access(9, &mut [&mut icache, &mut dcache]), HIT + MEMORY);
    assert!(!l2.contains(7));
}

#[test]
fn non_inclusive_eviction_leaves_upper_levels_alone() {
    let mut l2 = tiny_l2(false);
    let mut upper = MockUpper::new();
    upper.expect_invalidate().never();

    let _ = l2.access(7, &mut [&mut upper]);
    let _ = l2.access(9, &mut [&mut upper]);
    assert!(l2.contains(9));
}

#[test]
fn hit_never_invalidates() {
    let mut l2 = L2Cache::new(&CacheConfig::new(1, 2, HIT), 1, MEMORY, true);
    let mut upper = MockUpper::new();
    upper.expect_invalidate().never();

    let _ = l2.access(1, &mut [&mut upper]);
    let _ = l2.access(2, &mut [&mut upper]);
    assert_eq!(l2.access(1, &mut [&mut upper]), HIT);
}

/// The evicted line address is rebuilt from its tag and index, with the block
/// offset cleared.
#[test]
fn victim_address_is_reconstructed_from_tag_and_index() {
    // 4 sets, 1 way, 16-byte lines: index = bits [5:4].
    let mut l2 = L2Cache::new(&CacheConfig::new(4, 1, HIT), 16, MEMORY, true);
    let mut upper = MockUpper::new();
    upper
        .expect_invalidate()
        .with(eq(0x1234_5670))
        .times(1)
        .return_const(true);

    let _ = l2.access(0x1234_5678, &mut [&mut upper]);
    // Same index (3), different tag.
    let _ = l2.access(0x0000_0034, &mut [&mut upper]);
    assert_eq!(l2.lines(), vec![0x0000_0030]);
}

/// Evicting the LRU line follows recency, not insertion order.
#[test]
fn evicts_least_recently_used_victim() {
    let mut l2 = L2Cache::new(&CacheConfig::new(1, 2, HIT), 1, MEMORY, true);
    let mut upper = MockUpper::new();
    upper
        .expect_invalidate()
        .with(eq(2))
        .times(1)
        .return_const(false);

    let _ = l2.access(1, &mut [&mut upper]);
    let _ = l2.access(2, &mut [&mut upper]);
    let _ = l2.access(1, &mut [&mut upper]);
    let _ = l2.access(3, &mut [&mut upper]);
    assert!(l2.contains(1));
    assert!(l2.contains(3));
}

#[test]
fn zero_ways_always_misses_without_evicting() {
    let mut l2 = L2Cache::new(&CacheConfig::new(1, 0, HIT), 1, MEMORY, true);
    let mut upper = MockUpper::new();
    upper.expect_invalidate().never();

    for _ in 0..3 {
        assert_eq!(l2.access(5, &mut [&mut upper]), HIT + MEMORY);
    }
    assert_eq!(l2.stats().misses, 3);
    assert!(l2.lines().is_empty());
}

#[test]
fn upper_slice_may_be_empty() {
    let mut l2 = tiny_l2(true);
    let uppers: &mut [&mut dyn Invalidate] = &mut [];
    let _ = l2.access(1, uppers);
    assert_eq!(l2.access(2, uppers), HIT + MEMORY);
}
