//! LRU Set Storage Tests.
//!
//! Verifies recency ordering, eviction of the least recently used tag,
//! silent removal, and the structural invariants of every set.

use cachesim_core::cache::SetStore;
use proptest::prelude::*;

/// Simulates one cache access: probe, and fill on miss. Returns whether it hit.
fn touch(store: &mut SetStore, index: u32, tag: u32) -> bool {
    if store.lookup(index, tag) {
        return true;
    }
    let _ = store.insert(index, tag);
    false
}

// ══════════════════════════════════════════════════════════
// 1. Strict LRU
// ══════════════════════════════════════════════════════════

/// Filling N ways and inserting an (N+1)th tag evicts the first one inserted.
#[test]
fn n_plus_one_evicts_oldest() {
    let mut store = SetStore::new(4);
    for tag in 1..=4 {
        assert!(!touch(&mut store, 0, tag));
    }
    assert_eq!(store.insert(0, 5), Some(1));
    assert_eq!(store.resident(0), &[2, 3, 4, 5]);
}

/// Re-accessing the oldest tag protects it; the next oldest becomes the victim.
#[test]
fn reaccess_changes_victim() {
    let mut store = SetStore::new(4);
    for tag in 1..=4 {
        let _ = touch(&mut store, 0, tag);
    }
    assert!(touch(&mut store, 0, 1));
    assert_eq!(store.set(0).and_then(|s| s.lru()), Some(2));
    assert_eq!(store.set(0).and_then(|s| s.mru()), Some(1));

    assert_eq!(store.insert(0, 5), Some(2));
    assert_eq!(store.resident(0), &[3, 4, 1, 5]);
}

/// Hitting the MRU tag repeatedly does not disturb the order.
#[test]
fn repeated_mru_hits_are_stable() {
    let mut store = SetStore::new(3);
    for tag in [7, 8, 9] {
        let _ = touch(&mut store, 2, tag);
    }
    for _ in 0..3 {
        assert!(touch(&mut store, 2, 9));
    }
    assert_eq!(store.resident(2), &[7, 8, 9]);
}

/// Direct-mapped sets replace on every conflicting fill.
#[test]
fn direct_mapped_replaces() {
    let mut store = SetStore::new(1);
    assert_eq!(store.insert(0, 0xA0), None);
    assert_eq!(store.insert(0, 0xB0), Some(0xA0));
    assert!(!store.contains(0, 0xA0));
    assert!(store.contains(0, 0xB0));
}

// ══════════════════════════════════════════════════════════
// 2. Set Independence & Removal
// ══════════════════════════════════════════════════════════

/// The same tag may live in different sets; each set evicts independently.
#[test]
fn sets_are_independent() {
    let mut store = SetStore::new(1);
    let _ = store.insert(0, 0x100);
    let _ = store.insert(1, 0x100);
    assert_eq!(store.insert(0, 0x200), Some(0x100));
    assert!(store.contains(1, 0x100));
    assert_eq!(store.occupancy(), 2);
}

/// Removal drops exactly one tag and keeps the relative order of the rest.
#[test]
fn remove_preserves_order() {
    let mut store = SetStore::new(4);
    for tag in 1..=4 {
        let _ = touch(&mut store, 0, tag);
    }
    assert!(store.remove(0, 2));
    assert!(!store.remove(0, 2));
    assert!(!store.remove(9, 1));
    assert_eq!(store.resident(0), &[1, 3, 4]);

    // The freed way is reused without eviction.
    assert_eq!(store.insert(0, 5), None);
    assert_eq!(store.resident(0), &[1, 3, 4, 5]);
}

/// `contains` never promotes.
#[test]
fn contains_does_not_promote() {
    let mut store = SetStore::new(2);
    let _ = touch(&mut store, 0, 1);
    let _ = touch(&mut store, 0, 2);
    assert!(store.contains(0, 1));
    assert_eq!(store.insert(0, 3), Some(1));
}

#[test]
fn iter_visits_every_line() {
    let mut store = SetStore::new(2);
    let _ = store.insert(0, 0x10);
    let _ = store.insert(0, 0x20);
    let _ = store.insert(3, 0x30);
    let mut lines: Vec<(u32, u32)> = store.iter().collect();
    lines.sort_unstable();
    assert_eq!(lines, vec![(0, 0x10), (0, 0x20), (3, 0x30)]);
}

// ══════════════════════════════════════════════════════════
// 3. Invariants
// ══════════════════════════════════════════════════════════

proptest! {
    /// No duplicates, never more than `ways` tags, the last touched tag is MRU,
    /// and a touch hits exactly when the tag was resident beforehand.
    #[test]
    fn set_invariants_hold(
        ways in 0u32..5,
        accesses in proptest::collection::vec((0u32..3, 0u32..8), 1..200),
    ) {
        let mut store = SetStore::new(ways);
        for (index, tag) in accesses {
            let was_resident = store.contains(index, tag);
            let hit = touch(&mut store, index, tag);
            prop_assert_eq!(hit, was_resident);

            let resident = store.resident(index);
            prop_assert!(resident.len() <= ways as usize);
            let mut sorted = resident.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), resident.len());
            if ways > 0 {
                prop_assert_eq!(resident.last().copied(), Some(tag));
            } else {
                prop_assert!(resident.is_empty());
            }
        }
    }
}
