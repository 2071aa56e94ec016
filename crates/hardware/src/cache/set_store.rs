//! Set storage with Least Recently Used (LRU) replacement.
//!
//! Each set keeps its resident tags in a vector ordered from least to most
//! recently used. A hit moves the tag to the tail; a fill into a full set
//! evicts the head. Sets are created lazily the first time an index is
//! filled, so an absent index behaves exactly like an empty set.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `lookup()`: O(W) where W is the associativity (linear scan + shift)
//!   - `insert()`: O(W) on eviction (head removal shifts the vector)
//!   - `remove()`: O(W)
//! - **Space Complexity:** O(touched sets × W)
//!
//! The linear scan suits the small associativities of L1/L2 caches. Larger
//! associativities would want a linked list plus a tag index with the same
//! ordering semantics.

use std::collections::HashMap;

/// Resident tags of one set, ordered from least to most recently used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheSet {
    tags: Vec<u32>,
}

impl CacheSet {
    /// Tags in recency order: index 0 is LRU, the last element is MRU.
    pub fn tags(&self) -> &[u32] {
        &self.tags
    }

    /// Number of resident lines.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns `true` if no line is resident.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// The least recently used tag, if any.
    pub fn lru(&self) -> Option<u32> {
        self.tags.first().copied()
    }

    /// The most recently used tag, if any.
    pub fn mru(&self) -> Option<u32> {
        self.tags.last().copied()
    }

    fn position(&self, tag: u32) -> Option<usize> {
        self.tags.iter().position(|&t| t == tag)
    }
}

/// Mapping from set index to resident tags for one cache level.
#[derive(Debug, Clone)]
pub struct SetStore {
    ways: usize,
    sets: HashMap<u32, CacheSet>,
}

impl SetStore {
    /// Creates an empty store whose sets hold at most `ways` tags.
    pub fn new(ways: u32) -> Self {
        Self {
            ways: ways as usize,
            sets: HashMap::new(),
        }
    }

    /// Associativity of every set.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Returns the set at `index`, or `None` if it has never been filled.
    pub fn set(&self, index: u32) -> Option<&CacheSet> {
        self.sets.get(&index)
    }

    /// Tags resident at `index` in LRU-to-MRU order (empty for untouched sets).
    pub fn resident(&self, index: u32) -> &[u32] {
        self.sets
            .get(&index)
            .map(CacheSet::tags)
            .unwrap_or_default()
    }

    /// Checks for `tag` without touching recency order.
    pub fn contains(&self, index: u32, tag: u32) -> bool {
        self.sets
            .get(&index)
            .is_some_and(|set| set.position(tag).is_some())
    }

    /// Probes the set at `index` for `tag`.
    ///
    /// On a hit the tag is moved to the MRU position. A miss leaves the set
    /// unchanged; the caller decides whether to [`insert`](Self::insert).
    pub fn lookup(&mut self, index: u32, tag: u32) -> bool {
        let Some(set) = self.sets.get_mut(&index) else {
            return false;
        };
        match set.position(tag) {
            Some(pos) => {
                let hit = set.tags.remove(pos);
                set.tags.push(hit);
                true
            }
            None => false,
        }
    }

    /// Installs `tag` as the MRU line of the set at `index`.
    ///
    /// If the set is full the LRU tag is evicted first and returned. With zero
    /// ways nothing can be installed: the store is left untouched and `None`
    /// is returned. The caller must only insert tags that missed.
    pub fn insert(&mut self, index: u32, tag: u32) -> Option<u32> {
        if self.ways == 0 {
            return None;
        }
        let set = self.sets.entry(index).or_default();
        debug_assert!(set.position(tag).is_none(), "tag {tag:#x} already resident");

        let evicted = if set.tags.len() >= self.ways {
            Some(set.tags.remove(0))
        } else {
            None
        };
        set.tags.push(tag);
        evicted
    }

    /// Drops `tag` from the set at `index` without touching other lines' order.
    ///
    /// Returns `true` if the tag was resident.
    pub fn remove(&mut self, index: u32, tag: u32) -> bool {
        let Some(set) = self.sets.get_mut(&index) else {
            return false;
        };
        match set.position(tag) {
            Some(pos) => {
                let _ = set.tags.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Iterates over every `(index, tag)` pair resident in the store, in no particular set order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.sets
            .iter()
            .flat_map(|(&index, set)| set.tags.iter().map(move |&tag| (index, tag)))
    }

    /// Number of lines resident across all sets.
    pub fn occupancy(&self) -> usize {
        self.sets.values().map(CacheSet::len).sum()
    }
}
