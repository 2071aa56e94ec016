//! Inclusion enforcement between the L2 and the L1 caches.
//!
//! An inclusive hierarchy guarantees that every line resident in an L1 is
//! also resident in the L2. The L2 upholds this by invalidating its victim in
//! every upper level whenever it evicts a line. Upper levels are reached
//! through the [`Invalidate`] capability rather than by reaching into their
//! storage, so the L2 can be exercised against mocks in isolation.

/// Capability to silently drop a line from an upper cache level.
pub trait Invalidate {
    /// Removes the line containing `addr`, if resident.
    ///
    /// Invalidation is not an access: implementations must not update
    /// statistics or recency order of other lines.
    ///
    /// # Returns
    ///
    /// `true` if a line was removed.
    fn invalidate(&mut self, addr: u32) -> bool;
}

/// Invalidates the line at `addr` in every upper level.
///
/// Returns the number of levels that held the line.
pub fn enforce_inclusion(addr: u32, uppers: &mut [&mut dyn Invalidate]) -> usize {
    let mut removed = 0;
    for upper in uppers.iter_mut() {
        if upper.invalidate(addr) {
            removed += 1;
        }
    }
    if removed > 0 {
        tracing::trace!(addr, removed, "inclusion invalidate");
    }
    removed
}
