//! Per-frame lifetime countdown for shape entries.

use overlay_core::pool::EntryPool;

use crate::entries::{ShapeEntry, ShapeGeometry, ShapePools};

/// Decrement every occupied entry by `dt` and free those whose remaining
/// time dropped below zero. Returns the number of freed entries.
fn expire_pool<G: ShapeGeometry + Default>(pool: &mut EntryPool<ShapeEntry<G>>, dt: f32) -> usize {
    pool.release_where(|entry| {
        entry.remaining -= dt;
        entry.remaining < 0.0
    })
}

impl ShapePools {
    /// Advance every pool by one frame of `dt` seconds.
    ///
    /// Each occupied entry is decremented exactly once. Returns the number of
    /// entries freed across all pools; the caller marks the batch dirty when
    /// it is non-zero.
    pub fn advance(&mut self, dt: f32) -> usize {
        let expired = expire_pool(&mut self.lines, dt)
            + expire_pool(&mut self.boxes, dt)
            + expire_pool(&mut self.circles, dt)
            + expire_pool(&mut self.spheres, dt);
        if expired > 0 {
            log::trace!("{expired} debug shapes expired");
        }
        expired
    }
}
