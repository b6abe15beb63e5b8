//! Aggregation of every live shape into two line lists.

use crate::entries::{DepthMode, ShapePools};
use crate::vertex::LineBatch;

/// The two render-ready line lists, one per [`DepthMode`].
///
/// Any registration or expiry marks the batches dirty; the next
/// [`rebuild_if_dirty`](Self::rebuild_if_dirty) re-emits every occupied
/// shape from scratch. Nothing is patched incrementally.
#[derive(Debug)]
pub struct LineBatches {
    depth_tested: LineBatch,
    always_on_top: LineBatch,
    dirty: bool,
    rebuild_count: u64,
}

impl LineBatches {
    pub fn new() -> Self {
        Self {
            depth_tested: LineBatch::new(),
            always_on_top: LineBatch::new(),
            dirty: false,
            rebuild_count: 0,
        }
    }

    /// Request a rebuild on the next [`rebuild_if_dirty`](Self::rebuild_if_dirty).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of rebuilds performed so far.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    /// Rebuild both batches from `pools` if dirty. Returns whether a rebuild ran.
    pub fn rebuild_if_dirty(&mut self, pools: &ShapePools) -> bool {
        if !self.dirty {
            return false;
        }
        self.rebuild(pools);
        self.dirty = false;
        true
    }

    fn rebuild(&mut self, pools: &ShapePools) {
        self.depth_tested.clear();
        self.always_on_top.clear();

        let depth_tested = &mut self.depth_tested;
        let always_on_top = &mut self.always_on_top;
        pools.for_each_active(|geometry, style| {
            let batch = match style.depth {
                DepthMode::Tested => &mut *depth_tested,
                DepthMode::AlwaysOnTop => &mut *always_on_top,
            };
            let color = style.color;
            geometry.emit(&mut |start, end| batch.add_line(start, end, color));
        });

        self.rebuild_count += 1;
        log::trace!(
            "Rebuilt debug line batches: {} depth-tested, {} always-on-top segments",
            self.depth_tested.segment_count(),
            self.always_on_top.segment_count()
        );
    }

    /// The batch for one depth mode.
    pub fn batch(&self, depth: DepthMode) -> &LineBatch {
        match depth {
            DepthMode::Tested => &self.depth_tested,
            DepthMode::AlwaysOnTop => &self.always_on_top,
        }
    }

    pub fn depth_tested(&self) -> &LineBatch {
        &self.depth_tested
    }

    pub fn always_on_top(&self) -> &LineBatch {
        &self.always_on_top
    }
}

impl Default for LineBatches {
    fn default() -> Self {
        Self::new()
    }
}
