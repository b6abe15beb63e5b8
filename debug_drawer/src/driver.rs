//! The frame driver tying pools, batches and text together.

use overlay_core::clock::FrameClock;
use overlay_core::math::{Quat, Vec3};

use crate::batch::LineBatches;
use crate::config::OverlayConfig;
use crate::entries::{
    BoxShape, CircleShape, DepthMode, EntryHandle, LineShape, Shape, ShapeKind, ShapePools,
    ShapeStyle, SphereShape,
};
use crate::sink::{LineSink, TextSink};
use crate::text::{
    AttachTarget, PendingRefresh, RenderPass, TextHandle, TextOverlay, TextStyle,
};
use crate::view::ViewProvider;

/// Snapshot of overlay occupancy, for HUDs and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayStats {
    pub lines: usize,
    pub boxes: usize,
    pub circles: usize,
    pub spheres: usize,
    pub screen_text: usize,
    pub attached_text: usize,
    /// Segments in the last built depth-tested batch.
    pub depth_tested_segments: usize,
    /// Segments in the last built always-on-top batch.
    pub always_on_top_segments: usize,
    pub rebuilds: u64,
    pub frames: u64,
}

/// Owns every debug draw entry and turns them into line batches and labels.
///
/// Each frame the host calls [`tick`](Self::tick) once, then
/// [`render_text`](Self::render_text) once per text pass. Registration may
/// happen at any point in between; a shape registered with zero duration is
/// submitted by exactly one tick.
///
/// With [`OverlayConfig::gizmo_pass`] set (the default) text only expires
/// after both [`RenderPass::Gizmo`] and [`RenderPass::Gui`] have drawn it, so
/// the host must render both passes every frame. A host without an editor
/// view sets `gizmo_pass = false` and renders only the GUI pass.
#[derive(Debug)]
pub struct DebugOverlay {
    config: OverlayConfig,
    shapes: ShapePools,
    batches: LineBatches,
    text: TextOverlay,
    frames: u64,
}

impl DebugOverlay {
    pub fn new(config: OverlayConfig) -> Self {
        let text = TextOverlay::new(config.gizmo_pass, config.pop_up_height);
        Self {
            config,
            shapes: ShapePools::new(),
            batches: LineBatches::new(),
            text,
            frames: 0,
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Register any shape and mark the batches dirty.
    pub fn register_shape(&mut self, shape: Shape, style: ShapeStyle) -> EntryHandle {
        let handle = self.shapes.register(shape, style);
        self.batches.mark_dirty();
        handle
    }

    pub fn register_line(&mut self, start: Vec3, end: Vec3, style: ShapeStyle) -> EntryHandle {
        self.register_shape(Shape::Line(LineShape { start, end }), style)
    }

    pub fn register_box(
        &mut self,
        center: Vec3,
        size: Vec3,
        rotation: Quat,
        style: ShapeStyle,
    ) -> EntryHandle {
        self.register_shape(
            Shape::Box(BoxShape {
                center,
                size,
                rotation,
            }),
            style,
        )
    }

    pub fn register_circle(
        &mut self,
        center: Vec3,
        axis_x: Vec3,
        axis_y: Vec3,
        increments: u32,
        style: ShapeStyle,
    ) -> EntryHandle {
        self.register_shape(
            Shape::Circle(CircleShape {
                center,
                axis_x,
                axis_y,
                increments,
            }),
            style,
        )
    }

    pub fn register_sphere(
        &mut self,
        center: Vec3,
        radius: f32,
        segments: u32,
        style: ShapeStyle,
    ) -> EntryHandle {
        self.register_shape(
            Shape::Sphere(SphereShape {
                center,
                radius,
                segments,
            }),
            style,
        )
    }

    pub fn draw_text(
        &mut self,
        anchor: Vec3,
        text: &str,
        style: TextStyle,
        duration: f32,
        pop_up: bool,
    ) -> TextHandle {
        self.text.draw_text(anchor, text, style, duration, pop_up)
    }

    /// See [`TextOverlay::attach_text`]. `text` is shown until the first
    /// refresh.
    pub fn attach_text(
        &mut self,
        target: impl AttachTarget + 'static,
        text: String,
        content: impl FnMut() -> String + Send + 'static,
        offset: Vec3,
        style: TextStyle,
    ) -> TextHandle {
        self.text.attach_text(target, text, content, offset, style)
    }

    // ------------------------------------------------------------------
    // Frame
    // ------------------------------------------------------------------

    /// Run one frame of `dt` seconds.
    ///
    /// Rebuilds the batches if anything changed, submits the always-on-top
    /// batch and then the depth-tested one to `lines`, and finally advances
    /// every shape and text timer. Returns the number of entries freed.
    pub fn tick(&mut self, dt: f32, lines: &mut dyn LineSink) -> usize {
        let mut pending = Vec::new();
        let freed = self.tick_deferred(dt, lines, &mut pending);
        for mut refresh in pending {
            refresh.run();
            self.text.finish_refresh(refresh);
        }
        freed
    }

    /// [`tick`](Self::tick) that leaves attached-text content callbacks in
    /// `pending` instead of calling them.
    ///
    /// Lets a host that shares the overlay behind a lock run the callbacks
    /// after unlocking, then return them through
    /// [`finish_refresh`](Self::finish_refresh).
    pub fn tick_deferred(
        &mut self,
        dt: f32,
        lines: &mut dyn LineSink,
        pending: &mut Vec<PendingRefresh>,
    ) -> usize {
        self.batches.rebuild_if_dirty(&self.shapes);
        lines.submit(DepthMode::AlwaysOnTop, self.batches.always_on_top());
        lines.submit(DepthMode::Tested, self.batches.depth_tested());

        let expired_shapes = self.shapes.advance(dt);
        if expired_shapes > 0 {
            self.batches.mark_dirty();
        }
        let freed_text = self.text.advance_deferred(dt, pending);

        self.frames += 1;
        expired_shapes + freed_text
    }

    pub fn finish_refresh(&mut self, refresh: PendingRefresh) {
        self.text.finish_refresh(refresh);
    }

    /// [`tick`](Self::tick) with the frame time taken from `clock`.
    pub fn tick_with_clock(
        &mut self,
        clock: &mut dyn FrameClock,
        lines: &mut dyn LineSink,
    ) -> usize {
        let dt = clock.delta_seconds();
        self.tick(dt, lines)
    }

    /// Draw every label for one render pass.
    ///
    /// When `views` has no active view nothing is drawn and no entry is
    /// marked as seen by `pass`. Returns the number of labels drawn.
    pub fn render_text(
        &mut self,
        pass: RenderPass,
        views: &dyn ViewProvider,
        sink: &mut dyn TextSink,
    ) -> usize {
        let view = views.active_view();
        if view.is_none() {
            log::trace!("No active view for {pass:?} pass, skipping text");
        }
        self.text.render_pass(pass, view, sink)
    }

    /// Rebuild the batches now instead of waiting for the next tick.
    pub fn rebuild_if_dirty(&mut self) -> bool {
        self.batches.rebuild_if_dirty(&self.shapes)
    }

    pub fn batches(&self) -> &LineBatches {
        &self.batches
    }

    pub fn shapes(&self) -> &ShapePools {
        &self.shapes
    }

    pub fn text(&self) -> &TextOverlay {
        &self.text
    }

    pub fn stats(&self) -> OverlayStats {
        let (screen_text, attached_text) = self.text.active_counts();
        OverlayStats {
            lines: self.shapes.active_count(ShapeKind::Line),
            boxes: self.shapes.active_count(ShapeKind::Box),
            circles: self.shapes.active_count(ShapeKind::Circle),
            spheres: self.shapes.active_count(ShapeKind::Sphere),
            screen_text,
            attached_text,
            depth_tested_segments: self.batches.depth_tested().segment_count(),
            always_on_top_segments: self.batches.always_on_top().segment_count(),
            rebuilds: self.batches.rebuild_count(),
            frames: self.frames,
        }
    }

    /// Drop every entry. Pools keep their slots.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.text.clear();
        self.batches.mark_dirty();
        log::debug!("Cleared debug overlay");
    }
}

impl Default for DebugOverlay {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}
