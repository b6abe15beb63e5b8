//! Call-site API: a cloneable handle with shorthand draw calls.
//!
//! Every call locks the shared [`DebugOverlay`] only for the duration of
//! one registration. Attached-text content callbacks always run with the
//! lock released, so they may draw through the same handle. Building
//! without the `enabled` feature turns every draw call on [`DebugDraw`] into
//! a no-op; the overlay itself is unaffected.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use overlay_core::math::{
    quat_look_rotation, quat_rotate_vec3, Quat, Vec3, FORWARD, QUAT_IDENTITY, RIGHT, UP,
};

use crate::color::Color;
use crate::config::OverlayConfig;
use crate::driver::DebugOverlay;
use crate::entries::{DepthMode, ShapeStyle};
use crate::sink::{LineSink, TextSink};
use crate::text::{AttachTarget, RenderPass, TextStyle};
use crate::view::ViewProvider;

/// Color, lifetime and depth test for a shape draw call.
///
/// Unset color falls back to the overlay's configured default for the shape.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrawOptions {
    color: Option<Color>,
    duration: f32,
    depth: DepthMode,
}

impl DrawOptions {
    /// Default color, one frame, depth tested.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Seconds to keep the shape. Zero draws it for a single frame.
    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = seconds;
        self
    }

    pub fn depth_test(mut self, enabled: bool) -> Self {
        self.depth = DepthMode::from_depth_test(enabled);
        self
    }

    pub fn always_on_top(self) -> Self {
        self.depth_test(false)
    }

    fn style(self, fallback: Color) -> ShapeStyle {
        ShapeStyle::new(self.color.unwrap_or(fallback), self.duration, self.depth)
    }
}

/// Color, size and lifetime for a text draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextOptions {
    color: Color,
    size: Option<u32>,
    duration: f32,
    pop_up: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            size: None,
            duration: 0.0,
            pop_up: false,
        }
    }
}

impl TextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Ignored by attached text, which lives as long as its target.
    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = seconds;
        self
    }

    /// Let the label drift upwards as it ages.
    pub fn pop_up(mut self, pop_up: bool) -> Self {
        self.pop_up = pop_up;
        self
    }

    fn style(self, default_size: u32) -> TextStyle {
        TextStyle::new(self.color, self.size.unwrap_or(default_size))
    }
}

/// Shared handle to a [`DebugOverlay`], handed to whatever wants to draw.
///
/// # Example
///
/// ```
/// use overlay_debug_draw::{Color, DebugDraw, DrawOptions};
/// use overlay_core::math::Vec3;
///
/// let draw = DebugDraw::default();
/// draw.line(Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0));
/// draw.sphere_with(
///     Vec3::zeros(),
///     0.5,
///     16,
///     DrawOptions::new().color(Color::BLUE).duration(2.0),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct DebugDraw {
    overlay: Arc<Mutex<DebugOverlay>>,
}

impl DebugDraw {
    pub fn new(overlay: DebugOverlay) -> Self {
        Self {
            overlay: Arc::new(Mutex::new(overlay)),
        }
    }

    pub fn from_config(config: OverlayConfig) -> Self {
        Self::new(DebugOverlay::new(config))
    }

    /// The shared overlay, for the host that ticks and renders it.
    pub fn overlay(&self) -> Arc<Mutex<DebugOverlay>> {
        self.overlay.clone()
    }

    pub fn lock(&self) -> MutexGuard<'_, DebugOverlay> {
        self.overlay.lock()
    }

    /// Run one frame like [`DebugOverlay::tick`].
    ///
    /// Attached-text content callbacks due for a refresh run after the lock
    /// is released.
    pub fn tick(&self, dt: f32, lines: &mut dyn LineSink) -> usize {
        let mut pending = Vec::new();
        let freed = self.overlay.lock().tick_deferred(dt, lines, &mut pending);
        if pending.is_empty() {
            return freed;
        }
        for refresh in &mut pending {
            refresh.run();
        }
        let mut overlay = self.overlay.lock();
        for refresh in pending {
            overlay.finish_refresh(refresh);
        }
        freed
    }

    /// Draw every label for one render pass. See [`DebugOverlay::render_text`].
    pub fn render_text(
        &self,
        pass: RenderPass,
        views: &dyn ViewProvider,
        sink: &mut dyn TextSink,
    ) -> usize {
        self.overlay.lock().render_text(pass, views, sink)
    }

    #[inline]
    fn with_overlay(&self, draw: impl FnOnce(&mut DebugOverlay)) {
        #[cfg(feature = "enabled")]
        draw(&mut self.overlay.lock());
        #[cfg(not(feature = "enabled"))]
        let _ = draw;
    }

    // ------------------------------------------------------------------
    // Lines
    // ------------------------------------------------------------------

    pub fn line(&self, start: Vec3, end: Vec3) {
        self.line_with(start, end, DrawOptions::new());
    }

    pub fn line_with(&self, start: Vec3, end: Vec3, options: DrawOptions) {
        self.with_overlay(|overlay| {
            let style = options.style(overlay.config().default_color);
            overlay.register_line(start, end, style);
        });
    }

    /// Line from `start` to `start + direction`.
    pub fn ray(&self, start: Vec3, direction: Vec3) {
        self.ray_with(start, direction, DrawOptions::new());
    }

    pub fn ray_with(&self, start: Vec3, direction: Vec3, options: DrawOptions) {
        self.line_with(start, start + direction, options);
    }

    // ------------------------------------------------------------------
    // Boxes
    // ------------------------------------------------------------------

    /// Axis-aligned box with full extents `size`.
    pub fn box_aligned(&self, center: Vec3, size: Vec3) {
        self.box_oriented_with(center, size, QUAT_IDENTITY, DrawOptions::new());
    }

    pub fn box_aligned_with(&self, center: Vec3, size: Vec3, options: DrawOptions) {
        self.box_oriented_with(center, size, QUAT_IDENTITY, options);
    }

    pub fn box_oriented(&self, center: Vec3, size: Vec3, rotation: Quat) {
        self.box_oriented_with(center, size, rotation, DrawOptions::new());
    }

    pub fn box_oriented_with(
        &self,
        center: Vec3,
        size: Vec3,
        rotation: Quat,
        options: DrawOptions,
    ) {
        self.with_overlay(|overlay| {
            let style = options.style(overlay.config().default_color);
            overlay.register_box(center, size, rotation, style);
        });
    }

    // ------------------------------------------------------------------
    // Circles
    // ------------------------------------------------------------------

    /// Circle in the XZ plane. Same as [`circle_z`](Self::circle_z).
    pub fn circle(&self, position: Vec3, radius: f32) {
        self.circle_z(position, radius);
    }

    pub fn circle_with(&self, position: Vec3, radius: f32, increments: u32, options: DrawOptions) {
        self.circle_z_with(position, radius, increments, options);
    }

    /// Circle in the YZ plane.
    pub fn circle_x(&self, position: Vec3, radius: f32) {
        self.circle_axis(position, UP * radius, FORWARD * radius);
    }

    pub fn circle_x_with(
        &self,
        position: Vec3,
        radius: f32,
        increments: u32,
        options: DrawOptions,
    ) {
        self.circle_axis_with(
            position,
            UP * radius,
            FORWARD * radius,
            increments,
            options,
        );
    }

    /// Circle in the XY plane.
    pub fn circle_y(&self, position: Vec3, radius: f32) {
        self.circle_axis(position, RIGHT * radius, UP * radius);
    }

    pub fn circle_y_with(
        &self,
        position: Vec3,
        radius: f32,
        increments: u32,
        options: DrawOptions,
    ) {
        self.circle_axis_with(
            position,
            RIGHT * radius,
            UP * radius,
            increments,
            options,
        );
    }

    /// Circle in the XZ plane.
    pub fn circle_z(&self, position: Vec3, radius: f32) {
        self.circle_axis(position, RIGHT * radius, FORWARD * radius);
    }

    pub fn circle_z_with(
        &self,
        position: Vec3,
        radius: f32,
        increments: u32,
        options: DrawOptions,
    ) {
        self.circle_axis_with(
            position,
            RIGHT * radius,
            FORWARD * radius,
            increments,
            options,
        );
    }

    /// Circle facing along `normal`.
    pub fn circle_normal(&self, position: Vec3, normal: Vec3, radius: f32) {
        let (axis_x, axis_y) = normal_axes(normal, radius);
        self.circle_axis(position, axis_x, axis_y);
    }

    pub fn circle_normal_with(
        &self,
        position: Vec3,
        normal: Vec3,
        radius: f32,
        increments: u32,
        options: DrawOptions,
    ) {
        let (axis_x, axis_y) = normal_axes(normal, radius);
        self.circle_axis_with(position, axis_x, axis_y, increments, options);
    }

    /// Circle (or ellipse) spanned by two radius vectors.
    pub fn circle_axis(&self, position: Vec3, axis_x: Vec3, axis_y: Vec3) {
        self.with_overlay(|overlay| {
            let config = overlay.config();
            let (increments, style) = (
                config.circle_increments,
                DrawOptions::new().style(config.circle_color),
            );
            overlay.register_circle(position, axis_x, axis_y, increments, style);
        });
    }

    pub fn circle_axis_with(
        &self,
        position: Vec3,
        axis_x: Vec3,
        axis_y: Vec3,
        increments: u32,
        options: DrawOptions,
    ) {
        self.with_overlay(|overlay| {
            let style = options.style(overlay.config().circle_color);
            overlay.register_circle(position, axis_x, axis_y, increments, style);
        });
    }

    // ------------------------------------------------------------------
    // Spheres
    // ------------------------------------------------------------------

    pub fn sphere(&self, center: Vec3, radius: f32) {
        self.with_overlay(|overlay| {
            let config = overlay.config();
            let (segments, style) = (
                config.sphere_segments,
                DrawOptions::new().style(config.default_color),
            );
            overlay.register_sphere(center, radius, segments, style);
        });
    }

    pub fn sphere_with(&self, center: Vec3, radius: f32, segments: u32, options: DrawOptions) {
        self.with_overlay(|overlay| {
            let style = options.style(overlay.config().default_color);
            overlay.register_sphere(center, radius, segments, style);
        });
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// One-frame white label at a world position.
    pub fn text(&self, position: Vec3, text: &str) {
        self.text_with(position, text, TextOptions::new());
    }

    pub fn text_with(&self, position: Vec3, text: &str, options: TextOptions) {
        self.with_overlay(|overlay| {
            let style = options.style(overlay.config().text_size);
            overlay.draw_text(position, text, style, options.duration, options.pop_up);
        });
    }

    /// Label at the origin of `target` until it dies; `content` runs now
    /// and whenever both render passes have shown the previous text.
    pub fn attach_text(
        &self,
        target: impl AttachTarget + 'static,
        content: impl FnMut() -> String + Send + 'static,
    ) {
        self.attach_text_with(target, content, Vec3::zeros(), TextOptions::new());
    }

    /// [`attach_text`](Self::attach_text) shifted by `offset` in world space.
    pub fn attach_text_with(
        &self,
        target: impl AttachTarget + 'static,
        mut content: impl FnMut() -> String + Send + 'static,
        offset: Vec3,
        options: TextOptions,
    ) {
        if cfg!(feature = "enabled") {
            let text = content();
            self.with_overlay(|overlay| {
                let style = options.style(overlay.config().text_size);
                overlay.attach_text(target, text, content, offset, style);
            });
        }
    }
}

fn normal_axes(normal: Vec3, radius: f32) -> (Vec3, Vec3) {
    let rotation = quat_look_rotation(normal, UP);
    (
        quat_rotate_vec3(rotation, RIGHT) * radius,
        quat_rotate_vec3(rotation, UP) * radius,
    )
}
