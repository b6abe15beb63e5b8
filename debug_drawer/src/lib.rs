//! Immediate-mode debug drawing with per-entry lifetimes.
//!
//! Call sites register lines, boxes, circles, spheres and text labels with a
//! duration. A [`DebugOverlay`] owned by the host keeps them in reusable
//! pools, rebuilds two line batches (depth-tested and always-on-top) only
//! when something was added or expired, and hands text to one or two render
//! passes. Thread-safe through the [`DebugDraw`] handle.
//!
//! # Architecture
//!
//! - [`DebugDraw`]: Cloneable call-site handle (store as a shared resource)
//! - [`DebugOverlay`]: Frame driver owning pools, batches and text
//! - [`LineSink`] / [`TextSink`]: Where batched lines and labels are sent
//! - [`ViewProvider`]: Supplies the camera text is projected through
//!
//! # Usage
//!
//! ```
//! use overlay_core::camera::Camera;
//! use overlay_core::math::Vec3;
//! use overlay_debug_draw::{
//!     Color, DebugDraw, DiscardLines, DrawOptions, RenderPass, ScreenRect, TextSink, TextStyle,
//! };
//!
//! struct NullText;
//!
//! impl TextSink for NullText {
//!     fn measure(&self, text: &str, style: &TextStyle) -> overlay_core::math::Vec2 {
//!         overlay_core::math::Vec2::new(text.len() as f32 * style.size as f32, style.size as f32)
//!     }
//!     fn draw_label(&mut self, _rect: ScreenRect, _text: &str, _style: &TextStyle) {}
//! }
//!
//! // Setup (once)
//! let draw = DebugDraw::default();
//! let camera = Camera::look_at(Vec3::new(0.0, 2.0, 10.0), Vec3::zeros(), 1.0, 1280, 720);
//!
//! // Anywhere, any thread:
//! draw.box_aligned(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
//! draw.ray_with(Vec3::zeros(), Vec3::new(0.0, 10.0, 0.0), DrawOptions::new().color(Color::GREEN));
//! draw.text(Vec3::zeros(), "origin");
//!
//! // Each frame, on the host:
//! draw.tick(1.0 / 60.0, &mut DiscardLines);
//! draw.render_text(RenderPass::Gizmo, &camera, &mut NullText);
//! draw.render_text(RenderPass::Gui, &camera, &mut NullText);
//! ```

mod batch;
mod color;
mod config;
mod driver;
mod entries;
mod expiry;
mod facade;
pub mod geometry;
mod sink;
mod text;
mod vertex;
mod view;

pub use batch::LineBatches;
pub use color::Color;
pub use config::{ConfigError, OverlayConfig};
pub use driver::{DebugOverlay, OverlayStats};
pub use entries::{
    BoxShape, CircleShape, DepthMode, EntryHandle, LineShape, Shape, ShapeEntry, ShapeGeometry,
    ShapeKind, ShapePools, ShapeStyle, SphereShape,
};
pub use facade::{DebugDraw, DrawOptions, TextOptions};
pub use sink::{DiscardLines, LineSink, ScreenRect, TextSink};
pub use text::{
    pop_up_offset, AttachTarget, ContentFn, PendingRefresh, RenderPass, TextHandle, TextOverlay,
    TextStyle, Visibility,
};
pub use vertex::{DebugVertex, LineBatch};
pub use view::{ScreenView, ViewProvider};

/// Debug draw library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version and build mode once at startup.
pub fn init() {
    log::info!(
        "Overlay Debug Draw v{} initialized (facade {})",
        VERSION,
        if cfg!(feature = "enabled") { "enabled" } else { "disabled" }
    );
}
