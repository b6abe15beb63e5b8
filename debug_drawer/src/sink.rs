//! Output collaborators: where batched lines and text labels go.

use overlay_core::math::Vec2;

use crate::entries::DepthMode;
use crate::text::TextStyle;
use crate::vertex::LineBatch;

/// Consumes the two line batches each frame.
pub trait LineSink {
    /// Receive the batch for `depth`. The batch is only valid for the call.
    fn submit(&mut self, depth: DepthMode, batch: &LineBatch);
}

/// Screen-space rectangle in pixels, origin top-left, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Measures and draws text labels. Both render passes use the same sink contract.
pub trait TextSink {
    /// Size in pixels `text` occupies with `style`.
    fn measure(&self, text: &str, style: &TextStyle) -> Vec2;

    /// Draw `text` inside `rect`.
    fn draw_label(&mut self, rect: ScreenRect, text: &str, style: &TextStyle);
}

/// Line sink that throws everything away.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardLines;

impl LineSink for DiscardLines {
    fn submit(&mut self, _depth: DepthMode, _batch: &LineBatch) {}
}
