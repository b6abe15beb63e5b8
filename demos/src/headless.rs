//! Sinks that stand in for a renderer: they count and log what they receive.

use overlay_core::math::Vec2;
use overlay_debug_draw::{DepthMode, LineBatch, LineSink, ScreenRect, TextSink, TextStyle};

/// Records batch sizes and the bytes a GPU upload would have copied.
#[derive(Debug, Default)]
pub struct LoggingLines {
    pub depth_tested_segments: usize,
    pub always_on_top_segments: usize,
    pub uploaded_bytes: usize,
}

impl LineSink for LoggingLines {
    fn submit(&mut self, depth: DepthMode, batch: &LineBatch) {
        match depth {
            DepthMode::Tested => self.depth_tested_segments = batch.segment_count(),
            DepthMode::AlwaysOnTop => self.always_on_top_segments = batch.segment_count(),
        }
        self.uploaded_bytes += batch.vertex_bytes().len() + batch.index_bytes().len();
        log::trace!("{depth:?} batch: {} segments", batch.segment_count());
    }
}

/// Fixed-advance text layout that logs every label.
#[derive(Debug)]
pub struct MonospaceText {
    /// Glyph advance as a fraction of the font size.
    glyph_width: f32,
    pub labels_drawn: usize,
}

impl MonospaceText {
    pub fn new(glyph_width: f32) -> Self {
        Self {
            glyph_width,
            labels_drawn: 0,
        }
    }
}

impl Default for MonospaceText {
    fn default() -> Self {
        Self::new(0.6)
    }
}

impl TextSink for MonospaceText {
    fn measure(&self, text: &str, style: &TextStyle) -> Vec2 {
        let size = style.size as f32;
        Vec2::new(text.chars().count() as f32 * size * self.glyph_width, size)
    }

    fn draw_label(&mut self, rect: ScreenRect, text: &str, style: &TextStyle) {
        self.labels_drawn += 1;
        log::debug!(
            "label @({:.0}, {:.0}) {:.0}x{:.0} size {}: {text}",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            style.size
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overlay_core::math::Vec3;
    use overlay_debug_draw::Color;

    #[test]
    fn test_monospace_measure() {
        let text = MonospaceText::new(0.5);
        let size = text.measure("abcd", &TextStyle::new(Color::WHITE, 10));
        assert_eq!(size, Vec2::new(20.0, 10.0));
    }

    #[test]
    fn test_logging_lines_counts_bytes() {
        let mut lines = LoggingLines::default();
        let mut batch = LineBatch::new();
        batch.add_line(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0), Color::RED);
        lines.submit(DepthMode::Tested, &batch);
        assert_eq!(lines.depth_tested_segments, 1);
        assert_eq!(lines.uploaded_bytes, 2 * 28 + 2 * 4);
    }
}
