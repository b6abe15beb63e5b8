use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use overlay_core::math::{Vec2, Vec3, QUAT_IDENTITY, RIGHT, UP};
use overlay_debug_draw::geometry::emit_sphere;
use overlay_debug_draw::{
    Color, DebugOverlay, DepthMode, DiscardLines, RenderPass, ScreenRect, ScreenView, ShapeStyle,
    TextSink, TextStyle, ViewProvider,
};

struct Identity;

impl ScreenView for Identity {
    fn world_to_screen(&self, point: Vec3) -> Vec3 {
        point
    }

    fn screen_height(&self) -> f32 {
        1080.0
    }
}

impl ViewProvider for Identity {
    fn active_view(&self) -> Option<&dyn ScreenView> {
        Some(self)
    }
}

struct NullText;

impl TextSink for NullText {
    fn measure(&self, text: &str, style: &TextStyle) -> Vec2 {
        Vec2::new(text.len() as f32 * style.size as f32, style.size as f32)
    }

    fn draw_label(&mut self, _rect: ScreenRect, text: &str, _style: &TextStyle) {
        black_box(text);
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

fn bench_sphere_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit_sphere");
    for segments in [8u32, 16, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(segments), &segments, |b, &s| {
            b.iter(|| {
                let mut count = 0usize;
                emit_sphere(Vec3::zeros(), 1.0, s, &mut |_, _| count += 1);
                black_box(count)
            });
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Frame loop
// ---------------------------------------------------------------------------

fn bench_rebuild(c: &mut Criterion) {
    let mut overlay = DebugOverlay::default();
    let style = ShapeStyle::new(Color::WHITE, f32::MAX, DepthMode::Tested);
    for i in 0..256 {
        let center = RIGHT * i as f32;
        overlay.register_box(center, Vec3::new(1.0, 1.0, 1.0), QUAT_IDENTITY, style);
        overlay.register_circle(center, RIGHT, UP, 16, style);
    }
    c.bench_function("rebuild_256_boxes_256_circles", |b| {
        b.iter(|| {
            overlay.register_line(Vec3::zeros(), UP, ShapeStyle::default());
            overlay.tick(0.016, &mut DiscardLines);
        });
    });
}

fn bench_one_frame_shapes(c: &mut Criterion) {
    let mut overlay = DebugOverlay::default();
    c.bench_function("register_and_tick_64_one_frame_lines", |b| {
        b.iter(|| {
            for i in 0..64 {
                overlay.register_line(Vec3::zeros(), UP * i as f32, ShapeStyle::default());
            }
            black_box(overlay.tick(0.016, &mut DiscardLines))
        });
    });
}

fn bench_text_passes(c: &mut Criterion) {
    let mut overlay = DebugOverlay::default();
    let mut sink = NullText;
    c.bench_function("text_128_labels_two_passes", |b| {
        b.iter(|| {
            for i in 0..128 {
                let anchor = Vec3::new(i as f32, 10.0, 0.0);
                overlay.draw_text(anchor, "label", TextStyle::default(), 0.0, true);
            }
            overlay.render_text(RenderPass::Gizmo, &Identity, &mut sink);
            overlay.render_text(RenderPass::Gui, &Identity, &mut sink);
            overlay.tick(0.016, &mut DiscardLines)
        });
    });
}

criterion_group!(
    benches,
    bench_sphere_emit,
    bench_rebuild,
    bench_one_frame_shapes,
    bench_text_passes
);
criterion_main!(benches);
