//! An object circling its spawn point and decorating itself with debug shapes.

use std::sync::Arc;

use overlay_core::math::{Vec3, UP};
use overlay_core::transform::{shared, SharedTransform, Transform};
use overlay_debug_draw::{Color, DebugDraw, DrawOptions, TextOptions};

/// Seconds between position labels.
const LABEL_INTERVAL: f32 = 1.0;

pub struct Orbiter {
    transform: SharedTransform,
    born: Vec3,
    phase: f32,
    label_timer: f32,
}

impl Orbiter {
    /// Spawn at `born` with the orbit starting at angle `phase`, and attach
    /// a label showing the current height.
    pub fn spawn(draw: &DebugDraw, born: Vec3, phase: f32) -> Self {
        let transform = shared(Transform::from_translation(born));
        // The label must not keep the transform alive.
        let weak = Arc::downgrade(&transform);
        let label_source = weak.clone();
        draw.attach_text_with(
            weak,
            move || match label_source.upgrade() {
                Some(transform) => format!("{:.2}", transform.read().translation.y),
                None => String::new(),
            },
            UP,
            TextOptions::new(),
        );
        Self {
            transform,
            born,
            phase,
            label_timer: 0.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.transform.read().position()
    }

    /// Move along the orbit and draw this frame's shapes.
    pub fn update(&mut self, draw: &DebugDraw, dt: f32) {
        self.phase += dt * 1.5;
        let offset = Vec3::new(self.phase.cos() * 5.0, self.phase.sin() * 3.0, 0.0);
        let position = self.born + offset;
        self.transform.write().translation = position;

        draw.box_aligned_with(
            position + UP,
            Vec3::new(0.5, 0.5, 0.5),
            DrawOptions::new().color(Color::RED),
        );
        draw.circle_y_with(position - UP, 0.5, 32, DrawOptions::new());
        draw.sphere_with(
            position + UP * 2.0,
            0.5,
            16,
            DrawOptions::new().color(Color::BLUE),
        );
        draw.line_with(
            Vec3::zeros(),
            position,
            DrawOptions::new().color(Color::GREEN).always_on_top(),
        );
        draw.ray_with(position, UP * 10.0, DrawOptions::new().color(Color::GREEN));

        self.label_timer += dt;
        if self.label_timer > LABEL_INTERVAL {
            draw.text_with(
                position,
                &format!("({:.1}, {:.1}, {:.1})", position.x, position.y, position.z),
                TextOptions::new().color(Color::GREEN).size(16).duration(0.5),
            );
            self.label_timer = 0.0;
        }
    }
}
