//! Headless replay of a scene full of orbiting debug shapes.
//!
//! Each frame every orbiter registers its shapes, the overlay ticks, and
//! both text passes run against a fixed camera. Halfway through, the first
//! orbiter is destroyed to show its attached label going away.

use std::f32::consts::{FRAC_PI_4, PI};
use std::path::PathBuf;

use clap::Parser;

use overlay_core::camera::Camera;
use overlay_core::clock::{FixedStepClock, FrameClock};
use overlay_core::math::{Vec3, RIGHT};
use overlay_debug_draw::{DebugDraw, OverlayConfig, RenderPass};
use overlay_demos::headless::{LoggingLines, MonospaceText};
use overlay_demos::orbiter::Orbiter;

/// Orbit demo arguments.
#[derive(Parser, Debug)]
#[command(
    name = "Orbit Demo",
    about = "Drives the debug overlay with orbiting objects, without a window",
    version
)]
struct Args {
    /// Number of frames to simulate.
    #[arg(long, default_value = "300")]
    frames: u64,

    /// Fixed frame time in seconds.
    #[arg(long, default_value = "0.016")]
    dt: f32,

    /// Overlay config file (TOML). Defaults apply when omitted or unreadable.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of orbiting objects.
    #[arg(long, default_value = "3")]
    orbiters: usize,

    /// Frame at which the first orbiter is destroyed. Defaults to half way.
    #[arg(long)]
    destroy_at: Option<u64>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    log::info!("Starting Orbit Demo");
    overlay_core::init();
    overlay_debug_draw::init();

    let config = match &args.config {
        Some(path) => OverlayConfig::load_or_default(path),
        None => OverlayConfig::default(),
    };
    let draw = DebugDraw::from_config(config);
    let camera = Camera::look_at(
        Vec3::new(0.0, 2.0, 20.0),
        Vec3::zeros(),
        FRAC_PI_4,
        1280,
        720,
    );
    let mut clock = FixedStepClock::new(args.dt);
    let mut lines = LoggingLines::default();
    let mut text = MonospaceText::default();

    let mut orbiters: Vec<Orbiter> = (0..args.orbiters)
        .map(|i| Orbiter::spawn(&draw, RIGHT * (i as f32 * 2.0), i as f32 * PI * 0.3))
        .collect();
    let destroy_at = args.destroy_at.unwrap_or(args.frames / 2);

    for frame in 0..args.frames {
        let dt = clock.delta_seconds();

        if frame == destroy_at && !orbiters.is_empty() {
            let gone = orbiters.remove(0);
            log::info!("Frame {frame}: destroying orbiter at {:?}", gone.position());
        }

        for orbiter in &mut orbiters {
            orbiter.update(&draw, dt);
        }

        draw.tick(dt, &mut lines);
        draw.render_text(RenderPass::Gizmo, &camera, &mut text);
        draw.render_text(RenderPass::Gui, &camera, &mut text);

        if frame % 60 == 0 {
            let stats = draw.lock().stats();
            log::info!(
                "Frame {frame}: {} tested + {} on-top segments, {} labels ({} attached), \
                 {} rebuilds",
                stats.depth_tested_segments,
                stats.always_on_top_segments,
                stats.screen_text + stats.attached_text,
                stats.attached_text,
                stats.rebuilds
            );
        }
    }

    let stats = draw.lock().stats();
    log::info!(
        "Done after {} frames: {} labels drawn, {} KiB of line data submitted, {} rebuilds",
        stats.frames,
        text.labels_drawn,
        lines.uploaded_bytes / 1024,
        stats.rebuilds
    );
}
