//! # Overlay Core
//!
//! Engine-agnostic building blocks for the debug overlay: math aliases,
//! slot-reuse entry pools, host transforms, a screen-projecting camera and
//! frame clocks.

pub mod camera;
pub mod clock;
pub mod math;
pub mod pool;
pub mod transform;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the core version once at startup.
pub fn init() {
    log::info!("Overlay Core v{} initialized", VERSION);
}
