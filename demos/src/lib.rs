//! # Overlay Demos
//!
//! Headless scenes driving the debug overlay.
//!
//! ## Available Demos
//!
//! - `orbit_demo` - Orbiting objects drawing shapes, rays and labels each frame

pub mod headless;
pub mod orbiter;

/// Demos library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
