//! Camera collaborators for projecting text anchors to the screen.

use overlay_core::camera::Camera;
use overlay_core::math::Vec3;

/// A view that can place world points on screen.
pub trait ScreenView {
    /// Pixel `x`/`y` with the origin bottom-left; `z` is the view depth.
    fn world_to_screen(&self, point: Vec3) -> Vec3;

    /// Viewport height in pixels.
    fn screen_height(&self) -> f32;
}

/// Supplies the view text is drawn for. `None` mutes text for that pass.
pub trait ViewProvider {
    fn active_view(&self) -> Option<&dyn ScreenView>;
}

impl ScreenView for Camera {
    fn world_to_screen(&self, point: Vec3) -> Vec3 {
        Camera::world_to_screen(self, point)
    }

    fn screen_height(&self) -> f32 {
        Camera::screen_height(self)
    }
}

impl ViewProvider for Camera {
    fn active_view(&self) -> Option<&dyn ScreenView> {
        Some(self)
    }
}

impl ViewProvider for Option<Camera> {
    fn active_view(&self) -> Option<&dyn ScreenView> {
        self.as_ref().map(|camera| camera as &dyn ScreenView)
    }
}
