//! A minimal camera that projects world points to screen pixels.

use crate::math::{look_at_rh, perspective_rh, Mat4, Vec3, Vec4};

/// A perspective camera bound to a viewport of a given pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    view: Mat4,
    projection: Mat4,
    width: f32,
    height: f32,
}

impl Camera {
    /// Create a camera from explicit view and projection matrices.
    pub fn new(view: Mat4, projection: Mat4, width: u32, height: u32) -> Self {
        Self {
            view,
            projection,
            width: width as f32,
            height: height as f32,
        }
    }

    /// Create a perspective camera at `eye` looking at `target`.
    ///
    /// `fov_y` is the vertical field of view in radians.
    pub fn look_at(eye: Vec3, target: Vec3, fov_y: f32, width: u32, height: u32) -> Self {
        let aspect = width as f32 / height.max(1) as f32;
        Self::new(
            look_at_rh(&eye, &target, &Vec3::new(0.0, 1.0, 0.0)),
            perspective_rh(fov_y, aspect, 0.1, 1000.0),
            width,
            height,
        )
    }

    /// Project a world point to screen space.
    ///
    /// Returns pixel `x`/`y` with the origin at the bottom-left corner and
    /// `z` set to the distance in front of the camera (negative when behind).
    pub fn world_to_screen(&self, point: Vec3) -> Vec3 {
        let view_pos = self.view * Vec4::new(point.x, point.y, point.z, 1.0);
        let clip = self.projection * view_pos;
        if clip.w.abs() <= f32::EPSILON {
            return Vec3::new(self.width * 0.5, self.height * 0.5, -view_pos.z);
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        Vec3::new(
            (ndc_x * 0.5 + 0.5) * self.width,
            (ndc_y * 0.5 + 0.5) * self.height,
            -view_pos.z,
        )
    }

    /// Viewport height in pixels.
    pub fn screen_height(&self) -> f32 {
        self.height
    }
}
