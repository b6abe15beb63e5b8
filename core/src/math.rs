//! Math type aliases and helper functions.
//!
//! All overlay math is `f32` and built on `nalgebra`.

pub use nalgebra;

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4D vector (f32).
pub type Vec4 = nalgebra::Vector4<f32>;

/// 4x4 matrix (f32).
pub type Mat4 = nalgebra::Matrix4<f32>;

/// Quaternion (f32). Stored as `[x, y, z, w]` in memory.
/// Use `Quaternion::new(w, x, y, z)` or the `quat_from_rotation_*` helpers to construct.
pub type Quat = nalgebra::Quaternion<f32>;

/// Unit +X axis.
pub const RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);
/// Unit +Y axis.
pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);
/// Unit +Z axis.
pub const FORWARD: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Identity rotation.
pub const QUAT_IDENTITY: Quat = Quat::new(1.0, 0.0, 0.0, 0.0);

/// Build a right-handed perspective projection with depth range [0, 1] (wgpu/Vulkan convention).
pub fn perspective_rh(yfov: f32, aspect: f32, znear: f32, zfar: f32) -> Mat4 {
    let f = 1.0 / (yfov / 2.0).tan();
    let nf = 1.0 / (znear - zfar);
    #[rustfmt::skip]
    let result = Mat4::new(
        f / aspect, 0.0,  0.0,              0.0,
        0.0,        f,    0.0,              0.0,
        0.0,        0.0,  zfar * nf,        znear * zfar * nf,
        0.0,        0.0,  -1.0,             0.0,
    );
    result
}

/// Right-handed look-at view matrix.
pub fn look_at_rh(eye: &Vec3, target: &Vec3, up: &Vec3) -> Mat4 {
    let eye_point = nalgebra::Point3::from(*eye);
    let target_point = nalgebra::Point3::from(*target);
    nalgebra::Isometry3::look_at_rh(&eye_point, &target_point, up).to_homogeneous()
}

/// Create a quaternion from rotation around the Y axis.
pub fn quat_from_rotation_y(angle: f32) -> Quat {
    nalgebra::UnitQuaternion::from_axis_angle(&nalgebra::Vector3::y_axis(), angle).into_inner()
}

/// Create a quaternion from rotation around the Z axis.
pub fn quat_from_rotation_z(angle: f32) -> Quat {
    nalgebra::UnitQuaternion::from_axis_angle(&nalgebra::Vector3::z_axis(), angle).into_inner()
}

/// Rotate a vector by a quaternion.
pub fn quat_rotate_vec3(q: Quat, v: Vec3) -> Vec3 {
    nalgebra::UnitQuaternion::new_unchecked(q) * v
}

/// Rotation that maps local +Z onto `forward` and keeps local +Y as close to `up` as possible.
///
/// When `forward` is parallel to `up` the X axis is used as the up hint instead.
/// A zero `forward` yields the identity rotation.
pub fn quat_look_rotation(forward: Vec3, up: Vec3) -> Quat {
    if forward.norm_squared() <= f32::EPSILON {
        return QUAT_IDENTITY;
    }
    let up = if forward.cross(&up).norm_squared() <= f32::EPSILON {
        RIGHT
    } else {
        up
    };
    nalgebra::UnitQuaternion::face_towards(&forward, &up).into_inner()
}
