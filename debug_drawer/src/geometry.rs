//! Procedural line geometry for debug shapes.
//!
//! Every emitter is a pure function: it takes a shape description and writes
//! ordered point pairs into `out`, one call per segment. Nothing here touches
//! pools or batches, so the shapes can be checked in isolation.

use std::f32::consts::TAU;

use overlay_core::math::{quat_rotate_vec3, Quat, Vec3, FORWARD, RIGHT, UP};

/// Number of segments in a wireframe box.
pub const BOX_SEGMENTS: usize = 12;

/// One emitted line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
}

/// Run an emitter and collect its output into a list of [`Segment`]s.
pub fn collect_segments(emit: impl FnOnce(&mut dyn FnMut(Vec3, Vec3))) -> Vec<Segment> {
    let mut segments = Vec::new();
    emit(&mut |start, end| segments.push(Segment { start, end }));
    segments
}

/// Segments emitted by [`emit_circle`] for `increments`.
///
/// Zero increments still produces the closing segment.
pub fn circle_segment_count(increments: u32) -> usize {
    increments.max(1) as usize
}

/// Segments emitted by [`emit_sphere`] for `segments`.
pub fn sphere_segment_count(segments: u32) -> usize {
    let rings = 3 + 2 * (segments as usize / 2).saturating_sub(1);
    rings * circle_segment_count(segments)
}

/// A single segment.
pub fn emit_line(start: Vec3, end: Vec3, out: &mut dyn FnMut(Vec3, Vec3)) {
    out(start, end);
}

/// Wireframe box rotated about its center: 4 front edges, 4 back edges and
/// 4 connecting edges.
///
/// `size` holds the full extents; the corners sit at `center ± size / 2`
/// before rotation.
pub fn emit_box(center: Vec3, size: Vec3, rotation: Quat, out: &mut dyn FnMut(Vec3, Vec3)) {
    let half = size * 0.5;
    let corner = |sx: f32, sy: f32, sz: f32| -> Vec3 {
        center + quat_rotate_vec3(rotation, Vec3::new(half.x * sx, half.y * sy, half.z * sz))
    };

    let front_top_left = corner(-1.0, 1.0, -1.0);
    let front_top_right = corner(1.0, 1.0, -1.0);
    let front_bottom_left = corner(-1.0, -1.0, -1.0);
    let front_bottom_right = corner(1.0, -1.0, -1.0);

    let back_top_left = corner(-1.0, 1.0, 1.0);
    let back_top_right = corner(1.0, 1.0, 1.0);
    let back_bottom_left = corner(-1.0, -1.0, 1.0);
    let back_bottom_right = corner(1.0, -1.0, 1.0);

    // Front face
    out(front_top_left, front_top_right);
    out(front_top_right, front_bottom_right);
    out(front_bottom_right, front_bottom_left);
    out(front_bottom_left, front_top_left);
    // Back face
    out(back_top_left, back_top_right);
    out(back_top_right, back_bottom_right);
    out(back_bottom_right, back_bottom_left);
    out(back_bottom_left, back_top_left);
    // Connecting edges
    out(front_top_left, back_top_left);
    out(front_top_right, back_top_right);
    out(front_bottom_right, back_bottom_right);
    out(front_bottom_left, back_bottom_left);
}

/// Closed polygon approximating a circle in the plane of `axis_x`/`axis_y`.
///
/// The axes are not normalized: their lengths are the radii along each
/// direction, so skewed or scaled axes give ellipses. Emits
/// [`circle_segment_count`] segments, the last one closing back to
/// `center + axis_x`.
pub fn emit_circle(
    center: Vec3,
    axis_x: Vec3,
    axis_y: Vec3,
    increments: u32,
    out: &mut dyn FnMut(Vec3, Vec3),
) {
    let first = center + axis_x;
    let mut prev = first;
    for i in 1..increments {
        let angle = i as f32 * TAU / increments as f32;
        let (sin, cos) = angle.sin_cos();
        let point = center + axis_x * cos + axis_y * sin;
        out(prev, point);
        prev = point;
    }
    out(prev, first);
}

/// Globe-style wireframe sphere.
///
/// Three great circles through the center, then for each latitude step
/// `i` in `1..segments / 2` two smaller rings: one shifted along +Y and one
/// along +Z, each at `cos(angle) * radius` from the center with radius
/// `sin(angle) * radius`, where `angle = i * TAU / segments`.
pub fn emit_sphere(center: Vec3, radius: f32, segments: u32, out: &mut dyn FnMut(Vec3, Vec3)) {
    emit_circle(center, FORWARD * radius, UP * radius, segments, out);
    emit_circle(center, RIGHT * radius, UP * radius, segments, out);
    emit_circle(center, RIGHT * radius, FORWARD * radius, segments, out);

    let step = TAU / segments as f32;
    for i in 1..segments / 2 {
        let angle = i as f32 * step;
        let offset = angle.cos() * radius;
        let scale = angle.sin() * radius;

        emit_circle(
            center + UP * offset,
            FORWARD * scale,
            RIGHT * scale,
            segments,
            out,
        );
        emit_circle(
            center + FORWARD * offset,
            RIGHT * scale,
            UP * scale,
            segments,
            out,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overlay_core::math::{quat_from_rotation_y, QUAT_IDENTITY};
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).norm() < EPS
    }

    #[test]
    fn test_line() {
        let segments = collect_segments(|out| emit_line(Vec3::zeros(), UP, out));
        assert_eq!(
            segments,
            vec![Segment {
                start: Vec3::zeros(),
                end: UP
            }]
        );
    }

    #[test]
    fn test_box_axis_aligned_corners() {
        let center = Vec3::new(1.0, 2.0, 3.0);
        let size = Vec3::new(2.0, 4.0, 6.0);
        let segments = collect_segments(|out| emit_box(center, size, QUAT_IDENTITY, out));
        assert_eq!(segments.len(), BOX_SEGMENTS);

        let mut corners: Vec<Vec3> = Vec::new();
        for s in &segments {
            for p in [s.start, s.end] {
                if !corners.iter().any(|c| approx(*c, p)) {
                    corners.push(p);
                }
            }
        }
        assert_eq!(corners.len(), 8);
        for sx in [-1.0, 1.0] {
            for sy in [-2.0, 2.0] {
                for sz in [-3.0, 3.0] {
                    let expected = center + Vec3::new(sx, sy, sz);
                    assert!(corners.iter().any(|c| approx(*c, expected)));
                }
            }
        }
    }

    #[test]
    fn test_box_edges_are_axis_parallel() {
        let segments = collect_segments(|out| {
            emit_box(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), QUAT_IDENTITY, out)
        });
        for s in segments {
            let d = s.end - s.start;
            let non_zero = [d.x, d.y, d.z].iter().filter(|v| v.abs() > EPS).count();
            assert_eq!(non_zero, 1);
            assert!((d.norm() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_box_rotation_about_center() {
        let center = Vec3::new(5.0, 0.0, 0.0);
        let size = Vec3::new(2.0, 2.0, 4.0);
        let rotation = quat_from_rotation_y(FRAC_PI_2);
        let segments = collect_segments(|out| emit_box(center, size, rotation, out));
        // The long local Z extent now lies along world X.
        let max_x = segments
            .iter()
            .flat_map(|s| [s.start.x, s.end.x])
            .fold(f32::MIN, f32::max);
        assert!((max_x - 7.0).abs() < EPS);
    }

    #[test]
    fn test_circle_segment_count_and_closure() {
        for k in [3u32, 8, 17, 32] {
            let center = Vec3::new(0.0, 1.0, 0.0);
            let segments = collect_segments(|out| emit_circle(center, RIGHT, FORWARD, k, out));
            assert_eq!(segments.len(), k as usize);
            assert_eq!(segments.len(), circle_segment_count(k));
            assert!(approx(segments[0].start, center + RIGHT));
            assert!(approx(segments[segments.len() - 1].end, segments[0].start));
            for pair in segments.windows(2) {
                assert!(approx(pair[0].end, pair[1].start));
            }
        }
    }

    #[test]
    fn test_circle_radius_from_axes() {
        let segments =
            collect_segments(|out| emit_circle(Vec3::zeros(), RIGHT * 2.0, UP * 2.0, 16, out));
        for s in segments {
            assert!((s.start.norm() - 2.0).abs() < EPS);
        }
    }

    #[test]
    fn test_circle_zero_increments_is_degenerate() {
        let segments = collect_segments(|out| emit_circle(Vec3::zeros(), RIGHT, UP, 0, out));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start, segments[0].end);
    }

    #[test]
    fn test_sphere_segment_count() {
        for s in [4u32, 8, 16, 15] {
            let segments = collect_segments(|out| emit_sphere(Vec3::zeros(), 1.0, s, out));
            let expected = 3 * s as usize + 2 * (s as usize / 2 - 1) * s as usize;
            assert_eq!(segments.len(), expected);
            assert_eq!(segments.len(), sphere_segment_count(s));
        }
    }

    #[test]
    fn test_sphere_points_on_surface() {
        let center = Vec3::new(1.0, -1.0, 2.0);
        let segments = collect_segments(|out| emit_sphere(center, 3.0, 16, out));
        for s in segments {
            assert!(((s.start - center).norm() - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_sphere_degenerate_segment_counts() {
        assert_eq!(sphere_segment_count(0), 3);
        assert_eq!(sphere_segment_count(1), 3);
        let segments = collect_segments(|out| emit_sphere(Vec3::zeros(), 1.0, 0, out));
        assert_eq!(segments.len(), 3);
    }
}
