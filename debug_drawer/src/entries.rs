//! Draw requests for lines and procedural shapes, and the pools holding them.

use overlay_core::math::{Quat, Vec3, QUAT_IDENTITY};
use overlay_core::pool::{EntryPool, Poolable};

use crate::color::Color;
use crate::geometry::{
    circle_segment_count, emit_box, emit_circle, emit_line, emit_sphere, sphere_segment_count,
    BOX_SEGMENTS,
};

/// Which batch a shape is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DepthMode {
    /// Hidden behind closer geometry.
    #[default]
    Tested,
    /// Drawn over everything.
    AlwaysOnTop,
}

impl DepthMode {
    pub fn from_depth_test(depth_test: bool) -> Self {
        if depth_test {
            Self::Tested
        } else {
            Self::AlwaysOnTop
        }
    }
}

/// Color, lifetime and depth mode shared by every shape kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub color: Color,
    /// Seconds to stay visible. Zero or negative expires on the next tick.
    pub duration: f32,
    pub depth: DepthMode,
}

impl ShapeStyle {
    pub fn new(color: Color, duration: f32, depth: DepthMode) -> Self {
        Self {
            color,
            duration,
            depth,
        }
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::new(Color::WHITE, 0.0, DepthMode::Tested)
    }
}

/// Geometry of a draw request: how many segments it produces and how to emit them.
pub trait ShapeGeometry {
    fn segment_count(&self) -> usize;

    fn emit(&self, out: &mut dyn FnMut(Vec3, Vec3));
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineShape {
    pub start: Vec3,
    pub end: Vec3,
}

/// Box with full per-axis extents, rotated about its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    pub center: Vec3,
    pub size: Vec3,
    pub rotation: Quat,
}

impl Default for BoxShape {
    fn default() -> Self {
        Self {
            center: Vec3::zeros(),
            size: Vec3::zeros(),
            rotation: QUAT_IDENTITY,
        }
    }
}

/// Circle in the plane of two basis vectors whose lengths are the radius.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CircleShape {
    pub center: Vec3,
    pub axis_x: Vec3,
    pub axis_y: Vec3,
    pub increments: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SphereShape {
    pub center: Vec3,
    pub radius: f32,
    pub segments: u32,
}

impl ShapeGeometry for LineShape {
    fn segment_count(&self) -> usize {
        1
    }

    fn emit(&self, out: &mut dyn FnMut(Vec3, Vec3)) {
        emit_line(self.start, self.end, out);
    }
}

impl ShapeGeometry for BoxShape {
    fn segment_count(&self) -> usize {
        BOX_SEGMENTS
    }

    fn emit(&self, out: &mut dyn FnMut(Vec3, Vec3)) {
        emit_box(self.center, self.size, self.rotation, out);
    }
}

impl ShapeGeometry for CircleShape {
    fn segment_count(&self) -> usize {
        circle_segment_count(self.increments)
    }

    fn emit(&self, out: &mut dyn FnMut(Vec3, Vec3)) {
        emit_circle(self.center, self.axis_x, self.axis_y, self.increments, out);
    }
}

impl ShapeGeometry for SphereShape {
    fn segment_count(&self) -> usize {
        sphere_segment_count(self.segments)
    }

    fn emit(&self, out: &mut dyn FnMut(Vec3, Vec3)) {
        emit_sphere(self.center, self.radius, self.segments, out);
    }
}

/// Any of the four shape kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Line(LineShape),
    Box(BoxShape),
    Circle(CircleShape),
    Sphere(SphereShape),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Line(_) => ShapeKind::Line,
            Self::Box(_) => ShapeKind::Box,
            Self::Circle(_) => ShapeKind::Circle,
            Self::Sphere(_) => ShapeKind::Sphere,
        }
    }

    pub fn segment_count(&self) -> usize {
        match self {
            Self::Line(s) => s.segment_count(),
            Self::Box(s) => s.segment_count(),
            Self::Circle(s) => s.segment_count(),
            Self::Sphere(s) => s.segment_count(),
        }
    }

    pub fn emit(&self, out: &mut dyn FnMut(Vec3, Vec3)) {
        match self {
            Self::Line(s) => s.emit(out),
            Self::Box(s) => s.emit(out),
            Self::Circle(s) => s.emit(out),
            Self::Sphere(s) => s.emit(out),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Line,
    Box,
    Circle,
    Sphere,
}

/// Identifies a registered draw request by pool and slot index.
///
/// Slots are reused once their entry expires, so a handle only names the
/// request until then.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryHandle {
    pub kind: ShapeKind,
    pub index: usize,
}

/// A pooled shape draw request.
#[derive(Debug, Clone, Default)]
pub struct ShapeEntry<G> {
    pub geometry: G,
    pub color: Color,
    /// Seconds left; the entry is freed once this drops below zero.
    pub remaining: f32,
    pub depth: DepthMode,
}

impl<G: ShapeGeometry + Default> Poolable for ShapeEntry<G> {
    fn new_empty() -> Self {
        Self::default()
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl<G: ShapeGeometry + Default> ShapeEntry<G> {
    fn fill(&mut self, geometry: G, style: ShapeStyle) {
        self.geometry = geometry;
        self.color = style.color;
        self.remaining = style.duration;
        self.depth = style.depth;
    }
}

/// One [`EntryPool`] per shape kind.
#[derive(Debug, Default)]
pub struct ShapePools {
    pub(crate) lines: EntryPool<ShapeEntry<LineShape>>,
    pub(crate) boxes: EntryPool<ShapeEntry<BoxShape>>,
    pub(crate) circles: EntryPool<ShapeEntry<CircleShape>>,
    pub(crate) spheres: EntryPool<ShapeEntry<SphereShape>>,
}

impl ShapePools {
    pub fn new() -> Self {
        Self {
            lines: EntryPool::with_capacity(16),
            boxes: EntryPool::with_capacity(32),
            circles: EntryPool::with_capacity(32),
            spheres: EntryPool::with_capacity(32),
        }
    }

    /// Store a draw request in the first free slot of its kind's pool.
    pub fn register(&mut self, shape: Shape, style: ShapeStyle) -> EntryHandle {
        let kind = shape.kind();
        let index = match shape {
            Shape::Line(g) => self.lines.register(|e| e.fill(g, style)),
            Shape::Box(g) => self.boxes.register(|e| e.fill(g, style)),
            Shape::Circle(g) => self.circles.register(|e| e.fill(g, style)),
            Shape::Sphere(g) => self.spheres.register(|e| e.fill(g, style)),
        };
        EntryHandle { kind, index }
    }

    /// Check whether the request behind `handle` is still alive.
    pub fn is_occupied(&self, handle: EntryHandle) -> bool {
        match handle.kind {
            ShapeKind::Line => self.lines.is_occupied(handle.index),
            ShapeKind::Box => self.boxes.is_occupied(handle.index),
            ShapeKind::Circle => self.circles.is_occupied(handle.index),
            ShapeKind::Sphere => self.spheres.is_occupied(handle.index),
        }
    }

    /// Seconds left for the request behind `handle`, if it is alive.
    pub fn remaining(&self, handle: EntryHandle) -> Option<f32> {
        match handle.kind {
            ShapeKind::Line => self.lines.get(handle.index).map(|e| e.remaining),
            ShapeKind::Box => self.boxes.get(handle.index).map(|e| e.remaining),
            ShapeKind::Circle => self.circles.get(handle.index).map(|e| e.remaining),
            ShapeKind::Sphere => self.spheres.get(handle.index).map(|e| e.remaining),
        }
    }

    /// Occupied entries of one kind.
    pub fn active_count(&self, kind: ShapeKind) -> usize {
        match kind {
            ShapeKind::Line => self.lines.active_count(),
            ShapeKind::Box => self.boxes.active_count(),
            ShapeKind::Circle => self.circles.active_count(),
            ShapeKind::Sphere => self.spheres.active_count(),
        }
    }

    /// Slots of one kind, occupied or free.
    pub fn capacity(&self, kind: ShapeKind) -> usize {
        match kind {
            ShapeKind::Line => self.lines.len(),
            ShapeKind::Box => self.boxes.len(),
            ShapeKind::Circle => self.circles.len(),
            ShapeKind::Sphere => self.spheres.len(),
        }
    }

    /// Occupied entries across all kinds.
    pub fn total_active(&self) -> usize {
        self.lines.active_count()
            + self.boxes.active_count()
            + self.circles.active_count()
            + self.spheres.active_count()
    }

    /// Segments the occupied entries would emit, split by depth mode as
    /// `(depth_tested, always_on_top)`.
    pub fn segment_totals(&self) -> (usize, usize) {
        let mut totals = (0, 0);
        self.for_each_active(|geometry, style| match style.depth {
            DepthMode::Tested => totals.0 += geometry.segment_count(),
            DepthMode::AlwaysOnTop => totals.1 += geometry.segment_count(),
        });
        totals
    }

    /// Visit occupied entries pool by pool (line, box, circle, sphere), each
    /// in index order.
    pub(crate) fn for_each_active(
        &self,
        mut visit: impl FnMut(&dyn ShapeGeometry, &ShapeStyleRef),
    ) {
        for e in self.lines.iter_active() {
            visit(&e.geometry, &ShapeStyleRef::of(e));
        }
        for e in self.boxes.iter_active() {
            visit(&e.geometry, &ShapeStyleRef::of(e));
        }
        for e in self.circles.iter_active() {
            visit(&e.geometry, &ShapeStyleRef::of(e));
        }
        for e in self.spheres.iter_active() {
            visit(&e.geometry, &ShapeStyleRef::of(e));
        }
    }

    /// Free every entry.
    pub fn clear(&mut self) {
        self.lines.release_all();
        self.boxes.release_all();
        self.circles.release_all();
        self.spheres.release_all();
    }
}

/// Color and depth mode of an occupied entry, as seen by the batch builder.
pub(crate) struct ShapeStyleRef {
    pub color: Color,
    pub depth: DepthMode,
}

impl ShapeStyleRef {
    fn of<G>(entry: &ShapeEntry<G>) -> Self {
        Self {
            color: entry.color,
            depth: entry.depth,
        }
    }
}
