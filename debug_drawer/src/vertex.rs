use overlay_core::math::Vec3;

use crate::color::Color;

/// A debug draw vertex: position + color.
///
/// Used for line-list rendering. Every pair of consecutive vertices
/// forms one line segment.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DebugVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Render-ready line list: vertices with per-vertex colors and index pairs.
///
/// Rebuilt from scratch by the batch builder; the allocations are kept
/// between rebuilds.
#[derive(Debug, Default, Clone)]
pub struct LineBatch {
    vertices: Vec<DebugVertex>,
    indices: Vec<u32>,
}

impl LineBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one segment (two vertices, one index pair).
    #[inline]
    pub fn add_line(&mut self, start: Vec3, end: Vec3, color: Color) {
        let base = self.vertices.len() as u32;
        let color = color.to_array();
        self.vertices.push(DebugVertex {
            position: [start.x, start.y, start.z],
            color,
        });
        self.vertices.push(DebugVertex {
            position: [end.x, end.y, end.z],
            color,
        });
        self.indices.push(base);
        self.indices.push(base + 1);
    }

    /// Drop all segments, keeping capacity.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn segment_count(&self) -> usize {
        self.indices.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn vertices(&self) -> &[DebugVertex] {
        &self.vertices
    }

    /// Line-list indices; every two consecutive entries form one segment.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Vertex data as raw bytes for buffer upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes for buffer upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
