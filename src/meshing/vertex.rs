//! Vertex data for the meshing pipeline.
//!
//! This module defines the vertex record the mesher writes into the scratch
//! buffer and the upload sink receives. The record is plain old data so a
//! collaborator can hand the whole scratch slice to GPU-visible storage
//! without conversion.

use cgmath::{Point3, Vector3};

use crate::voxels::MaterialId;

/// A vertex emitted by the greedy mesher.
///
/// Positions are chunk-local and may exceed the chunk dimension by one at the
/// high edge of a merged quad; the collaborator offsets them by the chunk's
/// world position when drawing.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Normal: [f32; 3] (12 bytes)
/// - Barycentric coordinate: [f32; 2] (8 bytes)
/// - Material: i32 (4 bytes)
///
/// Total size: 36 bytes, no padding.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VoxelVertex {
    /// Chunk-local position of the vertex.
    pub position: [f32; 3],
    /// Outward unit normal of the face this vertex belongs to.
    pub normal: [f32; 3],
    /// Per-corner coordinate in `{0,1}x{0,1}` used for wireframe shading.
    pub bary: [f32; 2],
    /// Material index of the face.
    pub material: i32,
}

impl VoxelVertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `position` - Chunk-local vertex position
    /// * `normal` - Outward unit normal of the face
    /// * `bary_u`, `bary_v` - Wireframe corner coordinate, each `0.0` or `1.0`
    /// * `material` - Material index of the face
    ///
    /// # Returns
    /// A new `VoxelVertex` instance
    pub fn new(
        position: Point3<f32>,
        normal: Vector3<f32>,
        bary_u: f32,
        bary_v: f32,
        material: MaterialId,
    ) -> Self {
        VoxelVertex {
            position: [position.x, position.y, position.z],
            normal: [normal.x, normal.y, normal.z],
            bary: [bary_u, bary_v],
            material: material as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_has_no_padding() {
        assert_eq!(std::mem::size_of::<VoxelVertex>(), 36);
    }

    #[test]
    fn new_stores_every_component() {
        let vertex = VoxelVertex::new(
            Point3::new(1.0, 2.0, 3.0),
            Vector3::new(0.0, 1.0, 0.0),
            1.0,
            0.0,
            5,
        );

        assert_eq!(vertex.position, [1.0, 2.0, 3.0]);
        assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
        assert_eq!(vertex.bary, [1.0, 0.0]);
        assert_eq!(vertex.material, 5);
    }
}
