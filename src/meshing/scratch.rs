//! Reusable vertex scratch storage for mesh passes.
//!
//! Each mesh pass writes its quads into a scratch buffer that is afterwards
//! handed to the upload sink and then recycled. The buffer is allocated once
//! at the theoretical worst case so a pass never reallocates, and resetting
//! it between passes only rewinds the write cursor; the stale vertex data is
//! simply overwritten.

use super::pool::Pooled;
use super::vertex::VoxelVertex;
use crate::voxels::chunk::CHUNK_VOLUME;

/// The worst-case vertex count of a single chunk: six faces per voxel, six
/// vertices per face.
pub const MAX_SCRATCH_VERTICES: usize = CHUNK_VOLUME * 6 * 6;

/// A growable-once vertex array with a rewindable write cursor.
pub struct ScratchVertexBuffer {
    /// Vertex storage; the length doubles as the write cursor.
    vertices: Vec<VoxelVertex>,
}

impl ScratchVertexBuffer {
    /// Creates a scratch buffer with the full worst-case capacity reserved.
    pub fn new() -> Self {
        ScratchVertexBuffer {
            vertices: Vec::with_capacity(MAX_SCRATCH_VERTICES),
        }
    }

    /// Rewinds the write cursor without touching the underlying storage.
    pub fn begin_pass(&mut self) {
        self.vertices.clear();
    }

    /// Appends a vertex.
    ///
    /// The capacity invariant makes this a plain cursor-advancing write;
    /// debug builds check that the worst case is never exceeded.
    #[inline]
    pub fn push(&mut self, vertex: VoxelVertex) {
        debug_assert!(self.vertices.len() < MAX_SCRATCH_VERTICES);
        self.vertices.push(vertex);
    }

    /// Returns the number of vertices written this pass.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Checks whether this pass produced no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the vertices written this pass.
    pub fn vertices(&self) -> &[VoxelVertex] {
        &self.vertices
    }
}

impl Default for ScratchVertexBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Pooled for ScratchVertexBuffer {
    fn create() -> Self {
        Self::new()
    }

    fn reset(&mut self) {
        self.begin_pass();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Point3, Vector3};

    fn any_vertex() -> VoxelVertex {
        VoxelVertex::new(
            Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            0.0,
            0.0,
            1,
        )
    }

    #[test]
    fn push_advances_the_cursor() {
        let mut scratch = ScratchVertexBuffer::new();
        assert!(scratch.is_empty());

        scratch.push(any_vertex());
        scratch.push(any_vertex());
        assert_eq!(scratch.len(), 2);
        assert_eq!(scratch.vertices().len(), 2);
    }

    #[test]
    fn begin_pass_rewinds_without_shrinking_capacity() {
        let mut scratch = ScratchVertexBuffer::new();
        for _ in 0..12 {
            scratch.push(any_vertex());
        }

        scratch.begin_pass();
        assert!(scratch.is_empty());
        assert_eq!(scratch.vertices.capacity(), MAX_SCRATCH_VERTICES);
    }
}
