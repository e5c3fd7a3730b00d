//! # Chunk Grid Module
//!
//! This module provides the `ChunkGrid` struct which owns every chunk slot in
//! the world and coordinates chunk allocation, voxel edits, and neighbor
//! lookups for the mesher.
//!
//! ## Architecture
//!
//! The grid is a dense 3-D array of chunk slots sized to a fixed maximum of
//! 32x32x32 chunks, indexed the same way as chunk-local voxels but at chunk
//! granularity. Slots start unallocated and are allocated lazily on the first
//! voxel write, so memory scales with the occupied part of the world while
//! lookups stay O(1) index arithmetic.
//!
//! ## Sentinel Chunks
//!
//! Two immutable sentinel chunks (one completely empty, one completely
//! solid) are built at construction. Neighbor resolution substitutes them
//! for anything that is not a real allocated chunk, so face-visibility tests
//! never special-case missing neighbors: an absent or unallocated neighbor
//! behaves like empty space, and the volume's outer boundary behaves like
//! empty space or solid rock depending on whether the exterior should be
//! meshed.

use cgmath::Point3;
use log::trace;

use super::chunk::{Chunk, CHUNK_DIMENSION, CHUNK_MASK, CHUNK_SHIFT};
use super::face::FaceDirection;
use super::voxel::{MaterialId, Voxel};

/// The maximum number of chunks along each axis of the grid.
pub const GRID_DIMENSION: usize = 32;
/// The number of chunk slots in a single 2D plane of the grid.
pub const GRID_PLANE_SIZE: usize = GRID_DIMENSION * GRID_DIMENSION;
/// The total number of chunk slots in the grid.
pub const GRID_VOLUME: usize = GRID_PLANE_SIZE * GRID_DIMENSION;

/// The two externally configured flags that shape neighbor resolution.
///
/// Both are supplied at grid construction and apply uniformly to every chunk.
#[derive(Copy, Clone, Debug)]
pub struct MeshSettings {
    /// Whether the outermost faces of the whole volume are drawn. When false,
    /// the solid sentinel seals the volume's boundary.
    pub mesh_exterior: bool,

    /// Debug mode that treats every inter-chunk boundary as visible,
    /// regardless of occlusion. Used to visualize chunk seams.
    pub mesh_between_chunks: bool,
}

impl Default for MeshSettings {
    fn default() -> Self {
        MeshSettings {
            mesh_exterior: true,
            mesh_between_chunks: false,
        }
    }
}

/// Owns the dense chunk-slot array, the two sentinels, and the world extents.
pub struct ChunkGrid {
    /// All `GRID_VOLUME` chunk slots, allocated lazily.
    chunks: Vec<Chunk>,

    /// Immutable all-empty stand-in for absent neighbors.
    empty_sentinel: Chunk,

    /// Immutable all-solid stand-in used to seal the volume's boundary.
    full_sentinel: Chunk,

    /// World extents in voxels along each axis.
    map_size: [i32; 3],

    /// World extents in chunks along each axis.
    chunk_amount: [usize; 3],

    /// The meshing-behavior flags supplied at construction.
    settings: MeshSettings,
}

impl ChunkGrid {
    /// Creates a grid for a world of `map_size` voxels per axis.
    ///
    /// # Arguments
    /// * `map_size` - World extents in voxels; each must be a non-zero
    ///   multiple of `CHUNK_DIMENSION` and at most
    ///   `GRID_DIMENSION * CHUNK_DIMENSION`
    /// * `settings` - The meshing-behavior flags
    ///
    /// # Panics
    /// Panics if any extent violates the divisibility or maximum-size
    /// constraints (contract violation).
    pub fn new(map_size: [usize; 3], settings: MeshSettings) -> Self {
        let mut chunk_amount = [0usize; 3];

        for axis in 0..3 {
            assert!(
                map_size[axis] > 0 && map_size[axis] % CHUNK_DIMENSION == 0,
                "map size must be a non-zero multiple of the chunk dimension"
            );
            chunk_amount[axis] = map_size[axis] / CHUNK_DIMENSION;
            assert!(
                chunk_amount[axis] <= GRID_DIMENSION,
                "map size exceeds the grid maximum"
            );
        }

        ChunkGrid {
            chunks: (0..GRID_VOLUME).map(|_| Chunk::unallocated()).collect(),
            empty_sentinel: Chunk::sentinel_empty(),
            full_sentinel: Chunk::sentinel_solid(),
            map_size: map_size.map(|extent| extent as i32),
            chunk_amount,
            settings,
        }
    }

    /// Returns the world extents in voxels.
    pub fn map_size(&self) -> [i32; 3] {
        self.map_size
    }

    /// Returns the world extents in chunks.
    pub fn chunk_amount(&self) -> [usize; 3] {
        self.chunk_amount
    }

    /// Returns the meshing-behavior flags.
    pub fn settings(&self) -> MeshSettings {
        self.settings
    }

    /// Computes the linear slot index of the chunk at `(f,g,h)`.
    ///
    /// Mirrors the voxel linearization with Y fastest, at chunk granularity
    /// and sized to the fixed grid maximum.
    #[inline]
    fn slot_index(&self, f: usize, g: usize, h: usize) -> usize {
        debug_assert!(f < self.chunk_amount[0]);
        debug_assert!(g < self.chunk_amount[1]);
        debug_assert!(h < self.chunk_amount[2]);

        g + f * GRID_DIMENSION + h * GRID_PLANE_SIZE
    }

    /// Checks whether a world voxel coordinate lies outside the volume.
    #[inline]
    pub fn out_of_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        x < 0
            || y < 0
            || z < 0
            || x >= self.map_size[0]
            || y >= self.map_size[1]
            || z >= self.map_size[2]
    }

    /// Writes a voxel at world coordinates, allocating the owning chunk on
    /// demand.
    ///
    /// This is the dirty/edit entry point: the write updates the column's
    /// altitude bounds and marks the owning chunk dirty. Out-of-bounds
    /// coordinates are silently ignored and have no mesh side effect.
    ///
    /// # Arguments
    /// * `x`, `y`, `z` - World voxel coordinates
    /// * `material` - The material to store, `0` to clear
    pub fn add_voxel(&mut self, x: i32, y: i32, z: i32, material: MaterialId) {
        if self.out_of_bounds(x, y, z) {
            trace!("ignoring out-of-bounds voxel edit at ({x}, {y}, {z})");
            return;
        }

        let chunk = self.ensure_chunk(x, y, z);
        chunk.set_voxel(
            (x & CHUNK_MASK) as usize,
            (y & CHUNK_MASK) as usize,
            (z & CHUNK_MASK) as usize,
            material,
        );
    }

    /// Reads the voxel at world coordinates.
    ///
    /// Out-of-bounds coordinates and unallocated chunks read as empty.
    pub fn voxel_at(&self, x: i32, y: i32, z: i32) -> Voxel {
        if self.out_of_bounds(x, y, z) {
            return Voxel::EMPTY;
        }

        let slot = self.slot_index(
            (x >> CHUNK_SHIFT) as usize,
            (y >> CHUNK_SHIFT) as usize,
            (z >> CHUNK_SHIFT) as usize,
        );
        let chunk = &self.chunks[slot];
        if !chunk.is_allocated() {
            return Voxel::EMPTY;
        }

        chunk.voxel(
            (x & CHUNK_MASK) as usize,
            (y & CHUNK_MASK) as usize,
            (z & CHUNK_MASK) as usize,
        )
    }

    /// Returns the chunk owning the given world coordinates, allocating it if
    /// the slot is still empty.
    fn ensure_chunk(&mut self, x: i32, y: i32, z: i32) -> &mut Chunk {
        let f = (x >> CHUNK_SHIFT) as usize;
        let g = (y >> CHUNK_SHIFT) as usize;
        let h = (z >> CHUNK_SHIFT) as usize;

        let slot = self.slot_index(f, g, h);
        if !self.chunks[slot].is_allocated() {
            self.chunks[slot].allocate(Point3::new(f, g, h));
            trace!("allocated chunk ({f}, {g}, {h})");
        }

        &mut self.chunks[slot]
    }

    /// Returns a reference to the chunk at the given chunk coordinates.
    pub fn chunk(&self, position: Point3<usize>) -> &Chunk {
        &self.chunks[self.slot_index(position.x, position.y, position.z)]
    }

    /// Returns a mutable reference to the chunk at the given chunk
    /// coordinates.
    pub fn chunk_mut(&mut self, position: Point3<usize>) -> &mut Chunk {
        let slot = self.slot_index(position.x, position.y, position.z);
        &mut self.chunks[slot]
    }

    /// Resolves the neighbor of a chunk one step along the given face
    /// direction.
    ///
    /// The result is never absent:
    /// - stepping outside the grid extents yields the empty sentinel when the
    ///   exterior should be meshed, the solid sentinel when it should be
    ///   sealed;
    /// - an in-grid slot that is not allocated yields the empty sentinel
    ///   (there is nothing to occlude against);
    /// - otherwise the real neighbor chunk is returned.
    pub fn neighbor(&self, position: Point3<usize>, face: FaceDirection) -> &Chunk {
        let (axis, step): (usize, i64) = match face {
            FaceDirection::XNeg => (0, -1),
            FaceDirection::XPos => (0, 1),
            FaceDirection::YNeg => (1, -1),
            FaceDirection::YPos => (1, 1),
            FaceDirection::ZNeg => (2, -1),
            FaceDirection::ZPos => (2, 1),
        };

        let mut coords = [
            position.x as i64,
            position.y as i64,
            position.z as i64,
        ];
        coords[axis] += step;

        if coords[axis] < 0 || coords[axis] >= self.chunk_amount[axis] as i64 {
            return self.boundary_sentinel();
        }

        let slot = self.slot_index(coords[0] as usize, coords[1] as usize, coords[2] as usize);
        let chunk = &self.chunks[slot];
        if chunk.is_allocated() {
            chunk
        } else {
            &self.empty_sentinel
        }
    }

    /// Returns the sentinel standing in for space beyond the grid extents.
    fn boundary_sentinel(&self) -> &Chunk {
        if self.settings.mesh_exterior {
            &self.empty_sentinel
        } else {
            &self.full_sentinel
        }
    }

    /// Collects the chunk coordinates of every allocated, non-sentinel chunk.
    ///
    /// The demo driver uses this to walk the world when meshing everything.
    pub fn allocated_positions(&self) -> Vec<Point3<usize>> {
        let mut positions = Vec::new();

        for h in 0..self.chunk_amount[2] {
            for f in 0..self.chunk_amount[0] {
                for g in 0..self.chunk_amount[1] {
                    if self.chunks[self.slot_index(f, g, h)].is_allocated() {
                        positions.push(Point3::new(f, g, h));
                    }
                }
            }
        }

        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_edits_are_silently_ignored() {
        let mut grid = ChunkGrid::new([64, 64, 64], MeshSettings::default());

        grid.add_voxel(-1, 0, 0, 1);
        grid.add_voxel(0, 64, 0, 1);
        grid.add_voxel(0, 0, 1000, 1);

        assert!(grid.allocated_positions().is_empty());
    }

    #[test]
    fn first_write_allocates_exactly_the_owning_chunk() {
        let mut grid = ChunkGrid::new([64, 64, 64], MeshSettings::default());

        grid.add_voxel(40, 3, 5, 2);

        let positions = grid.allocated_positions();
        assert_eq!(positions, vec![Point3::new(1, 0, 0)]);
        assert_eq!(grid.voxel_at(40, 3, 5).material, 2);
        assert!(grid.voxel_at(40, 4, 5).is_empty());
    }

    #[test]
    fn out_of_bounds_reads_are_empty() {
        let grid = ChunkGrid::new([32, 32, 32], MeshSettings::default());
        assert!(grid.voxel_at(-5, 0, 0).is_empty());
        assert!(grid.voxel_at(0, 0, 32).is_empty());
    }

    #[test]
    fn boundary_neighbor_depends_on_the_exterior_flag() {
        let open = ChunkGrid::new([32, 32, 32], MeshSettings::default());
        let sealed = ChunkGrid::new(
            [32, 32, 32],
            MeshSettings {
                mesh_exterior: false,
                ..MeshSettings::default()
            },
        );
        let origin = Point3::new(0, 0, 0);

        let neighbor = open.neighbor(origin, FaceDirection::XNeg);
        assert!(neighbor.is_sentinel());
        assert!(!neighbor.is_visible(0, 0, 0));

        let neighbor = sealed.neighbor(origin, FaceDirection::XNeg);
        assert!(neighbor.is_sentinel());
        assert!(neighbor.is_visible(0, 0, 0));
    }

    #[test]
    fn unallocated_neighbor_slot_resolves_to_the_empty_sentinel() {
        let mut grid = ChunkGrid::new([64, 32, 32], MeshSettings::default());
        grid.add_voxel(0, 0, 0, 1);

        let neighbor = grid.neighbor(Point3::new(0, 0, 0), FaceDirection::XPos);
        assert!(neighbor.is_sentinel());
        assert!(!neighbor.is_visible(0, 0, 0));
    }

    #[test]
    fn allocated_neighbor_resolves_to_the_real_chunk() {
        let mut grid = ChunkGrid::new([64, 32, 32], MeshSettings::default());
        grid.add_voxel(0, 0, 0, 1);
        grid.add_voxel(32, 7, 0, 3);

        let neighbor = grid.neighbor(Point3::new(0, 0, 0), FaceDirection::XPos);
        assert!(!neighbor.is_sentinel());
        assert_eq!(neighbor.voxel(0, 7, 0).material, 3);
    }

    #[test]
    #[should_panic(expected = "multiple of the chunk dimension")]
    fn map_size_must_be_chunk_aligned() {
        ChunkGrid::new([48, 32, 32], MeshSettings::default());
    }

    #[test]
    #[should_panic(expected = "exceeds the grid maximum")]
    fn map_size_must_fit_the_grid() {
        ChunkGrid::new([32 * 33, 32, 32], MeshSettings::default());
    }
}
