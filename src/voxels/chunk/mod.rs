//! # Chunk Module
//!
//! This module provides the `Chunk` struct for managing 32x32x32 blocks of
//! voxel data, together with the per-column altitude maps that accelerate
//! meshing.
//!
//! ## Storage Layout
//!
//! Voxels are stored in a single dense array linearized as
//! `j + i*32 + k*32²`, making Y the fastest-varying axis. Every index into
//! the array (voxel data, altitude maps, and the mesher's visited grids)
//! goes through the functions in this module so the axis order stays
//! consistent everywhere.
//!
//! ## Altitude Maps
//!
//! Each column `(i,k)` caches the inclusive `[min,max]` altitude range of its
//! non-empty voxels (`min = 32` when the column is empty). The mesher scans
//! only that range, which turns a full-volume walk into a walk proportional
//! to the occupied column heights for terrain-like data. The bounds may grow
//! loose when a voxel is removed away from an extreme; they are re-tightened
//! lazily when a removal lands exactly on an extreme (see `altitude.rs`).
//!
//! ## Allocation
//!
//! A chunk is either fully allocated (voxel array plus both altitude maps) or
//! fully unallocated; the storage is held behind a single `Option` so partial
//! allocation cannot be represented.

use cgmath::Point3;

use super::voxel::{MaterialId, Voxel, EMPTY_MATERIAL};

mod altitude;

/// The dimension (width, height, depth) of a chunk in voxels.
pub const CHUNK_DIMENSION: usize = 32;
/// The number of voxels in a single 2D plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: usize = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of voxels in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_VOLUME: usize = CHUNK_PLANE_SIZE * CHUNK_DIMENSION;

/// Bitmask extracting the chunk-local part of a world coordinate.
pub const CHUNK_MASK: i32 = (CHUNK_DIMENSION - 1) as i32;
/// Arithmetic shift converting a world coordinate to a chunk coordinate.
pub const CHUNK_SHIFT: i32 = 5;

/// Distance between two voxels adjacent along Y in the linearized array.
pub const ACCESS_STEP_Y: usize = 1;
/// Distance between two voxels adjacent along X in the linearized array.
pub const ACCESS_STEP_X: usize = CHUNK_DIMENSION;
/// Distance between two voxels adjacent along Z in the linearized array.
pub const ACCESS_STEP_Z: usize = CHUNK_PLANE_SIZE;

/// Computes the linear index of the voxel at chunk-local `(i,j,k)`.
///
/// The formula is `j + i*CHUNK_DIMENSION + k*CHUNK_PLANE_SIZE`, i.e. Y is the
/// fastest-varying axis, so a column `(i,k)` occupies a contiguous run of the
/// array.
///
/// # Panics
/// Debug builds panic if any coordinate is out of `[0, CHUNK_DIMENSION)`.
#[inline]
pub fn voxel_index(i: usize, j: usize, k: usize) -> usize {
    debug_assert!(i < CHUNK_DIMENSION);
    debug_assert!(j < CHUNK_DIMENSION);
    debug_assert!(k < CHUNK_DIMENSION);

    j + i * CHUNK_DIMENSION + k * CHUNK_PLANE_SIZE
}

/// Computes the linear index of the altitude-map column at `(i,k)`.
#[inline]
pub fn column_index(i: usize, k: usize) -> usize {
    debug_assert!(i < CHUNK_DIMENSION);
    debug_assert!(k < CHUNK_DIMENSION);

    i + k * CHUNK_DIMENSION
}

/// The owned storage of an allocated chunk.
///
/// Held behind an `Option` in `Chunk` so that the voxel array and the two
/// altitude maps always exist together.
struct ChunkStorage {
    /// Dense voxel array, `CHUNK_VOLUME` entries.
    voxels: Box<[Voxel]>,
    /// Lowest occupied altitude per column, `CHUNK_DIMENSION` when empty.
    min_altitude: Box<[u8]>,
    /// Highest occupied altitude per column, `0` when empty.
    max_altitude: Box<[u8]>,
}

impl ChunkStorage {
    fn new() -> Self {
        ChunkStorage {
            voxels: vec![Voxel::EMPTY; CHUNK_VOLUME].into_boxed_slice(),
            min_altitude: vec![CHUNK_DIMENSION as u8; CHUNK_PLANE_SIZE].into_boxed_slice(),
            max_altitude: vec![0u8; CHUNK_PLANE_SIZE].into_boxed_slice(),
        }
    }
}

/// Represents a 32x32x32 cube of voxels, the unit of allocation and meshing.
///
/// Chunks start life as unallocated slots inside the grid and are allocated
/// lazily on the first voxel write. The two sentinel chunks (all-empty and
/// all-solid) are ordinary `Chunk` instances flagged as sentinels; they stand
/// in for absent neighbors so boundary checks never deal with missing chunks.
pub struct Chunk {
    /// Voxel array and altitude maps; `None` while the slot is unallocated.
    storage: Option<ChunkStorage>,

    /// The position of this chunk in chunk coordinates (not voxel coordinates).
    position: Point3<usize>,

    /// Set whenever a voxel changes; cleared when a mesh pass starts.
    dirty: bool,

    /// Sentinel chunks are immutable stand-ins and can never be meshed.
    sentinel: bool,
}

impl Chunk {
    /// Creates an unallocated chunk slot.
    pub fn unallocated() -> Self {
        Chunk {
            storage: None,
            position: Point3::new(0, 0, 0),
            dirty: false,
            sentinel: false,
        }
    }

    /// Allocates this chunk's voxel array and altitude maps.
    ///
    /// Voxels are zero-filled (all empty), every column's minimum altitude is
    /// set to the empty sentinel `CHUNK_DIMENSION` and its maximum to `0`,
    /// and the chunk is marked dirty so it gets meshed.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of this chunk within the grid
    ///
    /// # Panics
    /// Panics if the chunk is already allocated (contract violation).
    pub fn allocate(&mut self, position: Point3<usize>) {
        assert!(!self.is_allocated(), "chunk allocated twice");

        self.storage = Some(ChunkStorage::new());
        self.position = position;
        self.dirty = true;
    }

    /// Releases this chunk's storage, returning the slot to the unallocated
    /// state.
    ///
    /// # Panics
    /// Panics if the chunk is not allocated (contract violation).
    pub fn deallocate(&mut self) {
        assert!(self.is_allocated(), "chunk deallocated twice");

        self.storage = None;
        self.dirty = false;
    }

    /// Builds the all-empty sentinel chunk.
    ///
    /// Sentinels are allocated once at grid construction, never mutated, and
    /// never dirty.
    pub(crate) fn sentinel_empty() -> Self {
        let mut chunk = Chunk::unallocated();
        chunk.allocate(Point3::new(0, 0, 0));
        chunk.sentinel = true;
        chunk.dirty = false;
        chunk
    }

    /// Builds the all-solid sentinel chunk.
    pub(crate) fn sentinel_solid() -> Self {
        let mut chunk = Chunk::unallocated();
        chunk.allocate(Point3::new(0, 0, 0));
        chunk.fill_solid(1);
        chunk.sentinel = true;
        chunk.dirty = false;
        chunk
    }

    /// Fills every voxel with the given solid material and tightens the
    /// altitude maps accordingly. Used only to build the solid sentinel.
    fn fill_solid(&mut self, material: MaterialId) {
        let storage = self.storage.as_mut().expect("filling an unallocated chunk");
        storage.voxels.fill(Voxel::new(material));
        storage.min_altitude.fill(0);
        storage.max_altitude.fill((CHUNK_DIMENSION - 1) as u8);
    }

    /// Checks whether this chunk's storage is allocated.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.storage.is_some()
    }

    /// Checks whether this chunk is one of the immutable sentinel stand-ins.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.sentinel
    }

    /// Returns this chunk's position in chunk coordinates.
    pub fn position(&self) -> Point3<usize> {
        self.position
    }

    /// Checks whether this chunk has pending edits that require re-meshing.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the dirty flag. Called by the mesher at the start of a pass so
    /// edits made during meshing re-dirty the chunk rather than being lost.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Writes a voxel at chunk-local coordinates and updates the column's
    /// altitude bounds.
    ///
    /// Inserting a solid material widens the bounds to include `j`; writing
    /// the empty material re-tightens them lazily (see `altitude.rs`). The
    /// chunk is marked dirty either way.
    ///
    /// # Arguments
    /// * `i`, `j`, `k` - Chunk-local voxel coordinates
    /// * `material` - The material to store, `0` for empty
    ///
    /// # Panics
    /// Panics if the chunk is unallocated; debug builds also panic when
    /// writing to a sentinel (sentinels are immutable).
    pub fn set_voxel(&mut self, i: usize, j: usize, k: usize, material: MaterialId) {
        debug_assert!(!self.sentinel, "sentinel chunks are immutable");
        assert!(self.is_allocated(), "writing to an unallocated chunk");

        let storage = self.storage.as_mut().unwrap();
        storage.voxels[voxel_index(i, j, k)] = Voxel::new(material);

        if material != EMPTY_MATERIAL {
            Self::on_voxel_added(storage, i, j, k);
        } else {
            Self::on_voxel_removed(storage, i, j, k);
        }

        self.dirty = true;
    }

    /// Returns the voxel at chunk-local coordinates.
    ///
    /// # Panics
    /// Panics if the chunk is unallocated.
    #[inline]
    pub fn voxel(&self, i: usize, j: usize, k: usize) -> Voxel {
        let storage = self.storage.as_ref().expect("reading an unallocated chunk");
        storage.voxels[voxel_index(i, j, k)]
    }

    /// Checks whether the voxel at chunk-local coordinates is solid.
    #[inline]
    pub fn is_visible(&self, i: usize, j: usize, k: usize) -> bool {
        self.voxel(i, j, k).is_visible()
    }

    /// Returns the full voxel array of an allocated chunk.
    ///
    /// The mesher walks this slice directly using the index functions above.
    #[inline]
    pub fn voxels(&self) -> &[Voxel] {
        let storage = self.storage.as_ref().expect("reading an unallocated chunk");
        &storage.voxels
    }

    /// Returns the inclusive `[min,max]` altitude bounds of column `(i,k)`.
    ///
    /// An empty column reports `(CHUNK_DIMENSION, 0)`, for which an inclusive
    /// range scan is naturally empty.
    #[inline]
    pub fn column_bounds(&self, i: usize, k: usize) -> (u8, u8) {
        let storage = self.storage.as_ref().expect("reading an unallocated chunk");
        let column = column_index(i, k);
        (storage.min_altitude[column], storage.max_altitude[column])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allocated_chunk() -> Chunk {
        let mut chunk = Chunk::unallocated();
        chunk.allocate(Point3::new(0, 0, 0));
        chunk
    }

    #[test]
    fn linearization_is_y_fastest() {
        assert_eq!(voxel_index(0, 0, 0), 0);
        assert_eq!(voxel_index(0, 1, 0), ACCESS_STEP_Y);
        assert_eq!(voxel_index(1, 0, 0), ACCESS_STEP_X);
        assert_eq!(voxel_index(0, 0, 1), ACCESS_STEP_Z);
        assert_eq!(
            voxel_index(3, 5, 7),
            5 + 3 * CHUNK_DIMENSION + 7 * CHUNK_PLANE_SIZE
        );
    }

    #[test]
    fn allocation_starts_empty_and_dirty() {
        let chunk = allocated_chunk();
        assert!(chunk.is_allocated());
        assert!(chunk.is_dirty());
        assert!(!chunk.is_visible(0, 0, 0));
        assert_eq!(chunk.column_bounds(0, 0), (CHUNK_DIMENSION as u8, 0));
    }

    #[test]
    #[should_panic(expected = "allocated twice")]
    fn double_allocation_panics() {
        let mut chunk = allocated_chunk();
        chunk.allocate(Point3::new(0, 0, 0));
    }

    #[test]
    #[should_panic(expected = "deallocated twice")]
    fn double_deallocation_panics() {
        let mut chunk = allocated_chunk();
        chunk.deallocate();
        chunk.deallocate();
    }

    #[test]
    fn deallocate_then_allocate_is_allowed() {
        let mut chunk = allocated_chunk();
        chunk.deallocate();
        assert!(!chunk.is_allocated());
        chunk.allocate(Point3::new(1, 2, 3));
        assert_eq!(chunk.position(), Point3::new(1, 2, 3));
    }

    #[test]
    fn set_voxel_round_trips_and_dirties() {
        let mut chunk = allocated_chunk();
        chunk.clear_dirty();

        chunk.set_voxel(4, 9, 16, 3);
        assert!(chunk.is_dirty());
        assert_eq!(chunk.voxel(4, 9, 16).material, 3);
        assert!(chunk.is_visible(4, 9, 16));
    }

    #[test]
    fn sentinels_are_allocated_and_clean() {
        let empty = Chunk::sentinel_empty();
        assert!(empty.is_allocated());
        assert!(empty.is_sentinel());
        assert!(!empty.is_dirty());
        assert!(!empty.is_visible(0, 0, 0));

        let solid = Chunk::sentinel_solid();
        assert!(solid.is_sentinel());
        assert!(!solid.is_dirty());
        assert!(solid.is_visible(0, 0, 0));
        assert!(solid.is_visible(31, 31, 31));
        assert_eq!(solid.column_bounds(10, 10), (0, 31));
    }
}
