//! # Altitude Map Maintenance
//!
//! This module keeps each column's `[min,max]` occupied-altitude bounds in
//! sync with voxel edits.
//!
//! ## Update Strategy
//!
//! Insertions are O(1): the bounds simply widen to include the new altitude.
//! Removals are lazy: the bounds are only re-scanned when the removed voxel
//! sat exactly on an extreme (or the column was already flagged empty), and
//! the scan walks from the removal point towards the nearest chunk face until
//! it finds a solid voxel. This is O(column height) in the worst case but
//! O(1) amortized for the insert/append-dominated edit patterns the engine
//! sees in practice, and it keeps the invariant that the bounds never exclude
//! a solid voxel even if they are loose after interior removals.

use super::{column_index, voxel_index, Chunk, ChunkStorage, CHUNK_DIMENSION};

impl Chunk {
    /// Widens column `(i,k)`'s bounds to include a voxel inserted at `j`.
    pub(super) fn on_voxel_added(storage: &mut ChunkStorage, i: usize, j: usize, k: usize) {
        let column = column_index(i, k);
        let j = j as u8;

        if j < storage.min_altitude[column] {
            storage.min_altitude[column] = j;
        }

        if j >= storage.max_altitude[column] {
            storage.max_altitude[column] = j;
        }
    }

    /// Re-tightens column `(i,k)`'s bounds after the voxel at `j` was cleared.
    pub(super) fn on_voxel_removed(storage: &mut ChunkStorage, i: usize, j: usize, k: usize) {
        Self::update_min_altitude(storage, i, j, k);
        Self::update_max_altitude(storage, i, j, k);
    }

    fn update_min_altitude(storage: &mut ChunkStorage, i: usize, j: usize, k: usize) {
        let column = column_index(i, k);
        let min = storage.min_altitude[column];

        // Bail unless we removed the lowest voxel (or the column was already
        // flagged empty).
        if min != j as u8 && min != CHUNK_DIMENSION as u8 {
            return;
        }

        // Search upwards from the removal point until we find a voxel.
        for altitude in j..CHUNK_DIMENSION {
            if storage.voxels[voxel_index(i, altitude, k)].is_visible() {
                storage.min_altitude[column] = altitude as u8;
                return;
            }
        }

        // No voxel was found above; the column is empty from here up.
        storage.min_altitude[column] = CHUNK_DIMENSION as u8;
    }

    fn update_max_altitude(storage: &mut ChunkStorage, i: usize, j: usize, k: usize) {
        let column = column_index(i, k);
        let max = storage.max_altitude[column];

        // Bail unless we removed the highest voxel (or the column was already
        // flagged empty).
        if max != j as u8 && max != 0 {
            return;
        }

        // Search downwards from the removal point until we find a voxel.
        // Altitude 0 needs no explicit check: the empty fallback is 0 anyway.
        for altitude in (1..=j).rev() {
            if storage.voxels[voxel_index(i, altitude, k)].is_visible() {
                storage.max_altitude[column] = altitude as u8;
                return;
            }
        }

        storage.max_altitude[column] = 0;
    }
}
