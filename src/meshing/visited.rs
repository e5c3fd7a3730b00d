//! Visited-face tracking for the greedy mesher.
//!
//! While merging faces into quads, the mesher must never fold the same unit
//! face into two different quads. This module provides the scratch structure
//! recording which faces have been consumed during the current pass.
//!
//! ## Lazy Clearing
//!
//! The tracker holds six full-chunk `i32` grids, one per face direction.
//! Zeroing all six between passes would cost six `O(32³)` clears per meshed
//! chunk, so the tracker instead carries a generation stamp: a cell counts as
//! visited exactly when its stored value equals the current generation, and
//! recycling the tracker just increments the generation, invalidating every
//! stale stamp at once.

use crate::voxels::chunk::CHUNK_VOLUME;
use crate::voxels::FaceDirection;

use super::pool::Pooled;

/// Per-pass record of which unit faces have been merged into a quad.
pub struct FaceVisitedTracker {
    /// The stamp that marks a cell as visited this pass.
    generation: i32,

    /// One full-chunk grid per face direction, indexed by
    /// `FaceDirection as usize`.
    faces: [Box<[i32]>; 6],
}

impl FaceVisitedTracker {
    /// Creates a tracker with zeroed grids and generation 1, so nothing is
    /// visited initially.
    pub fn new() -> Self {
        FaceVisitedTracker {
            generation: 1,
            faces: std::array::from_fn(|_| vec![0i32; CHUNK_VOLUME].into_boxed_slice()),
        }
    }

    /// Returns the current generation stamp.
    pub fn generation(&self) -> i32 {
        self.generation
    }

    /// Checks whether the face at the given linear voxel index was already
    /// merged during this pass.
    #[inline]
    pub fn visited(&self, face: FaceDirection, access: usize) -> bool {
        self.faces[face as usize][access] == self.generation
    }

    /// Marks the face at the given linear voxel index as merged.
    #[inline]
    pub fn mark(&mut self, face: FaceDirection, access: usize) {
        self.faces[face as usize][access] = self.generation;
    }

    /// Starts a fresh pass by invalidating every stamp from previous passes.
    pub fn advance_generation(&mut self) {
        self.generation += 1;
    }
}

impl Default for FaceVisitedTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Pooled for FaceVisitedTracker {
    fn create() -> Self {
        Self::new()
    }

    fn reset(&mut self) {
        self.advance_generation();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_tracker_has_nothing_visited() {
        let tracker = FaceVisitedTracker::new();
        for face in FaceDirection::all() {
            assert!(!tracker.visited(face, 0));
            assert!(!tracker.visited(face, CHUNK_VOLUME - 1));
        }
    }

    #[test]
    fn mark_is_visible_only_for_the_marked_face() {
        let mut tracker = FaceVisitedTracker::new();
        tracker.mark(FaceDirection::XNeg, 100);

        assert!(tracker.visited(FaceDirection::XNeg, 100));
        assert!(!tracker.visited(FaceDirection::XPos, 100));
        assert!(!tracker.visited(FaceDirection::XNeg, 101));
    }

    #[test]
    fn advancing_the_generation_invalidates_old_marks() {
        let mut tracker = FaceVisitedTracker::new();
        tracker.mark(FaceDirection::YPos, 42);
        assert!(tracker.visited(FaceDirection::YPos, 42));

        tracker.advance_generation();
        assert!(!tracker.visited(FaceDirection::YPos, 42));

        // Marks made in the new pass work as usual.
        tracker.mark(FaceDirection::YPos, 42);
        assert!(tracker.visited(FaceDirection::YPos, 42));
    }
}
