//! # Face Direction Module
//!
//! This module defines the six axis-aligned face directions of a voxel.
//! The mesher keeps one visited grid per direction and emits one quad batch
//! per direction, so the discriminant values double as array indices.

use cgmath::Vector3;

/// Represents the six possible face directions of a voxel.
///
/// Each variant is assigned a unique integer value used to index per-face
/// storage such as the visited-tracker grids.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum FaceDirection {
    /// The face pointing towards negative X.
    XNeg = 0,

    /// The face pointing towards positive X.
    XPos = 1,

    /// The face pointing towards negative Y (down).
    YNeg = 2,

    /// The face pointing towards positive Y (up).
    YPos = 3,

    /// The face pointing towards negative Z.
    ZNeg = 4,

    /// The face pointing towards positive Z.
    ZPos = 5,
}

impl FaceDirection {
    /// Returns an array containing all six face directions.
    ///
    /// This is useful for iterating over every face of a voxel.
    pub fn all() -> [FaceDirection; 6] {
        [
            FaceDirection::XNeg,
            FaceDirection::XPos,
            FaceDirection::YNeg,
            FaceDirection::YPos,
            FaceDirection::ZNeg,
            FaceDirection::ZPos,
        ]
    }

    /// Returns the outward unit normal of this face direction.
    pub fn normal(self) -> Vector3<f32> {
        match self {
            FaceDirection::XNeg => Vector3::new(-1.0, 0.0, 0.0),
            FaceDirection::XPos => Vector3::new(1.0, 0.0, 0.0),
            FaceDirection::YNeg => Vector3::new(0.0, -1.0, 0.0),
            FaceDirection::YPos => Vector3::new(0.0, 1.0, 0.0),
            FaceDirection::ZNeg => Vector3::new(0.0, 0.0, -1.0),
            FaceDirection::ZPos => Vector3::new(0.0, 0.0, 1.0),
        }
    }
}
