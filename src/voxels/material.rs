//! # Material Module
//!
//! This module enumerates the materials used by the demo world generators.
//! The meshing core itself never inspects material semantics; it only compares
//! raw material indices, so this enum exists purely for the generators and for
//! anything that wants readable names for the indices.

use num_derive::FromPrimitive;

use super::voxel::MaterialId;

/// The materials known to the demo world generators.
///
/// Each variant maps to the `MaterialId` with the same discriminant, which is
/// what actually gets stored per voxel. `FromPrimitive` allows converting a
/// stored byte back into the rich enum type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum Material {
    /// Empty space, never meshed.
    Air,

    /// Base rock used below the surface layers.
    Stone,

    /// Subsurface filler directly under the surface.
    Dirt,

    /// Surface material of the demo terrain.
    Grass,

    /// Surface material used at high altitudes.
    Snow,
}

impl Material {
    /// Converts a stored material index back to a `Material`.
    ///
    /// # Arguments
    /// * `id` - The material index as stored in a voxel
    ///
    /// # Returns
    /// The corresponding `Material`
    ///
    /// # Panics
    /// Panics if the index doesn't correspond to a known material.
    pub fn from_id(id: MaterialId) -> Self {
        let material_option = num::FromPrimitive::from_u8(id);
        material_option.unwrap()
    }

    /// Returns the material index stored in voxels for this material.
    pub fn id(self) -> MaterialId {
        self as MaterialId
    }

    /// Picks a random solid material (never `Air`).
    ///
    /// This is used by the sparse random world generator and by tests.
    pub fn random_solid() -> Self {
        num::FromPrimitive::from_u8(fastrand::u8(1..5)).unwrap()
    }
}
