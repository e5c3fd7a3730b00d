//! # Voxel Module
//!
//! This module defines the smallest unit of world data: a single voxel carrying
//! nothing but a material index. A material index of zero means the voxel is
//! empty; any non-zero value identifies an opaque material.

/// The underlying integer type used to represent materials in memory.
/// This is used for compact storage of voxel data (one byte per voxel).
pub type MaterialId = u8;

/// The material index reserved for empty voxels.
pub const EMPTY_MATERIAL: MaterialId = 0;

/// A single voxel in the world.
///
/// This is a lightweight structure that stores only the material index.
/// All other voxel properties (color, name, demo generation rules) are looked
/// up from the material.
///
/// # Memory Layout
/// The `#[repr(C)]` attribute and the `bytemuck` derives keep the voxel a
/// single plain byte, so a chunk's voxel array can be reinterpreted as raw
/// bytes when handed to external storage.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Voxel {
    /// The material of this voxel, `0` meaning empty.
    pub material: MaterialId,
}

impl Voxel {
    /// An empty voxel.
    pub const EMPTY: Voxel = Voxel {
        material: EMPTY_MATERIAL,
    };

    /// Creates a new voxel with the given material index.
    ///
    /// # Arguments
    /// * `material` - The material index, `0` for empty
    ///
    /// # Returns
    /// A new `Voxel` instance
    pub fn new(material: MaterialId) -> Self {
        Voxel { material }
    }

    /// Checks whether this voxel is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.material == EMPTY_MATERIAL
    }

    /// Checks whether this voxel contributes faces to a mesh.
    ///
    /// A voxel is visible exactly when it holds a non-empty material.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.material != EMPTY_MATERIAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_voxel_is_not_visible() {
        assert!(Voxel::EMPTY.is_empty());
        assert!(!Voxel::EMPTY.is_visible());
    }

    #[test]
    fn solid_voxel_is_visible() {
        let voxel = Voxel::new(7);
        assert!(!voxel.is_empty());
        assert!(voxel.is_visible());
        assert_eq!(voxel.material, 7);
    }

    #[test]
    fn voxel_is_a_single_byte() {
        assert_eq!(std::mem::size_of::<Voxel>(), 1);
    }
}
