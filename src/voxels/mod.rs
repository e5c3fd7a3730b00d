//! # Voxels Module
//!
//! This module provides the voxel data model: single-byte voxels, the demo
//! material enum, fixed-size chunks with altitude maps, and the chunk grid
//! that owns the whole volume.

pub mod chunk;
pub mod face;
pub mod grid;
pub mod material;
pub mod voxel;

pub use chunk::{Chunk, CHUNK_DIMENSION, CHUNK_PLANE_SIZE, CHUNK_VOLUME};
pub use face::FaceDirection;
pub use grid::{ChunkGrid, MeshSettings};
pub use material::Material;
pub use voxel::{MaterialId, Voxel};
