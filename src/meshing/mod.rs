//! # Meshing Module
//!
//! This module contains everything between a dirty chunk and a vertex list:
//! the greedy mesher itself, the visited-face tracker and vertex scratch
//! buffer it works with, the pools recycling those across passes, and the
//! upload-sink boundary to the GPU-owning collaborator.

pub mod mesher;
pub mod pool;
pub mod scratch;
pub mod upload;
pub mod vertex;
pub mod visited;

pub use mesher::{ChunkNeighbors, Mesher};
pub use pool::{Pool, Pooled, BURST_THRESHOLD};
pub use scratch::{ScratchVertexBuffer, MAX_SCRATCH_VERTICES};
pub use upload::{CollectingSink, MeshStatistics, VertexSink};
pub use vertex::VoxelVertex;
pub use visited::FaceVisitedTracker;
