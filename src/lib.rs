#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Mesher
//!
//! A greedy surface-extraction meshing engine for dense voxel volumes.
//!
//! The crate turns chunked voxel data into a minimal triangle mesh,
//! recomputing only the chunks whose contents changed. Everything GPU-facing
//! stays outside: the core hands finished vertex lists to a [`meshing::VertexSink`]
//! and knows nothing about buffers, shaders, or draw calls.
//!
//! ## Key Modules
//!
//! * `voxels` - Voxel storage: chunks with per-column altitude maps, and the
//!   grid owning the whole volume with its sentinel boundary chunks
//! * `meshing` - The greedy mesher, its recycled scratch resources, and the
//!   upload-sink boundary
//! * `worldgen` - Demo terrain generators for the driver
//! * `config` - Runtime configuration of the demo driver
//!
//! ## Architecture
//!
//! Editing a voxel through [`voxels::ChunkGrid::add_voxel`] allocates the
//! owning chunk on demand, updates that column's altitude bounds, and marks
//! the chunk dirty. A [`meshing::Mesher`] pass then walks the dirty chunk's
//! occupied altitude ranges, resolves face visibility against same-chunk and
//! neighbor-chunk voxels (sentinel chunks stand in at the volume boundary),
//! and merges same-material faces into maximal rectangles before emitting
//! two triangles per rectangle.
//!
//! ## Performance Considerations
//!
//! * Per-column `[min,max]` altitude bounds skip empty voxel ranges entirely
//! * Visited tracking uses a generation stamp instead of clearing six
//!   full-chunk grids per pass
//! * Trackers and vertex scratch buffers are pooled across passes with a
//!   bounded idle list and unbounded burst capacity

use std::path::Path;

use log::{error, info};
use web_time::Instant;

pub mod config;
pub mod meshing;
pub mod voxels;
pub mod worldgen;

use config::{GeneratorKind, GridConfig};
use meshing::{MeshStatistics, Mesher};
use voxels::ChunkGrid;

/// Builds the demo world and meshes every chunk, logging statistics.
///
/// An optional command-line argument names a JSON configuration file (see
/// [`config::GridConfig`]); without one the default hills world is used. A
/// configuration that fails to load is reported and replaced by the default.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => match GridConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load configuration from {path}: {e}");
                GridConfig::default()
            }
        },
        None => GridConfig::default(),
    };

    info!(
        "Building a {}x{}x{} world with the {:?} generator",
        config.map_size[0], config.map_size[1], config.map_size[2], config.generator
    );

    let build_start = Instant::now();
    let mut grid = ChunkGrid::new(config.map_size, config.mesh_settings());
    match config.generator {
        GeneratorKind::Hills => worldgen::hills(&mut grid),
        GeneratorKind::Perlin => worldgen::perlin(&mut grid, config.seed),
        GeneratorKind::Random => worldgen::random(&mut grid),
    }
    info!("World built in {:?}", build_start.elapsed());

    let mesher = Mesher::new();
    let mut statistics = MeshStatistics::default();
    let mesh_start = Instant::now();
    let mut meshed_chunks = 0usize;

    for position in grid.allocated_positions() {
        if grid.chunk(position).is_dirty() {
            mesher.mesh_chunk(&mut grid, position, &mut statistics);
            meshed_chunks += 1;
        }
    }

    info!(
        "Meshed {} chunks in {:?}: {} vertices, {} triangles across {} uploads",
        meshed_chunks,
        mesh_start.elapsed(),
        statistics.vertices,
        statistics.triangles(),
        statistics.uploads
    );
}
