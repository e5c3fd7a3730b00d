//! Greedy surface extraction for voxel chunks.
//!
//! This module implements the meshing core: for one dirty chunk it walks the
//! solid voxels (skipping empty altitude ranges via the per-column bounds),
//! decides face visibility against same-chunk and neighbor-chunk data, and
//! merges same-material, same-visibility faces into maximal axis-aligned
//! rectangles, emitting two triangles per rectangle.
//!
//! ## Merge Order
//!
//! Every face direction merges along two axes: a primary run is grown one
//! voxel at a time from the seed face, then whole runs are grown along the
//! secondary axis while the entire adjacent row still qualifies. The axis
//! pairing is face-specific: X and Z faces grow their primary run upwards
//! along Y, Y faces grow it along X; X and Y faces then extend along Z while
//! Z faces extend along X. The six face routines below are written out
//! independently because the pairing and the vertex winding differ per face.
//!
//! ## Visited Tracking
//!
//! Faces consumed by a merge are stamped in the `FaceVisitedTracker` so later
//! seeds skip them. Rows accepted on the secondary axis need no visited check
//! of their own: the primary pass only ever stamps the seed column/row, so
//! secondary rows are untouched when they are tested.

use cgmath::Point3;
use log::debug;
use web_time::Instant;

use crate::voxels::chunk::{voxel_index, CHUNK_DIMENSION};
use crate::voxels::grid::MeshSettings;
use crate::voxels::{Chunk, ChunkGrid, FaceDirection, MaterialId, Voxel};

use super::pool::Pool;
use super::scratch::ScratchVertexBuffer;
use super::upload::VertexSink;
use super::vertex::VoxelVertex;
use super::visited::FaceVisitedTracker;

/// References to the six chunks surrounding a meshed chunk.
///
/// Neighbors are resolved through the grid at the start of a pass and are
/// never absent: sentinel chunks stand in for anything beyond the grid or not
/// yet allocated.
pub struct ChunkNeighbors<'a> {
    /// Neighbor towards negative X.
    pub x_neg: &'a Chunk,
    /// Neighbor towards positive X.
    pub x_pos: &'a Chunk,
    /// Neighbor towards negative Y.
    pub y_neg: &'a Chunk,
    /// Neighbor towards positive Y.
    pub y_pos: &'a Chunk,
    /// Neighbor towards negative Z.
    pub z_neg: &'a Chunk,
    /// Neighbor towards positive Z.
    pub z_pos: &'a Chunk,
}

impl<'a> ChunkNeighbors<'a> {
    /// Resolves all six neighbors of the chunk at `position`.
    pub fn gather(grid: &'a ChunkGrid, position: Point3<usize>) -> Self {
        ChunkNeighbors {
            x_neg: grid.neighbor(position, FaceDirection::XNeg),
            x_pos: grid.neighbor(position, FaceDirection::XPos),
            y_neg: grid.neighbor(position, FaceDirection::YNeg),
            y_pos: grid.neighbor(position, FaceDirection::YPos),
            z_neg: grid.neighbor(position, FaceDirection::ZNeg),
            z_pos: grid.neighbor(position, FaceDirection::ZPos),
        }
    }
}

/// The meshing engine: owns the scratch-resource pools and runs mesh passes.
///
/// One `Mesher` serves the whole grid. A pass is synchronous and meshes one
/// chunk to completion; the pools support concurrent acquire/release should
/// multiple chunks ever be meshed in parallel. While a chunk is being meshed
/// its own and its neighbors' voxel data must not be mutated.
pub struct Mesher {
    visited_pool: Pool<FaceVisitedTracker>,
    scratch_pool: Pool<ScratchVertexBuffer>,
}

impl Mesher {
    /// Creates a mesher with empty resource pools.
    pub fn new() -> Self {
        Mesher {
            visited_pool: Pool::new(),
            scratch_pool: Pool::new(),
        }
    }

    /// Meshes one dirty chunk and hands the result to the sink.
    ///
    /// The chunk's dirty flag is cleared before walking so edits made while
    /// meshing re-dirty the chunk rather than being lost. The sink is invoked
    /// only when the pass produced vertices.
    ///
    /// # Arguments
    /// * `grid` - The grid owning the chunk and its neighbors
    /// * `position` - Chunk coordinates of the chunk to mesh
    /// * `sink` - Receives the finished vertices
    ///
    /// # Returns
    /// The number of vertices emitted by this pass.
    ///
    /// # Panics
    /// Panics if the chunk is unallocated, a sentinel, or not dirty; the
    /// caller is responsible for only requesting passes for dirty, real
    /// chunks.
    pub fn mesh_chunk(
        &self,
        grid: &mut ChunkGrid,
        position: Point3<usize>,
        sink: &mut dyn VertexSink,
    ) -> usize {
        {
            let chunk = grid.chunk_mut(position);
            assert!(chunk.is_allocated(), "meshing an unallocated chunk");
            assert!(!chunk.is_sentinel(), "meshing a sentinel chunk");
            assert!(chunk.is_dirty(), "meshing a chunk that is not dirty");
            chunk.clear_dirty();
        }

        let started = Instant::now();
        let settings = grid.settings();
        let chunk = grid.chunk(position);
        let neighbors = ChunkNeighbors::gather(grid, position);

        let mut visited = self.visited_pool.acquire();
        let mut scratch = self.scratch_pool.acquire();
        scratch.begin_pass();

        generate_mesh(chunk, &neighbors, settings, &mut visited, &mut scratch);

        let emitted = scratch.len();
        if emitted > 0 {
            sink.upload(position, scratch.vertices());
        }

        self.visited_pool.release(visited);
        self.scratch_pool.release(scratch);

        debug!(
            "meshed chunk ({}, {}, {}): {} vertices in {:?}",
            position.x,
            position.y,
            position.z,
            emitted,
            started.elapsed()
        );

        emitted
    }
}

impl Default for Mesher {
    fn default() -> Self {
        Self::new()
    }
}

/// Walks every occupied column of the chunk and seeds merges from each solid
/// voxel.
///
/// The per-column altitude bounds are what make this cheap for terrain-like
/// data: only `[min,max]` of each column is scanned instead of the full
/// column height.
fn generate_mesh(
    chunk: &Chunk,
    neighbors: &ChunkNeighbors,
    settings: MeshSettings,
    visited: &mut FaceVisitedTracker,
    scratch: &mut ScratchVertexBuffer,
) {
    for k in 0..CHUNK_DIMENSION {
        for i in 0..CHUNK_DIMENSION {
            let (min, max) = chunk.column_bounds(i, k);

            // An empty column reports (CHUNK_DIMENSION, 0) and scans nothing.
            for j in min as usize..=max as usize {
                if chunk.is_visible(i, j, k) {
                    create_runs(chunk, neighbors, settings, visited, scratch, i, j, k);
                }
            }
        }
    }
}

/// Seeds a greedy rectangle merge on every visible, not-yet-merged face of
/// the voxel at `(i,j,k)`.
///
/// Each face direction has its own block below: the primary/secondary merge
/// axes and the emitted winding are face-specific.
#[allow(clippy::too_many_arguments)]
fn create_runs(
    chunk: &Chunk,
    neighbors: &ChunkNeighbors,
    settings: MeshSettings,
    visited: &mut FaceVisitedTracker,
    scratch: &mut ScratchVertexBuffer,
    i: usize,
    j: usize,
    k: usize,
) {
    let voxels = chunk.voxels();
    let access = voxel_index(i, j, k);
    let material = voxels[access].material;

    // Left (X-): merge up along Y, then out along Z.
    if !visited.visited(FaceDirection::XNeg, access)
        && face_visible_x_neg(voxels, neighbors.x_neg, settings, i, j, k)
    {
        visited.mark(FaceDirection::XNeg, access);

        let mut end_a = j + 1;
        while end_a < CHUNK_DIMENSION {
            let run = voxel_index(i, end_a, k);
            if voxels[run].material != material
                || !face_visible_x_neg(voxels, neighbors.x_neg, settings, i, end_a, k)
                || visited.visited(FaceDirection::XNeg, run)
            {
                break;
            }
            visited.mark(FaceDirection::XNeg, run);
            end_a += 1;
        }
        let length_a = end_a - j;

        let mut length_b = 1;
        'rows: for g in k + 1..CHUNK_DIMENSION {
            for a in j..end_a {
                if voxels[voxel_index(i, a, g)].material != material
                    || !face_visible_x_neg(voxels, neighbors.x_neg, settings, i, a, g)
                {
                    break 'rows;
                }
            }

            for a in j..end_a {
                visited.mark(FaceDirection::XNeg, voxel_index(i, a, g));
            }
            length_b += 1;
        }

        emit_quad(
            scratch,
            FaceDirection::XNeg,
            i,
            j,
            k,
            length_a,
            length_b,
            material,
        );
    }

    // Right (X+): merge up along Y, then out along Z.
    if !visited.visited(FaceDirection::XPos, access)
        && face_visible_x_pos(voxels, neighbors.x_pos, settings, i, j, k)
    {
        visited.mark(FaceDirection::XPos, access);

        let mut end_a = j + 1;
        while end_a < CHUNK_DIMENSION {
            let run = voxel_index(i, end_a, k);
            if voxels[run].material != material
                || !face_visible_x_pos(voxels, neighbors.x_pos, settings, i, end_a, k)
                || visited.visited(FaceDirection::XPos, run)
            {
                break;
            }
            visited.mark(FaceDirection::XPos, run);
            end_a += 1;
        }
        let length_a = end_a - j;

        let mut length_b = 1;
        'rows: for g in k + 1..CHUNK_DIMENSION {
            for a in j..end_a {
                if voxels[voxel_index(i, a, g)].material != material
                    || !face_visible_x_pos(voxels, neighbors.x_pos, settings, i, a, g)
                {
                    break 'rows;
                }
            }

            for a in j..end_a {
                visited.mark(FaceDirection::XPos, voxel_index(i, a, g));
            }
            length_b += 1;
        }

        emit_quad(
            scratch,
            FaceDirection::XPos,
            i,
            j,
            k,
            length_a,
            length_b,
            material,
        );
    }

    // Back (Z-): merge up along Y, then out along X.
    if !visited.visited(FaceDirection::ZNeg, access)
        && face_visible_z_neg(voxels, neighbors.z_neg, settings, i, j, k)
    {
        visited.mark(FaceDirection::ZNeg, access);

        let mut end_a = j + 1;
        while end_a < CHUNK_DIMENSION {
            let run = voxel_index(i, end_a, k);
            if voxels[run].material != material
                || !face_visible_z_neg(voxels, neighbors.z_neg, settings, i, end_a, k)
                || visited.visited(FaceDirection::ZNeg, run)
            {
                break;
            }
            visited.mark(FaceDirection::ZNeg, run);
            end_a += 1;
        }
        let length_a = end_a - j;

        let mut length_b = 1;
        'rows: for g in i + 1..CHUNK_DIMENSION {
            for a in j..end_a {
                if voxels[voxel_index(g, a, k)].material != material
                    || !face_visible_z_neg(voxels, neighbors.z_neg, settings, g, a, k)
                {
                    break 'rows;
                }
            }

            for a in j..end_a {
                visited.mark(FaceDirection::ZNeg, voxel_index(g, a, k));
            }
            length_b += 1;
        }

        emit_quad(
            scratch,
            FaceDirection::ZNeg,
            i,
            j,
            k,
            length_a,
            length_b,
            material,
        );
    }

    // Front (Z+): merge up along Y, then out along X.
    if !visited.visited(FaceDirection::ZPos, access)
        && face_visible_z_pos(voxels, neighbors.z_pos, settings, i, j, k)
    {
        visited.mark(FaceDirection::ZPos, access);

        let mut end_a = j + 1;
        while end_a < CHUNK_DIMENSION {
            let run = voxel_index(i, end_a, k);
            if voxels[run].material != material
                || !face_visible_z_pos(voxels, neighbors.z_pos, settings, i, end_a, k)
                || visited.visited(FaceDirection::ZPos, run)
            {
                break;
            }
            visited.mark(FaceDirection::ZPos, run);
            end_a += 1;
        }
        let length_a = end_a - j;

        let mut length_b = 1;
        'rows: for g in i + 1..CHUNK_DIMENSION {
            for a in j..end_a {
                if voxels[voxel_index(g, a, k)].material != material
                    || !face_visible_z_pos(voxels, neighbors.z_pos, settings, g, a, k)
                {
                    break 'rows;
                }
            }

            for a in j..end_a {
                visited.mark(FaceDirection::ZPos, voxel_index(g, a, k));
            }
            length_b += 1;
        }

        emit_quad(
            scratch,
            FaceDirection::ZPos,
            i,
            j,
            k,
            length_a,
            length_b,
            material,
        );
    }

    // Bottom (Y-): merge out along X, then out along Z.
    if !visited.visited(FaceDirection::YNeg, access)
        && face_visible_y_neg(voxels, neighbors.y_neg, settings, i, j, k)
    {
        visited.mark(FaceDirection::YNeg, access);

        let mut end_a = i + 1;
        while end_a < CHUNK_DIMENSION {
            let run = voxel_index(end_a, j, k);
            if voxels[run].material != material
                || !face_visible_y_neg(voxels, neighbors.y_neg, settings, end_a, j, k)
                || visited.visited(FaceDirection::YNeg, run)
            {
                break;
            }
            visited.mark(FaceDirection::YNeg, run);
            end_a += 1;
        }
        let length_a = end_a - i;

        let mut length_b = 1;
        'rows: for g in k + 1..CHUNK_DIMENSION {
            for a in i..end_a {
                if voxels[voxel_index(a, j, g)].material != material
                    || !face_visible_y_neg(voxels, neighbors.y_neg, settings, a, j, g)
                {
                    break 'rows;
                }
            }

            for a in i..end_a {
                visited.mark(FaceDirection::YNeg, voxel_index(a, j, g));
            }
            length_b += 1;
        }

        emit_quad(
            scratch,
            FaceDirection::YNeg,
            i,
            j,
            k,
            length_a,
            length_b,
            material,
        );
    }

    // Top (Y+): merge out along X, then out along Z.
    if !visited.visited(FaceDirection::YPos, access)
        && face_visible_y_pos(voxels, neighbors.y_pos, settings, i, j, k)
    {
        visited.mark(FaceDirection::YPos, access);

        let mut end_a = i + 1;
        while end_a < CHUNK_DIMENSION {
            let run = voxel_index(end_a, j, k);
            if voxels[run].material != material
                || !face_visible_y_pos(voxels, neighbors.y_pos, settings, end_a, j, k)
                || visited.visited(FaceDirection::YPos, run)
            {
                break;
            }
            visited.mark(FaceDirection::YPos, run);
            end_a += 1;
        }
        let length_a = end_a - i;

        let mut length_b = 1;
        'rows: for g in k + 1..CHUNK_DIMENSION {
            for a in i..end_a {
                if voxels[voxel_index(a, j, g)].material != material
                    || !face_visible_y_pos(voxels, neighbors.y_pos, settings, a, j, g)
                {
                    break 'rows;
                }
            }

            for a in i..end_a {
                visited.mark(FaceDirection::YPos, voxel_index(a, j, g));
            }
            length_b += 1;
        }

        emit_quad(
            scratch,
            FaceDirection::YPos,
            i,
            j,
            k,
            length_a,
            length_b,
            material,
        );
    }
}

/// Checks whether the occluding voxel is empty.
#[inline]
fn draw_against(occluder: Voxel) -> bool {
    occluder.is_empty()
}

/// Visibility of the X- face of the voxel at `(i,j,k)`.
///
/// Interior faces test the voxel one step towards negative X; boundary faces
/// test the mirrored voxel on the neighbor's far face, unless seam meshing
/// forces them visible.
#[inline]
fn face_visible_x_neg(
    voxels: &[Voxel],
    neighbor: &Chunk,
    settings: MeshSettings,
    i: usize,
    j: usize,
    k: usize,
) -> bool {
    if i == 0 {
        if settings.mesh_between_chunks {
            return true;
        }
        return draw_against(neighbor.voxel(CHUNK_DIMENSION - 1, j, k));
    }

    draw_against(voxels[voxel_index(i - 1, j, k)])
}

/// Visibility of the X+ face of the voxel at `(i,j,k)`.
#[inline]
fn face_visible_x_pos(
    voxels: &[Voxel],
    neighbor: &Chunk,
    settings: MeshSettings,
    i: usize,
    j: usize,
    k: usize,
) -> bool {
    if i == CHUNK_DIMENSION - 1 {
        if settings.mesh_between_chunks {
            return true;
        }
        return draw_against(neighbor.voxel(0, j, k));
    }

    draw_against(voxels[voxel_index(i + 1, j, k)])
}

/// Visibility of the Y- face of the voxel at `(i,j,k)`.
#[inline]
fn face_visible_y_neg(
    voxels: &[Voxel],
    neighbor: &Chunk,
    settings: MeshSettings,
    i: usize,
    j: usize,
    k: usize,
) -> bool {
    if j == 0 {
        if settings.mesh_between_chunks {
            return true;
        }
        return draw_against(neighbor.voxel(i, CHUNK_DIMENSION - 1, k));
    }

    draw_against(voxels[voxel_index(i, j - 1, k)])
}

/// Visibility of the Y+ face of the voxel at `(i,j,k)`.
#[inline]
fn face_visible_y_pos(
    voxels: &[Voxel],
    neighbor: &Chunk,
    settings: MeshSettings,
    i: usize,
    j: usize,
    k: usize,
) -> bool {
    if j == CHUNK_DIMENSION - 1 {
        if settings.mesh_between_chunks {
            return true;
        }
        return draw_against(neighbor.voxel(i, 0, k));
    }

    draw_against(voxels[voxel_index(i, j + 1, k)])
}

/// Visibility of the Z- face of the voxel at `(i,j,k)`.
#[inline]
fn face_visible_z_neg(
    voxels: &[Voxel],
    neighbor: &Chunk,
    settings: MeshSettings,
    i: usize,
    j: usize,
    k: usize,
) -> bool {
    if k == 0 {
        if settings.mesh_between_chunks {
            return true;
        }
        return draw_against(neighbor.voxel(i, j, CHUNK_DIMENSION - 1));
    }

    draw_against(voxels[voxel_index(i, j, k - 1)])
}

/// Visibility of the Z+ face of the voxel at `(i,j,k)`.
#[inline]
fn face_visible_z_pos(
    voxels: &[Voxel],
    neighbor: &Chunk,
    settings: MeshSettings,
    i: usize,
    j: usize,
    k: usize,
) -> bool {
    if k == CHUNK_DIMENSION - 1 {
        if settings.mesh_between_chunks {
            return true;
        }
        return draw_against(neighbor.voxel(i, j, 0));
    }

    draw_against(voxels[voxel_index(i, j, k + 1)])
}

/// Emits the two triangles covering a merged `length_a x length_b` rectangle
/// seeded at `(i,j,k)`.
///
/// The winding and the mapping of the two merge lengths onto world axes are
/// face-specific: X and Z faces grew `length_a` along Y, Y faces grew it
/// along X; X and Y faces grew `length_b` along Z, Z faces grew it along X.
/// The barycentric corner pattern gives wireframe shaders a stable edge
/// coordinate per triangle.
#[allow(clippy::too_many_arguments)]
fn emit_quad(
    scratch: &mut ScratchVertexBuffer,
    face: FaceDirection,
    i: usize,
    j: usize,
    k: usize,
    length_a: usize,
    length_b: usize,
    material: MaterialId,
) {
    let x = i as f32;
    let y = j as f32;
    let z = k as f32;
    let a = length_a as f32;
    let b = length_b as f32;
    let normal = face.normal();

    let mut vertex = |px: f32, py: f32, pz: f32, bary_u: f32, bary_v: f32| {
        scratch.push(VoxelVertex::new(
            Point3::new(px, py, pz),
            normal,
            bary_u,
            bary_v,
            material,
        ));
    };

    match face {
        FaceDirection::XNeg => {
            vertex(x, y, z, 0.0, 0.0);
            vertex(x, y, z + b, 0.0, 1.0);
            vertex(x, y + a, z, 1.0, 0.0);

            vertex(x, y + a, z, 0.0, 0.0);
            vertex(x, y, z + b, 0.0, 1.0);
            vertex(x, y + a, z + b, 1.0, 0.0);
        }
        FaceDirection::XPos => {
            vertex(x + 1.0, y, z, 0.0, 0.0);
            vertex(x + 1.0, y + a, z, 0.0, 1.0);
            vertex(x + 1.0, y, z + b, 1.0, 0.0);

            vertex(x + 1.0, y, z + b, 0.0, 0.0);
            vertex(x + 1.0, y + a, z, 0.0, 1.0);
            vertex(x + 1.0, y + a, z + b, 1.0, 0.0);
        }
        FaceDirection::ZNeg => {
            vertex(x, y, z, 0.0, 0.0);
            vertex(x, y + a, z, 0.0, 1.0);
            vertex(x + b, y, z, 1.0, 0.0);

            vertex(x + b, y, z, 0.0, 0.0);
            vertex(x, y + a, z, 0.0, 1.0);
            vertex(x + b, y + a, z, 1.0, 0.0);
        }
        FaceDirection::ZPos => {
            vertex(x, y, z + 1.0, 0.0, 0.0);
            vertex(x + b, y, z + 1.0, 0.0, 1.0);
            vertex(x, y + a, z + 1.0, 1.0, 0.0);

            vertex(x, y + a, z + 1.0, 0.0, 0.0);
            vertex(x + b, y, z + 1.0, 0.0, 1.0);
            vertex(x + b, y + a, z + 1.0, 1.0, 0.0);
        }
        FaceDirection::YNeg => {
            vertex(x, y, z, 0.0, 0.0);
            vertex(x + a, y, z, 0.0, 1.0);
            vertex(x, y, z + b, 1.0, 0.0);

            vertex(x, y, z + b, 0.0, 0.0);
            vertex(x + a, y, z, 0.0, 1.0);
            vertex(x + a, y, z + b, 1.0, 0.0);
        }
        FaceDirection::YPos => {
            vertex(x, y + 1.0, z, 0.0, 0.0);
            vertex(x, y + 1.0, z + b, 0.0, 1.0);
            vertex(x + a, y + 1.0, z, 1.0, 0.0);

            vertex(x + a, y + 1.0, z, 0.0, 0.0);
            vertex(x, y + 1.0, z + b, 0.0, 1.0);
            vertex(x + a, y + 1.0, z + b, 1.0, 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meshing::upload::{CollectingSink, MeshStatistics};
    use crate::voxels::MeshSettings;

    fn mesh_at(grid: &mut ChunkGrid, position: Point3<usize>) -> CollectingSink {
        let mesher = Mesher::new();
        let mut sink = CollectingSink::default();
        mesher.mesh_chunk(grid, position, &mut sink);
        sink
    }

    fn quads_with_normal(vertices: &[VoxelVertex], normal: [f32; 3]) -> usize {
        vertices.iter().filter(|v| v.normal == normal).count() / 6
    }

    #[test]
    fn empty_chunk_produces_no_quads() {
        let mut grid = ChunkGrid::new([32, 32, 32], MeshSettings::default());

        // Allocate the chunk by writing a voxel, then remove it again.
        grid.add_voxel(4, 4, 4, 1);
        grid.add_voxel(4, 4, 4, 0);

        let sink = mesh_at(&mut grid, Point3::new(0, 0, 0));
        assert!(sink.batches.is_empty());
    }

    #[test]
    fn isolated_voxel_produces_six_unit_quads() {
        let mut grid = ChunkGrid::new([32, 32, 32], MeshSettings::default());
        grid.add_voxel(8, 9, 10, 5);

        let sink = mesh_at(&mut grid, Point3::new(0, 0, 0));
        let vertices = sink.all_vertices();
        assert_eq!(vertices.len(), 36);

        for face in FaceDirection::all() {
            let n = face.normal();
            assert_eq!(quads_with_normal(&vertices, [n.x, n.y, n.z]), 1);
        }

        // Every quad is a unit square anchored at the voxel.
        for vertex in &vertices {
            assert!(vertex.position[0] == 8.0 || vertex.position[0] == 9.0);
            assert!(vertex.position[1] == 9.0 || vertex.position[1] == 10.0);
            assert!(vertex.position[2] == 10.0 || vertex.position[2] == 11.0);
            assert_eq!(vertex.material, 5);
        }
    }

    #[test]
    fn slab_meshes_to_six_quads_with_open_exterior() {
        let mut grid = ChunkGrid::new([32, 32, 32], MeshSettings::default());
        for x in 0..32 {
            for z in 0..32 {
                grid.add_voxel(x, 0, z, 1);
            }
        }

        let sink = mesh_at(&mut grid, Point3::new(0, 0, 0));
        let vertices = sink.all_vertices();

        // Full-size top and bottom quads plus one quad per perimeter side.
        assert_eq!(vertices.len(), 6 * 6);
        assert_eq!(quads_with_normal(&vertices, [0.0, 1.0, 0.0]), 1);
        assert_eq!(quads_with_normal(&vertices, [0.0, -1.0, 0.0]), 1);

        // The top quad spans the whole slab.
        let top_xs: Vec<f32> = vertices
            .iter()
            .filter(|v| v.normal == [0.0, 1.0, 0.0])
            .map(|v| v.position[0])
            .collect();
        assert!(top_xs.contains(&0.0) && top_xs.contains(&32.0));
    }

    #[test]
    fn sealed_exterior_leaves_only_the_top_of_a_slab() {
        let mut grid = ChunkGrid::new(
            [32, 32, 32],
            MeshSettings {
                mesh_exterior: false,
                ..MeshSettings::default()
            },
        );
        for x in 0..32 {
            for z in 0..32 {
                grid.add_voxel(x, 0, z, 1);
            }
        }

        let sink = mesh_at(&mut grid, Point3::new(0, 0, 0));
        let vertices = sink.all_vertices();

        // Bottom and sides are sealed by the solid boundary sentinel.
        assert_eq!(vertices.len(), 6);
        assert_eq!(quads_with_normal(&vertices, [0.0, 1.0, 0.0]), 1);
    }

    #[test]
    #[should_panic(expected = "not dirty")]
    fn meshing_a_clean_chunk_panics() {
        let mut grid = ChunkGrid::new([32, 32, 32], MeshSettings::default());
        grid.add_voxel(0, 0, 0, 1);

        let mesher = Mesher::new();
        let mut sink = MeshStatistics::default();
        mesher.mesh_chunk(&mut grid, Point3::new(0, 0, 0), &mut sink);
        mesher.mesh_chunk(&mut grid, Point3::new(0, 0, 0), &mut sink);
    }

    #[test]
    fn shared_chunk_boundary_face_is_occluded() {
        let mut grid = ChunkGrid::new([64, 32, 32], MeshSettings::default());
        grid.add_voxel(31, 0, 0, 1);
        grid.add_voxel(32, 0, 0, 1);

        let mesher = Mesher::new();
        let mut sink = MeshStatistics::default();
        mesher.mesh_chunk(&mut grid, Point3::new(0, 0, 0), &mut sink);
        mesher.mesh_chunk(&mut grid, Point3::new(1, 0, 0), &mut sink);

        // Five faces per voxel; the shared face is hidden from both sides.
        assert_eq!(sink.vertices, 2 * 5 * 6);
    }

    #[test]
    fn seam_meshing_draws_both_sides_of_a_shared_face() {
        let mut grid = ChunkGrid::new(
            [64, 32, 32],
            MeshSettings {
                mesh_between_chunks: true,
                ..MeshSettings::default()
            },
        );
        grid.add_voxel(31, 0, 0, 1);
        grid.add_voxel(32, 0, 0, 1);

        let mesher = Mesher::new();
        let mut sink = MeshStatistics::default();
        mesher.mesh_chunk(&mut grid, Point3::new(0, 0, 0), &mut sink);
        mesher.mesh_chunk(&mut grid, Point3::new(1, 0, 0), &mut sink);

        // Every boundary face is forced visible, occluded or not.
        assert_eq!(sink.vertices, 2 * 6 * 6);
    }

    #[test]
    fn editing_a_voxel_redirties_only_its_own_chunk() {
        let mut grid = ChunkGrid::new([64, 32, 32], MeshSettings::default());
        grid.add_voxel(0, 0, 0, 1);
        grid.add_voxel(63, 0, 0, 1);

        let mesher = Mesher::new();
        let mut sink = MeshStatistics::default();
        mesher.mesh_chunk(&mut grid, Point3::new(0, 0, 0), &mut sink);
        mesher.mesh_chunk(&mut grid, Point3::new(1, 0, 0), &mut sink);
        assert!(!grid.chunk(Point3::new(0, 0, 0)).is_dirty());
        assert!(!grid.chunk(Point3::new(1, 0, 0)).is_dirty());

        grid.add_voxel(1, 0, 0, 2);
        assert!(grid.chunk(Point3::new(0, 0, 0)).is_dirty());
        assert!(!grid.chunk(Point3::new(1, 0, 0)).is_dirty());
    }

    #[test]
    fn same_material_run_merges_into_a_single_quad() {
        let mut grid = ChunkGrid::new([32, 32, 32], MeshSettings::default());
        for x in 4..7 {
            grid.add_voxel(x, 3, 9, 2);
        }

        let sink = mesh_at(&mut grid, Point3::new(0, 0, 0));
        let vertices = sink.all_vertices();

        // One merged top quad spanning x in [4,7].
        assert_eq!(quads_with_normal(&vertices, [0.0, 1.0, 0.0]), 1);
        let top_xs: Vec<f32> = vertices
            .iter()
            .filter(|v| v.normal == [0.0, 1.0, 0.0])
            .map(|v| v.position[0])
            .collect();
        assert!(top_xs.contains(&4.0) && top_xs.contains(&7.0));

        // Ends contribute one X-facing quad each, nothing in between.
        assert_eq!(quads_with_normal(&vertices, [-1.0, 0.0, 0.0]), 1);
        assert_eq!(quads_with_normal(&vertices, [1.0, 0.0, 0.0]), 1);
    }

    #[test]
    fn different_materials_do_not_merge() {
        let mut grid = ChunkGrid::new([32, 32, 32], MeshSettings::default());
        grid.add_voxel(10, 5, 10, 1);
        grid.add_voxel(11, 5, 10, 2);

        let sink = mesh_at(&mut grid, Point3::new(0, 0, 0));
        let vertices = sink.all_vertices();

        assert_eq!(quads_with_normal(&vertices, [0.0, 1.0, 0.0]), 2);
        assert_eq!(quads_with_normal(&vertices, [0.0, -1.0, 0.0]), 2);
    }

    #[test]
    fn remeshing_after_an_edit_reuses_pooled_resources() {
        let mut grid = ChunkGrid::new([32, 32, 32], MeshSettings::default());
        grid.add_voxel(8, 8, 8, 1);

        let mesher = Mesher::new();
        let mut sink = MeshStatistics::default();
        let first = mesher.mesh_chunk(&mut grid, Point3::new(0, 0, 0), &mut sink);
        assert_eq!(mesher.visited_pool.idle_count(), 1);
        assert_eq!(mesher.scratch_pool.idle_count(), 1);

        // The second pass runs on the recycled tracker and scratch buffer.
        grid.add_voxel(8, 8, 8, 2);
        let second = mesher.mesh_chunk(&mut grid, Point3::new(0, 0, 0), &mut sink);
        assert_eq!(first, second);
        assert_eq!(first, 36);
    }

    #[test]
    fn tall_column_merges_side_faces_vertically() {
        let mut grid = ChunkGrid::new([32, 32, 32], MeshSettings::default());
        for y in 2..7 {
            grid.add_voxel(15, y, 15, 3);
        }

        let sink = mesh_at(&mut grid, Point3::new(0, 0, 0));
        let vertices = sink.all_vertices();

        // Four side quads (each merged over the full height) plus top and
        // bottom.
        assert_eq!(vertices.len(), 36);
        let side_ys: Vec<f32> = vertices
            .iter()
            .filter(|v| v.normal == [-1.0, 0.0, 0.0])
            .map(|v| v.position[1])
            .collect();
        assert!(side_ys.contains(&2.0) && side_ys.contains(&7.0));
    }
}
