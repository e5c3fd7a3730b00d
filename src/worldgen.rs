//! # World Generation Module
//!
//! Demo terrain generators used by the driver to populate a grid before
//! meshing it. None of this is consulted by the meshing core; the generators
//! just issue ordinary `add_voxel` edits.

use noise::{NoiseFn, Perlin};

use crate::voxels::{ChunkGrid, Material};

/// Threshold above which Perlin noise is considered solid.
pub const PERLIN_POSITIVE_THRESHOLD: f64 = 0.2;
/// Threshold below which Perlin noise is considered solid.
pub const PERLIN_NEGATIVE_THRESHOLD: f64 = -0.2;
/// Scaling factor applied to world coordinates when sampling Perlin noise.
pub const PERLIN_SCALE_FACTOR: f64 = 0.02;

/// Fraction of voxels left empty by the sparse random generator.
pub const RANDOM_SPARSENESS: f64 = 0.9;

/// Fills the grid with rolling sine-wave hills.
///
/// Each column gets a height from two overlapping sine waves and is filled
/// from the bottom up: grass on the surface, dirt just below it, stone
/// underneath, snow on high peaks.
pub fn hills(grid: &mut ChunkGrid) {
    let [size_x, size_y, size_z] = grid.map_size();

    for x in 0..size_x {
        for z in 0..size_z {
            let height = 1
                + (((x as f32 / 8.0).sin() + 1.0) * 4.0) as i32
                + (((z as f32 / 4.0).sin() + 1.0) * 4.0) as i32;
            let height = height.min(size_y);
            let surface = height - 1;

            for y in 0..height {
                let material = surface_material(y, surface);
                grid.add_voxel(x, y, z, material.id());
            }
        }
    }
}

/// Fills the grid with Perlin-noise terrain.
///
/// 3D noise is sampled per voxel and thresholded, producing natural-looking
/// shapes with caves and overhangs.
///
/// # Arguments
/// * `grid` - The grid to populate
/// * `seed` - Seed for the noise generator
pub fn perlin(grid: &mut ChunkGrid, seed: u32) {
    let perlin = Perlin::new(seed);
    let [size_x, size_y, size_z] = grid.map_size();

    for x in 0..size_x {
        for z in 0..size_z {
            for y in 0..size_y {
                let sample = perlin.get([
                    x as f64 * PERLIN_SCALE_FACTOR,
                    y as f64 * PERLIN_SCALE_FACTOR,
                    z as f64 * PERLIN_SCALE_FACTOR,
                ]);

                if !(PERLIN_NEGATIVE_THRESHOLD..=PERLIN_POSITIVE_THRESHOLD).contains(&sample) {
                    grid.add_voxel(x, y, z, surface_material(y, size_y / 2).id());
                }
            }
        }
    }
}

/// Fills the grid with sparse random voxels (for stress testing the mesher).
pub fn random(grid: &mut ChunkGrid) {
    let [size_x, size_y, size_z] = grid.map_size();

    for x in 0..size_x {
        for z in 0..size_z {
            for y in 0..size_y {
                if fastrand::f64() >= RANDOM_SPARSENESS {
                    grid.add_voxel(x, y, z, Material::random_solid().id());
                }
            }
        }
    }
}

/// Picks a material for altitude `y` in a column whose surface sits at
/// `surface`.
fn surface_material(y: i32, surface: i32) -> Material {
    if y == surface {
        if y > 12 {
            Material::Snow
        } else {
            Material::Grass
        }
    } else if y + 3 >= surface {
        Material::Dirt
    } else {
        Material::Stone
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::MeshSettings;

    #[test]
    fn hills_fill_every_column_from_the_bottom() {
        let mut grid = ChunkGrid::new([64, 64, 64], MeshSettings::default());
        hills(&mut grid);

        let [size_x, _, size_z] = grid.map_size();
        for x in 0..size_x {
            for z in 0..size_z {
                assert!(grid.voxel_at(x, 0, z).is_visible());
            }
        }
        assert!(!grid.allocated_positions().is_empty());
    }

    #[test]
    fn random_respects_the_volume_bounds() {
        let mut grid = ChunkGrid::new([32, 32, 32], MeshSettings::default());
        random(&mut grid);

        // Everything the generator placed is readable back in bounds.
        assert!(grid.voxel_at(-1, 0, 0).is_empty());
        assert!(grid.voxel_at(32, 0, 0).is_empty());
    }
}
