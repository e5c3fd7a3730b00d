//! # Configuration Module
//!
//! Runtime configuration for the demo driver: the world extents, the two
//! meshing-behavior flags, and which demo generator to run. A configuration
//! file is plain JSON with every field optional:
//!
//! ```json
//! {
//!     "map_size": [128, 64, 128],
//!     "mesh_exterior": true,
//!     "mesh_between_chunks": false,
//!     "generator": "perlin",
//!     "seed": 7
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::voxels::MeshSettings;

/// Which demo generator populates the world before meshing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    /// Rolling sine-wave hills.
    Hills,
    /// 3D Perlin-noise terrain.
    Perlin,
    /// Sparse random voxels.
    Random,
}

/// The externally configured parameters of a run.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// World extents in voxels; each axis must be a multiple of the chunk
    /// dimension.
    pub map_size: [usize; 3],

    /// Whether the outermost faces of the volume are drawn.
    pub mesh_exterior: bool,

    /// Debug mode drawing every inter-chunk boundary face.
    pub mesh_between_chunks: bool,

    /// The demo generator to run.
    pub generator: GeneratorKind,

    /// Seed for the Perlin generator.
    pub seed: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            map_size: [64, 64, 64],
            mesh_exterior: true,
            mesh_between_chunks: false,
            generator: GeneratorKind::Hills,
            seed: 0,
        }
    }
}

impl GridConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// # Arguments
    /// * `path` - Path to the JSON configuration file
    ///
    /// # Returns
    /// The parsed configuration, or the underlying I/O or parse error.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Returns the meshing-behavior flags of this configuration.
    pub fn mesh_settings(&self) -> MeshSettings {
        MeshSettings {
            mesh_exterior: self.mesh_exterior,
            mesh_between_chunks: self.mesh_between_chunks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_the_demo_world() {
        let config = GridConfig::default();
        assert_eq!(config.map_size, [64, 64, 64]);
        assert!(config.mesh_exterior);
        assert!(!config.mesh_between_chunks);
        assert_eq!(config.generator, GeneratorKind::Hills);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: GridConfig =
            serde_json::from_str(r#"{ "generator": "perlin", "seed": 3 }"#).unwrap();

        assert_eq!(config.generator, GeneratorKind::Perlin);
        assert_eq!(config.seed, 3);
        assert_eq!(config.map_size, [64, 64, 64]);
    }

    #[test]
    fn full_json_round_trips() {
        let config: GridConfig = serde_json::from_str(
            r#"{
                "map_size": [128, 64, 128],
                "mesh_exterior": false,
                "mesh_between_chunks": true,
                "generator": "random",
                "seed": 42
            }"#,
        )
        .unwrap();

        assert_eq!(config.map_size, [128, 64, 128]);
        assert!(!config.mesh_settings().mesh_exterior);
        assert!(config.mesh_settings().mesh_between_chunks);
        assert_eq!(config.generator, GeneratorKind::Random);
    }
}
