//! The upload boundary between the mesher and its GPU-owning collaborator.
//!
//! The core knows nothing about buffer objects, shaders, or draw calls; when
//! a mesh pass produces vertices it hands the finished slice to a
//! `VertexSink` and moves on. Two sinks ship with the crate: a statistics
//! sink for the demo driver and a collecting sink that retains the geometry
//! for CPU-side consumers and tests.

use cgmath::Point3;

use super::vertex::VoxelVertex;

/// Receives the finished vertices of one chunk's mesh pass.
///
/// The sink is invoked only when a pass produced at least one vertex, always
/// with whole quads (a multiple of six vertices). Positions are chunk-local;
/// `chunk_position` locates the chunk so the collaborator can offset them
/// into world space.
pub trait VertexSink {
    /// Uploads one chunk's freshly meshed vertices.
    ///
    /// # Arguments
    /// * `chunk_position` - The chunk's coordinates in the grid
    /// * `vertices` - The complete vertex list of the pass
    fn upload(&mut self, chunk_position: Point3<usize>, vertices: &[VoxelVertex]);
}

/// A sink that only counts what flows through it.
#[derive(Debug, Default)]
pub struct MeshStatistics {
    /// Number of uploads received (one per non-empty mesh pass).
    pub uploads: usize,
    /// Total vertices received across all uploads.
    pub vertices: usize,
}

impl MeshStatistics {
    /// Returns the number of triangles received across all uploads.
    pub fn triangles(&self) -> usize {
        self.vertices / 3
    }

    /// Returns the number of quads received across all uploads.
    pub fn quads(&self) -> usize {
        self.vertices / 6
    }
}

impl VertexSink for MeshStatistics {
    fn upload(&mut self, _chunk_position: Point3<usize>, vertices: &[VoxelVertex]) {
        self.uploads += 1;
        self.vertices += vertices.len();
    }
}

/// A sink that retains every uploaded batch.
#[derive(Debug, Default)]
pub struct CollectingSink {
    /// One entry per upload: the chunk position and its vertices.
    pub batches: Vec<(Point3<usize>, Vec<VoxelVertex>)>,
}

impl CollectingSink {
    /// Returns all collected vertices across every batch.
    pub fn all_vertices(&self) -> Vec<VoxelVertex> {
        self.batches
            .iter()
            .flat_map(|(_, vertices)| vertices.iter().copied())
            .collect()
    }
}

impl VertexSink for CollectingSink {
    fn upload(&mut self, chunk_position: Point3<usize>, vertices: &[VoxelVertex]) {
        self.batches.push((chunk_position, vertices.to_vec()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    fn quad() -> Vec<VoxelVertex> {
        (0..6)
            .map(|_| {
                VoxelVertex::new(
                    Point3::new(0.0, 0.0, 0.0),
                    Vector3::new(1.0, 0.0, 0.0),
                    0.0,
                    0.0,
                    1,
                )
            })
            .collect()
    }

    #[test]
    fn statistics_sink_counts_uploads_and_vertices() {
        let mut sink = MeshStatistics::default();
        sink.upload(Point3::new(0, 0, 0), &quad());
        sink.upload(Point3::new(1, 0, 0), &quad());

        assert_eq!(sink.uploads, 2);
        assert_eq!(sink.vertices, 12);
        assert_eq!(sink.quads(), 2);
        assert_eq!(sink.triangles(), 4);
    }

    #[test]
    fn collecting_sink_retains_batches() {
        let mut sink = CollectingSink::default();
        sink.upload(Point3::new(2, 0, 1), &quad());

        assert_eq!(sink.batches.len(), 1);
        assert_eq!(sink.batches[0].0, Point3::new(2, 0, 1));
        assert_eq!(sink.all_vertices().len(), 6);
    }
}
