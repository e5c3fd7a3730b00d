//! # Voxel Mesher Entry Point
//!
//! This is the entry point for the demo driver. It simply calls into the
//! library's `run()` function, which builds the configured world and meshes
//! every chunk.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release [config.json]
//! ```

fn main() {
    voxel_mesher::run();
}
