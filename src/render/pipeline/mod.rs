//! Render pipelines

pub mod grid;
pub mod voxels;

pub use grid::GridPipeline;
pub use voxels::{CubeInstance, VoxelPipeline};
