//! Pickable object set and ray picking

pub mod node;
pub mod picking;
pub mod set;

pub use node::{SceneNodeId, Voxel, GROUND_NODE};
pub use picking::{pick, Intersection};
pub use set::VoxelSet;
