//! Scene node handles

use crate::core::types::Vec3;
use crate::math::Aabb;

/// Unique identifier for a pickable scene object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SceneNodeId(pub u64);

/// The permanent ground plane. Always pickable, never removable.
pub const GROUND_NODE: SceneNodeId = SceneNodeId(0);

/// A placed voxel cube, centered on a grid cell.
#[derive(Clone, Copy, Debug)]
pub struct Voxel {
    pub id: SceneNodeId,
    /// Cell-centered world position
    pub center: Vec3,
}

impl Voxel {
    /// Bounding box for a voxel with the given cube edge length
    pub fn aabb(&self, cell_size: f32) -> Aabb {
        Aabb::from_center_half_extent(self.center, Vec3::splat(cell_size * 0.5))
    }
}
