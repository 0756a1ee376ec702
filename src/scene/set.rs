//! The set of placed voxels plus the permanent ground plane

use crate::core::types::Vec3;

use super::node::{SceneNodeId, Voxel, GROUND_NODE};

/// Insertion-ordered set of placed voxels, plus the ground plane.
///
/// The ground plane is structural: it has a fixed id, is always pickable,
/// and never appears in the removable voxel list. Every mutation bumps a
/// revision counter; the renderer polls it to rebuild GPU instance data,
/// so the counter doubles as the add/remove notification.
pub struct VoxelSet {
    voxels: Vec<Voxel>,
    next_id: u64,
    revision: u64,
    cell_size: f32,
    /// Half the edge length of the square ground plane
    ground_half_extent: f32,
}

impl VoxelSet {
    /// Create an empty set with the given cell size and ground extent
    pub fn new(cell_size: f32, ground_extent: f32) -> Self {
        Self {
            voxels: Vec::new(),
            next_id: GROUND_NODE.0 + 1,
            revision: 0,
            cell_size,
            ground_half_extent: ground_extent * 0.5,
        }
    }

    /// Cube edge length of a placed voxel
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Half the edge length of the ground plane
    pub fn ground_half_extent(&self) -> f32 {
        self.ground_half_extent
    }

    /// Revision counter, bumped by every add and remove
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of placed voxels (the ground plane is not counted)
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// Whether no voxels have been placed
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Placed voxels in insertion order
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// Look up a placed voxel by id
    pub fn get(&self, id: SceneNodeId) -> Option<&Voxel> {
        self.voxels.iter().find(|v| v.id == id)
    }

    /// Append a voxel at a cell-centered position. Returns its handle.
    pub fn add_voxel(&mut self, center: Vec3) -> SceneNodeId {
        let id = SceneNodeId(self.next_id);
        self.next_id += 1;
        self.voxels.push(Voxel { id, center });
        self.revision += 1;
        id
    }

    /// Remove a placed voxel. Returns true if it was present.
    ///
    /// The ground plane is not in the voxel list, so passing its id is a
    /// no-op that leaves the revision untouched.
    pub fn remove(&mut self, id: SceneNodeId) -> bool {
        let before = self.voxels.len();
        self.voxels.retain(|v| v.id != id);
        if self.voxels.len() != before {
            self.revision += 1;
            true
        } else {
            false
        }
    }
}
