//! Ray picking against the voxel set

use crate::core::types::Vec3;
use crate::math::{Aabb, Ray};

use super::node::{SceneNodeId, GROUND_NODE};
use super::set::VoxelSet;

/// Result of a successful ray cast: the struck object, the world-space
/// point, and the outward unit normal of the struck face.
#[derive(Clone, Copy, Debug)]
pub struct Intersection {
    pub node: SceneNodeId,
    pub point: Vec3,
    pub normal: Vec3,
}

/// Cast a ray against the ground plane and every placed voxel.
/// Returns the nearest hit, or None when the ray misses everything.
pub fn pick(ray: &Ray, set: &VoxelSet) -> Option<Intersection> {
    let mut best_t = f32::INFINITY;
    let mut best = None;

    // Ground plane at y = 0, struck from above only
    if ray.direction.y < 0.0 {
        let t = -ray.origin.y / ray.direction.y;
        if t >= 0.0 {
            let point = ray.at(t);
            let half = set.ground_half_extent();
            if point.x.abs() <= half && point.z.abs() <= half {
                best_t = t;
                best = Some(Intersection {
                    node: GROUND_NODE,
                    point,
                    normal: Vec3::Y,
                });
            }
        }
    }

    for voxel in set.voxels() {
        let aabb = voxel.aabb(set.cell_size());
        if let Some((t_near, _)) = ray.intersects_aabb(&aabb) {
            if t_near < best_t {
                let point = ray.at(t_near);
                best_t = t_near;
                best = Some(Intersection {
                    node: voxel.id,
                    point,
                    normal: entry_face_normal(&aabb, point),
                });
            }
        }
    }

    best
}

/// Outward unit normal of the box face containing `point`.
/// Picks the axis on which the point sits furthest out; on an exact edge
/// the x/y/z order breaks the tie.
fn entry_face_normal(aabb: &Aabb, point: Vec3) -> Vec3 {
    let local = (point - aabb.center()) / aabb.half_extent();
    let abs = local.abs();
    if abs.x >= abs.y && abs.x >= abs.z {
        Vec3::new(local.x.signum(), 0.0, 0.0)
    } else if abs.y >= abs.z {
        Vec3::new(0.0, local.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, local.z.signum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> VoxelSet {
        VoxelSet::new(50.0, 1000.0)
    }

    fn down_ray(x: f32, z: f32) -> Ray {
        Ray::new(Vec3::new(x, 500.0, z), -Vec3::Y)
    }

    #[test]
    fn test_ground_hit() {
        let set = set();
        let hit = pick(&down_ray(10.0, -30.0), &set).unwrap();
        assert_eq!(hit.node, GROUND_NODE);
        assert!((hit.point - Vec3::new(10.0, 0.0, -30.0)).length() < 0.001);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn test_ground_miss_outside_extent() {
        let set = set();
        assert!(pick(&down_ray(600.0, 0.0), &set).is_none());
    }

    #[test]
    fn test_ground_not_hit_from_below() {
        let set = set();
        let ray = Ray::new(Vec3::new(0.0, -100.0, 0.0), Vec3::Y);
        assert!(pick(&ray, &set).is_none());
    }

    #[test]
    fn test_voxel_occludes_ground() {
        let mut set = set();
        let id = set.add_voxel(Vec3::new(25.0, 25.0, 25.0));

        let hit = pick(&down_ray(25.0, 25.0), &set).unwrap();
        assert_eq!(hit.node, id);
        assert!((hit.point.y - 50.0).abs() < 0.001);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn test_side_face_normal() {
        let mut set = set();
        set.add_voxel(Vec3::new(25.0, 25.0, 25.0));

        let ray = Ray::new(Vec3::new(500.0, 25.0, 25.0), -Vec3::X);
        let hit = pick(&ray, &set).unwrap();
        assert_eq!(hit.normal, Vec3::X);
        assert!((hit.point.x - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_nearest_voxel_wins() {
        let mut set = set();
        let far = set.add_voxel(Vec3::new(25.0, 25.0, 225.0));
        let near = set.add_voxel(Vec3::new(25.0, 25.0, 25.0));

        let ray = Ray::new(Vec3::new(25.0, 25.0, -500.0), Vec3::Z);
        let hit = pick(&ray, &set).unwrap();
        assert_eq!(hit.node, near);
        assert_ne!(hit.node, far);
        assert_eq!(hit.normal, -Vec3::Z);
    }

    #[test]
    fn test_miss_everything() {
        let mut set = set();
        set.add_voxel(Vec3::new(25.0, 25.0, 25.0));

        // Pointing at the sky
        let ray = Ray::new(Vec3::new(0.0, 100.0, 0.0), Vec3::new(0.0, 0.707, 0.707));
        assert!(pick(&ray, &set).is_none());
    }
}
