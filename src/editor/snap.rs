//! Pointer-to-grid snapping

use crate::core::types::Vec3;

/// Snap an intersection point to the center of a grid cell.
///
/// Steps one unit outward along `normal` first, so a placement against an
/// existing face lands in the cell adjacent to it rather than inside the
/// struck object. With a zero normal this snaps `point` itself.
pub fn snap_to_cell(point: Vec3, normal: Vec3, cell_size: f32) -> Vec3 {
    let target = point + normal;
    Vec3::new(
        snap_axis(target.x, cell_size),
        snap_axis(target.y, cell_size),
        snap_axis(target.z, cell_size),
    )
}

fn snap_axis(value: f32, cell_size: f32) -> f32 {
    (value / cell_size).floor() * cell_size + cell_size * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_are_cell_centers() {
        let points = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(-1.0, 49.9, 150.0),
            Vec3::new(-300.5, 7.3, -0.001),
        ];
        for p in points {
            let snapped = snap_to_cell(p, Vec3::ZERO, 50.0);
            for coord in snapped.to_array() {
                // Every coordinate is 25 mod 50
                assert_eq!(coord.rem_euclid(50.0), 25.0, "point {:?}", p);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let points = [
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(-120.0, 75.0, 3.0),
            Vec3::new(0.0, 0.0, 0.0),
        ];
        let normals = [Vec3::Y, -Vec3::X, Vec3::Z];
        for (p, n) in points.into_iter().zip(normals) {
            let once = snap_to_cell(p, n, 50.0);
            assert_eq!(snap_to_cell(once, Vec3::ZERO, 50.0), once);
        }
    }

    #[test]
    fn test_ground_placement() {
        // Striking the ground at (10, 0, 10) places in the first cell up
        let snapped = snap_to_cell(Vec3::new(10.0, 0.0, 10.0), Vec3::Y, 50.0);
        assert_eq!(snapped, Vec3::new(25.0, 25.0, 25.0));
    }

    #[test]
    fn test_side_face_placement() {
        // Striking the +X face of the cell at (25, 25, 25) lands one cell over
        let snapped = snap_to_cell(Vec3::new(50.0, 30.0, 20.0), Vec3::X, 50.0);
        assert_eq!(snapped, Vec3::new(75.0, 25.0, 25.0));
    }

    #[test]
    fn test_negative_coordinates() {
        let snapped = snap_to_cell(Vec3::new(-10.0, 0.0, -60.0), Vec3::Y, 50.0);
        assert_eq!(snapped, Vec3::new(-25.0, 25.0, -75.0));
    }

    #[test]
    fn test_zero_normal_snaps_point_itself() {
        let snapped = snap_to_cell(Vec3::new(60.0, 10.0, 60.0), Vec3::ZERO, 50.0);
        assert_eq!(snapped, Vec3::new(75.0, 25.0, 75.0));
    }
}
