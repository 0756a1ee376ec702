//! Camera with switchable perspective and orthographic projection

use crate::core::types::{Mat4, Vec2, Vec3};
use crate::math::ray::Ray;

/// Projection kind for the camera.
///
/// A closed enum rather than a runtime type check: every view switch names
/// the projection it wants, and matrix code branches on the variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    /// Perspective projection with a vertical field of view in radians
    Perspective { fov_y: f32 },
    /// Orthographic projection; the visible height is `frustum_height / zoom`
    Orthographic { frustum_height: f32, zoom: f32 },
}

impl Projection {
    /// Whether this is the orthographic variant
    pub fn is_orthographic(&self) -> bool {
        matches!(self, Projection::Orthographic { .. })
    }
}

/// Camera aimed at a fixed target point
#[derive(Clone, Debug)]
pub struct Camera {
    /// World position
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Up vector for the view basis
    pub up: Vec3,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Active projection
    pub projection: Projection,
}

impl Camera {
    /// Create a perspective camera looking at `target`
    pub fn perspective(
        position: Vec3,
        target: Vec3,
        fov_y_degrees: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up: Vec3::Y,
            aspect,
            near,
            far,
            projection: Projection::Perspective {
                fov_y: fov_y_degrees.to_radians(),
            },
        }
    }

    /// Get view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get projection matrix (camera to clip space, depth 0..1)
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective { fov_y } => {
                Mat4::perspective_rh(fov_y, self.aspect, self.near, self.far)
            }
            Projection::Orthographic {
                frustum_height,
                zoom,
            } => {
                let half_h = frustum_height / zoom * 0.5;
                let half_w = half_h * self.aspect;
                Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, self.near, self.far)
            }
        }
    }

    /// Get combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get inverse view-projection matrix (for ray generation)
    pub fn view_projection_inverse(&self) -> Mat4 {
        self.view_projection().inverse()
    }

    /// Update aspect ratio (call on window resize)
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        self.aspect = width / height;
    }

    /// Build a picking ray through a pointer position in normalized device
    /// coordinates (x, y in [-1, 1], y up).
    ///
    /// The ray starts on the near plane, so it works unchanged for both
    /// projections: perspective rays fan out from the eye, orthographic
    /// rays are parallel to the view direction.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection_inverse();
        let near_point = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far_point = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(near_point, (far_point - near_point).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home_camera() -> Camera {
        Camera::perspective(
            Vec3::new(500.0, 800.0, 1300.0),
            Vec3::ZERO,
            45.0,
            16.0 / 9.0,
            1.0,
            10000.0,
        )
    }

    #[test]
    fn test_projection_inverse() {
        let camera = home_camera();
        let vp = camera.view_projection();
        let vp_inv = camera.view_projection_inverse();

        let identity = vp * vp_inv;
        assert!((identity.w_axis.w - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = home_camera();
        let ray = camera.ray_from_ndc(Vec2::ZERO);

        let expected = (camera.target - camera.position).normalize();
        assert!(ray.direction.dot(expected) > 0.999);
        // Origin sits on the near plane, close to the eye
        assert!((ray.origin - camera.position).length() < 2.0 * camera.near);
    }

    #[test]
    fn test_orthographic_rays_are_parallel() {
        let mut camera = home_camera();
        camera.position = Vec3::new(0.0, 0.0, 1000.0);
        camera.projection = Projection::Orthographic {
            frustum_height: 1000.0,
            zoom: 1.0,
        };

        let a = camera.ray_from_ndc(Vec2::new(-0.5, 0.3));
        let b = camera.ray_from_ndc(Vec2::new(0.7, -0.6));
        assert!(a.direction.dot(b.direction) > 0.999);
        assert!(a.direction.dot(-Vec3::Z) > 0.999);
        // Parallel rays start at distinct points
        assert!((a.origin - b.origin).length() > 1.0);
    }

    #[test]
    fn test_orthographic_zoom_narrows_frustum() {
        let mut camera = home_camera();
        camera.position = Vec3::new(0.0, 0.0, 1000.0);
        camera.projection = Projection::Orthographic {
            frustum_height: 1000.0,
            zoom: 2.0,
        };

        // At zoom 2 the top edge of the view maps to y = 250
        let ray = camera.ray_from_ndc(Vec2::new(0.0, 1.0));
        assert!((ray.origin.y - 250.0).abs() < 0.01);
    }

    #[test]
    fn test_is_orthographic() {
        let mut camera = home_camera();
        assert!(!camera.projection.is_orthographic());
        camera.projection = Projection::Orthographic {
            frustum_height: 1000.0,
            zoom: 1.0,
        };
        assert!(camera.projection.is_orthographic());
    }
}
