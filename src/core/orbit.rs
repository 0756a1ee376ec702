//! Orbit camera controller for the perspective view

use crate::core::camera::Camera;
use crate::core::types::{Vec2, Vec3};

/// Pitch limit just short of the poles
const PITCH_LIMIT: f32 = 1.55;
/// Closest the camera can dolly toward the target
const MIN_DISTANCE: f32 = 10.0;
/// Radians of orbit per pixel of drag at sensitivity 1
const DRAG_SCALE: f32 = 0.005;

/// Drag-to-orbit and wheel-to-dolly controller.
///
/// Keeps spherical coordinates around a fixed target. The controller only
/// ever drives the perspective camera: in the fixed orthographic views its
/// state still accumulates, but nothing applies it to the view.
pub struct OrbitController {
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    /// Drag sensitivity multiplier
    pub sensitivity: f32,
    /// Distance multiplier per wheel line
    pub zoom_speed: f32,
    dragging: bool,
}

impl OrbitController {
    /// Create a controller centered on the origin
    pub fn new(sensitivity: f32, zoom_speed: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: MIN_DISTANCE,
            sensitivity,
            zoom_speed,
            dragging: false,
        }
    }

    /// Re-derive the spherical state from the camera's current placement.
    /// Call after anything else moves the camera (e.g. a view-mode switch).
    pub fn sync_from_camera(&mut self, camera: &Camera) {
        let offset = camera.position - camera.target;
        self.target = camera.target;
        self.distance = offset.length().max(MIN_DISTANCE);
        self.yaw = offset.x.atan2(offset.z);
        self.pitch = (offset.y / self.distance).clamp(-1.0, 1.0).asin();
    }

    /// Start or stop a drag gesture
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Whether a drag gesture is active
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Consume pointer drag and wheel input accumulated since the last
    /// event. Returns true if the orbit state moved.
    pub fn update(&mut self, drag: Vec2, scroll: f32) -> bool {
        let mut changed = false;

        if self.dragging && drag != Vec2::ZERO {
            self.yaw -= drag.x * self.sensitivity * DRAG_SCALE;
            self.pitch = (self.pitch + drag.y * self.sensitivity * DRAG_SCALE)
                .clamp(-PITCH_LIMIT, PITCH_LIMIT);
            changed = true;
        }

        if scroll != 0.0 {
            self.distance = (self.distance * self.zoom_speed.powf(-scroll)).max(MIN_DISTANCE);
            changed = true;
        }

        changed
    }

    /// Write the orbit placement into the camera
    pub fn apply_to(&self, camera: &mut Camera) {
        let (yaw_sin, yaw_cos) = self.yaw.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.sin_cos();
        camera.position = self.target
            + Vec3::new(yaw_sin * pitch_cos, pitch_sin, yaw_cos * pitch_cos) * self.distance;
        camera.target = self.target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera::Camera;

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
    fn test_sync_apply_round_trip() {
        let mut camera = home_camera();
        let original = camera.position;

        let mut orbit = OrbitController::new(1.0, 1.2);
        orbit.sync_from_camera(&camera);
        orbit.apply_to(&mut camera);

        assert!((camera.position - original).length() < 0.01);
    }

    #[test]
    fn test_drag_only_while_dragging() {
        let mut orbit = OrbitController::new(1.0, 1.2);
        orbit.sync_from_camera(&home_camera());

        assert!(!orbit.update(Vec2::new(30.0, 0.0), 0.0));

        orbit.set_dragging(true);
        assert!(orbit.update(Vec2::new(30.0, 0.0), 0.0));
    }

    #[test]
    fn test_drag_orbits_at_constant_distance() {
        let mut camera = home_camera();
        let mut orbit = OrbitController::new(1.0, 1.2);
        orbit.sync_from_camera(&camera);
        let distance_before = camera.position.length();

        orbit.set_dragging(true);
        orbit.update(Vec2::new(100.0, -40.0), 0.0);
        orbit.apply_to(&mut camera);

        assert!((camera.position.length() - distance_before).abs() < 0.01);
        assert!((camera.position - home_camera().position).length() > 1.0);
    }

    #[test]
    fn test_scroll_dollies() {
        let mut camera = home_camera();
        let mut orbit = OrbitController::new(1.0, 1.2);
        orbit.sync_from_camera(&camera);
        let distance_before = camera.position.length();

        assert!(orbit.update(Vec2::ZERO, 1.0));
        orbit.apply_to(&mut camera);
        assert!(camera.position.length() < distance_before);

        orbit.update(Vec2::ZERO, -2.0);
        orbit.apply_to(&mut camera);
        assert!(camera.position.length() > distance_before);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut orbit = OrbitController::new(1.0, 1.2);
        orbit.sync_from_camera(&home_camera());

        orbit.set_dragging(true);
        orbit.update(Vec2::new(0.0, 10000.0), 0.0);

        let mut camera = home_camera();
        orbit.apply_to(&mut camera);
        // Clamped short of the pole: horizontal distance stays positive
        let horizontal = Vec2::new(camera.position.x, camera.position.z).length();
        assert!(horizontal > 1.0);
    }
}
