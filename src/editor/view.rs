//! View mode state machine

use crate::core::camera::{Camera, Projection};
use crate::core::config::ToolConfig;
use crate::core::types::Vec3;

/// The active view. Exactly one at a time; pointer-driven placement and
/// the hover preview exist only in `Perspective`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Perspective,
    OrthoFront,
    OrthoSide,
    OrthoTop,
}

impl ViewMode {
    /// Whether this is the free perspective view
    pub fn is_perspective(self) -> bool {
        self == ViewMode::Perspective
    }

    /// Fixed camera offset from the origin for an orthographic view at
    /// distance `d`. None for the perspective view.
    pub fn ortho_position(self, d: f32) -> Option<Vec3> {
        match self {
            ViewMode::Perspective => None,
            ViewMode::OrthoFront => Some(Vec3::new(0.0, 0.0, d)),
            ViewMode::OrthoSide => Some(Vec3::new(d, 0.0, 0.0)),
            ViewMode::OrthoTop => Some(Vec3::new(0.0, d, 0.0)),
        }
    }

    /// Up vector for the view basis. The top view looks straight down, so
    /// it needs an explicit horizontal up to keep the look-at well defined.
    pub fn up_vector(self) -> Vec3 {
        match self {
            ViewMode::OrthoTop => Vec3::NEG_Z,
            _ => Vec3::Y,
        }
    }
}

/// Camera plus the view mode driving it.
///
/// Owns every transition of the mode state machine: each `select` call
/// rewrites projection, position, and orientation from the mode's fixed
/// parameters, so re-selecting the current view re-homes the camera.
pub struct ViewRig {
    camera: Camera,
    mode: ViewMode,
    home_position: Vec3,
    fov_y_degrees: f32,
    ortho_distance: f32,
    ortho_frustum_height: f32,
}

impl ViewRig {
    /// Create a rig in the initial perspective view
    pub fn new(config: &ToolConfig) -> Self {
        let home_position = Vec3::from_array(config.initial_camera_pos);
        let aspect = config.window_width as f32 / config.window_height as f32;
        let camera = Camera::perspective(
            home_position,
            Vec3::ZERO,
            config.fov_y_degrees,
            aspect,
            config.near,
            config.far,
        );
        Self {
            camera,
            mode: ViewMode::Perspective,
            home_position,
            fov_y_degrees: config.fov_y_degrees,
            ortho_distance: config.ortho_distance,
            ortho_frustum_height: config.ortho_frustum_height,
        }
    }

    /// Active view mode
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Active camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera access, for the orbit controller and resize handling
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Switch to a view, applying its fixed camera placement
    pub fn select(&mut self, mode: ViewMode) {
        self.mode = mode;
        self.camera.target = Vec3::ZERO;
        self.camera.up = mode.up_vector();

        match mode.ortho_position(self.ortho_distance) {
            Some(position) => {
                self.camera.projection = Projection::Orthographic {
                    frustum_height: self.ortho_frustum_height,
                    zoom: 1.0,
                };
                self.camera.position = position;
            }
            None => {
                self.camera.projection = Projection::Perspective {
                    fov_y: self.fov_y_degrees.to_radians(),
                };
                self.camera.position = self.home_position;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig() -> ViewRig {
        ViewRig::new(&ToolConfig::default())
    }

    #[test]
    fn test_initial_state_is_perspective() {
        let rig = rig();
        assert_eq!(rig.mode(), ViewMode::Perspective);
        assert!(!rig.camera().projection.is_orthographic());
        assert_eq!(rig.camera().position, Vec3::new(500.0, 800.0, 1300.0));
    }

    #[test]
    fn test_top_view_placement() {
        let mut rig = rig();
        rig.select(ViewMode::OrthoTop);

        assert_eq!(rig.mode(), ViewMode::OrthoTop);
        assert_eq!(rig.camera().position, Vec3::new(0.0, 1000.0, 0.0));
        assert_eq!(rig.camera().up, Vec3::NEG_Z);
        assert_eq!(
            rig.camera().projection,
            Projection::Orthographic {
                frustum_height: 1000.0,
                zoom: 1.0,
            }
        );
    }

    #[test]
    fn test_front_and_side_placement() {
        let mut rig = rig();

        rig.select(ViewMode::OrthoFront);
        assert_eq!(rig.camera().position, Vec3::new(0.0, 0.0, 1000.0));
        assert_eq!(rig.camera().up, Vec3::Y);

        rig.select(ViewMode::OrthoSide);
        assert_eq!(rig.camera().position, Vec3::new(1000.0, 0.0, 0.0));
    }

    #[test]
    fn test_zoom_resets_on_every_ortho_entry() {
        let mut rig = rig();
        rig.select(ViewMode::OrthoFront);

        if let Projection::Orthographic { zoom, .. } = &mut rig.camera_mut().projection {
            *zoom = 3.0;
        }

        rig.select(ViewMode::OrthoFront);
        assert_eq!(
            rig.camera().projection,
            Projection::Orthographic {
                frustum_height: 1000.0,
                zoom: 1.0,
            }
        );
    }

    #[test]
    fn test_perspective_restores_home_position() {
        let mut rig = rig();
        rig.select(ViewMode::OrthoSide);
        rig.select(ViewMode::Perspective);

        assert_eq!(rig.mode(), ViewMode::Perspective);
        assert_eq!(rig.camera().position, Vec3::new(500.0, 800.0, 1300.0));
        assert!(!rig.camera().projection.is_orthographic());
    }

    #[test]
    fn test_all_modes_reachable_from_all_modes() {
        let modes = [
            ViewMode::Perspective,
            ViewMode::OrthoFront,
            ViewMode::OrthoSide,
            ViewMode::OrthoTop,
        ];
        let mut rig = rig();
        for from in modes {
            for to in modes {
                rig.select(from);
                rig.select(to);
                assert_eq!(rig.mode(), to);
            }
        }
    }
}
