//! Tool configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;

/// Configuration for the placement tool.
///
/// All fields have defaults matching the stock scene; a JSON file given
/// with `--config <path>` overrides any subset of them.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Grid cell edge length in world units. Placed cubes have this edge.
    pub cell_size: f32,
    /// Edge length of the square pickable ground plane, centered at the origin
    pub ground_extent: f32,
    /// Number of grid helper divisions across the ground extent
    pub grid_divisions: u32,
    /// Perspective vertical field of view in degrees
    pub fov_y_degrees: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Home position of the perspective camera
    pub initial_camera_pos: [f32; 3],
    /// Vertical extent of the orthographic frustum at zoom 1
    pub ortho_frustum_height: f32,
    /// Distance from the origin for the fixed orthographic views
    pub ortho_distance: f32,
    /// Orbit drag sensitivity (radians per pixel, before the internal scale)
    pub orbit_sensitivity: f32,
    /// Wheel zoom speed multiplier
    pub zoom_speed: f32,
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            cell_size: 50.0,
            ground_extent: 1000.0,
            grid_divisions: 20,
            fov_y_degrees: 45.0,
            near: 1.0,
            far: 10000.0,
            initial_camera_pos: [500.0, 800.0, 1300.0],
            ortho_frustum_height: 1000.0,
            ortho_distance: 1000.0,
            orbit_sensitivity: 1.0,
            zoom_speed: 1.2,
            window_title: "Voxpaint".to_string(),
            window_width: 1280,
            window_height: 720,
        }
    }
}

impl ToolConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}
