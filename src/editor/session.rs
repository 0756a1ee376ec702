//! Editor session: the single owner of tool state

use crate::core::camera::Camera;
use crate::core::config::ToolConfig;
use crate::core::types::{Vec2, Vec3};
use crate::scene::{pick, VoxelSet, GROUND_NODE};

use super::snap::snap_to_cell;
use super::view::{ViewMode, ViewRig};

/// The translucent cube that previews the cell a click would fill.
///
/// On a ray miss the marker keeps its last position; it is hidden outright
/// only while an orthographic view is active.
#[derive(Clone, Copy, Debug)]
pub struct PreviewMarker {
    pub position: Vec3,
    pub visible: bool,
}

impl Default for PreviewMarker {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            visible: true,
        }
    }
}

/// Owns the voxel set, the preview marker, the view rig, and the erase
/// flag, and applies every pointer and view event to them.
///
/// Nothing here touches a window or the GPU; the winit layer feeds in
/// normalized device coordinates and reads back a render-request flag.
pub struct EditorSession {
    set: VoxelSet,
    preview: PreviewMarker,
    view: ViewRig,
    erase_mode: bool,
    render_requested: bool,
}

impl EditorSession {
    /// Create a session with an empty voxel set in the perspective view
    pub fn new(config: &ToolConfig) -> Self {
        Self {
            set: VoxelSet::new(config.cell_size, config.ground_extent),
            preview: PreviewMarker::default(),
            view: ViewRig::new(config),
            erase_mode: false,
            render_requested: true,
        }
    }

    /// The placed voxels and ground plane
    pub fn set(&self) -> &VoxelSet {
        &self.set
    }

    /// The hover preview marker
    pub fn preview(&self) -> &PreviewMarker {
        &self.preview
    }

    /// The view rig
    pub fn view(&self) -> &ViewRig {
        &self.view
    }

    /// Mutable view rig access, for the orbit controller and resize
    pub fn view_mut(&mut self) -> &mut ViewRig {
        &mut self.view
    }

    /// The active camera
    pub fn camera(&self) -> &Camera {
        self.view.camera()
    }

    /// Whether a pointer-down currently erases instead of placing
    pub fn erase_mode(&self) -> bool {
        self.erase_mode
    }

    /// Track the erase modifier key
    pub fn set_erase_mode(&mut self, on: bool) {
        self.erase_mode = on;
    }

    /// Pointer movement: update the hover preview.
    ///
    /// Only the perspective view casts a ray. A hit moves the marker to
    /// the snapped cell; a miss leaves it in place.
    pub fn pointer_moved(&mut self, ndc: Vec2) {
        if !self.view.mode().is_perspective() {
            return;
        }

        let ray = self.view.camera().ray_from_ndc(ndc);
        if let Some(hit) = pick(&ray, &self.set) {
            self.preview.position = snap_to_cell(hit.point, hit.normal, self.set.cell_size());
            self.render_requested = true;
        }
    }

    /// Pointer press: place a voxel, or erase one in erase mode.
    ///
    /// Only the perspective view casts a ray. The ground plane can be
    /// struck but never erased.
    pub fn pointer_down(&mut self, ndc: Vec2) {
        if !self.view.mode().is_perspective() {
            return;
        }

        let ray = self.view.camera().ray_from_ndc(ndc);
        let Some(hit) = pick(&ray, &self.set) else {
            return;
        };

        if self.erase_mode {
            if hit.node != GROUND_NODE {
                self.set.remove(hit.node);
                log::debug!("Erased voxel {:?}", hit.node);
            }
        } else {
            let center = snap_to_cell(hit.point, hit.normal, self.set.cell_size());
            let id = self.set.add_voxel(center);
            log::debug!("Placed voxel {:?} at {}", id, center);
        }

        self.render_requested = true;
    }

    /// Switch views, updating the camera and preview visibility
    pub fn select_view(&mut self, mode: ViewMode) {
        self.view.select(mode);
        self.preview.visible = mode.is_perspective();
        self.render_requested = true;
        log::info!("View: {:?}", mode);
    }

    /// Track a viewport resize
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.view
            .camera_mut()
            .set_aspect(width as f32, height as f32);
        self.render_requested = true;
    }

    /// Ask for a redraw without changing any state
    pub fn request_render(&mut self) {
        self.render_requested = true;
    }

    /// Drain the render-request flag
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }
}
