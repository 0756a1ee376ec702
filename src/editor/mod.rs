//! Placement logic: grid snapping, the view state machine, and the
//! editor session that ties them to the voxel set

pub mod session;
pub mod snap;
pub mod view;

pub use session::{EditorSession, PreviewMarker};
pub use snap::snap_to_cell;
pub use view::{ViewMode, ViewRig};
