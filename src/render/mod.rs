//! GPU rendering of the voxel scene

pub mod camera_buffer;
pub mod context;
pub mod pipeline;
pub mod renderer;
pub mod texture;

pub use context::GpuContext;
pub use renderer::Renderer;
