//! Frame rendering over the voxel set

use crate::core::camera::Camera;
use crate::core::config::ToolConfig;
use crate::core::types::Result;
use crate::editor::PreviewMarker;
use crate::scene::VoxelSet;

use super::camera_buffer::CameraBuffer;
use super::context::GpuContext;
use super::pipeline::{CubeInstance, GridPipeline, VoxelPipeline};
use super::texture::DepthTexture;

/// Background clear, sRGB 0xf0f0f0
const BACKGROUND: u32 = 0xf0f0f0;
/// Placed cube color, sRGB 0x5c422a
const CUBE_COLOR: u32 = 0x5c422a;
/// Preview marker color, sRGB 0x648131, drawn at half opacity
const PREVIEW_COLOR: u32 = 0x648131;
const PREVIEW_ALPHA: f32 = 0.5;

const INITIAL_INSTANCE_CAPACITY: u32 = 64;

/// Convert a packed sRGB color to linear RGB channels
fn srgb_to_linear(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| (((hex >> shift) & 0xff) as f32 / 255.0).powf(2.2);
    [channel(16), channel(8), channel(0)]
}

/// Draws the grid helper, the placed voxels, and the preview marker.
///
/// Voxel instance data is rebuilt only when the set's revision counter
/// moves; everything else is re-encoded per frame.
pub struct Renderer {
    camera_buffer: CameraBuffer,
    depth: DepthTexture,
    grid: GridPipeline,
    voxels: VoxelPipeline,
    voxel_instances: wgpu::Buffer,
    voxel_capacity: u32,
    voxel_count: u32,
    preview_instance: wgpu::Buffer,
    seen_revision: Option<u64>,
    clear_color: wgpu::Color,
    cube_color: [f32; 4],
    preview_color: [f32; 4],
}

impl Renderer {
    /// Create the renderer and its pipelines
    pub fn new(gpu: &GpuContext, config: &ToolConfig) -> Self {
        let camera_buffer = CameraBuffer::new(&gpu.device);
        let (width, height) = gpu.size();
        let depth = DepthTexture::new(&gpu.device, width, height);

        let grid = GridPipeline::new(
            &gpu.device,
            &gpu.queue,
            gpu.format(),
            camera_buffer.bind_group_layout(),
            config.ground_extent,
            config.grid_divisions,
        );
        let voxels = VoxelPipeline::new(
            &gpu.device,
            &gpu.queue,
            gpu.format(),
            camera_buffer.bind_group_layout(),
            config.cell_size,
        );

        let voxel_instances = Self::create_instance_buffer(
            &gpu.device,
            "voxel_instances",
            INITIAL_INSTANCE_CAPACITY,
        );
        let preview_instance = Self::create_instance_buffer(&gpu.device, "preview_instance", 1);

        let [br, bg, bb] = srgb_to_linear(BACKGROUND);
        let [cr, cg, cb] = srgb_to_linear(CUBE_COLOR);
        let [pr, pg, pb] = srgb_to_linear(PREVIEW_COLOR);

        Self {
            camera_buffer,
            depth,
            grid,
            voxels,
            voxel_instances,
            voxel_capacity: INITIAL_INSTANCE_CAPACITY,
            voxel_count: 0,
            preview_instance,
            seen_revision: None,
            clear_color: wgpu::Color {
                r: br as f64,
                g: bg as f64,
                b: bb as f64,
                a: 1.0,
            },
            cube_color: [cr, cg, cb, 1.0],
            preview_color: [pr, pg, pb, PREVIEW_ALPHA],
        }
    }

    fn create_instance_buffer(device: &wgpu::Device, label: &str, capacity: u32) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity as u64 * std::mem::size_of::<CubeInstance>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Recreate the depth buffer after a surface resize
    pub fn resize(&mut self, gpu: &GpuContext) {
        let (width, height) = gpu.size();
        self.depth = DepthTexture::new(&gpu.device, width, height);
    }

    /// Upload voxel instances if the set changed since the last frame
    fn sync_instances(&mut self, gpu: &GpuContext, set: &VoxelSet) {
        if self.seen_revision == Some(set.revision()) {
            return;
        }

        let instances: Vec<CubeInstance> = set
            .voxels()
            .iter()
            .map(|v| CubeInstance {
                offset: v.center.to_array(),
                color: self.cube_color,
            })
            .collect();

        let needed = instances.len() as u32;
        if needed > self.voxel_capacity {
            let capacity = needed.next_power_of_two();
            self.voxel_instances =
                Self::create_instance_buffer(&gpu.device, "voxel_instances", capacity);
            self.voxel_capacity = capacity;
            log::debug!("Grew voxel instance buffer to {}", capacity);
        }

        if !instances.is_empty() {
            gpu.queue
                .write_buffer(&self.voxel_instances, 0, bytemuck::cast_slice(&instances));
        }
        self.voxel_count = needed;
        self.seen_revision = Some(set.revision());
    }

    /// Render one frame
    pub fn render(
        &mut self,
        gpu: &GpuContext,
        set: &VoxelSet,
        camera: &Camera,
        preview: &PreviewMarker,
    ) -> Result<()> {
        self.sync_instances(gpu, set);
        self.camera_buffer.update(&gpu.queue, camera);

        if preview.visible {
            let instance = CubeInstance {
                offset: preview.position.to_array(),
                color: self.preview_color,
            };
            gpu.queue
                .write_buffer(&self.preview_instance, 0, bytemuck::bytes_of(&instance));
        }

        let frame = gpu.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let camera_bind_group = self.camera_buffer.bind_group();
            self.grid.draw(&mut pass, camera_bind_group);
            self.voxels.draw_opaque(
                &mut pass,
                camera_bind_group,
                &self.voxel_instances,
                self.voxel_count,
            );
            if preview.visible {
                self.voxels
                    .draw_preview(&mut pass, camera_bind_group, &self.preview_instance);
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb_to_linear_endpoints() {
        assert_eq!(srgb_to_linear(0x000000), [0.0, 0.0, 0.0]);
        let white = srgb_to_linear(0xffffff);
        for c in white {
            assert!((c - 1.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_srgb_to_linear_channel_order() {
        let [r, g, b] = srgb_to_linear(0xff0000);
        assert!((r - 1.0).abs() < 0.001);
        assert_eq!(g, 0.0);
        assert_eq!(b, 0.0);
    }
}
