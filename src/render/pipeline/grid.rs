//! Grid helper line pipeline

use bytemuck::{Pod, Zeroable};

use crate::render::texture::DepthTexture;

/// Grid line vertex
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct LineVertex {
    position: [f32; 3],
    color: [f32; 3],
}

/// Line color for the two center lines (sRGB 0x444444 in linear space)
const CENTER_COLOR: [f32; 3] = [0.0578, 0.0578, 0.0578];
/// Line color for the remaining grid lines (sRGB 0x888888 in linear space)
const LINE_COLOR: [f32; 3] = [0.2462, 0.2462, 0.2462];

/// Build line-list vertices for a square grid on the y = 0 plane.
fn grid_vertices(extent: f32, divisions: u32) -> Vec<LineVertex> {
    let half = extent * 0.5;
    let step = extent / divisions as f32;
    let center = divisions / 2;

    let mut vertices = Vec::with_capacity(((divisions + 1) * 4) as usize);
    for i in 0..=divisions {
        let t = -half + i as f32 * step;
        let color = if i == center { CENTER_COLOR } else { LINE_COLOR };
        // Line along x at z = t, and along z at x = t
        vertices.push(LineVertex { position: [-half, 0.0, t], color });
        vertices.push(LineVertex { position: [half, 0.0, t], color });
        vertices.push(LineVertex { position: [t, 0.0, -half], color });
        vertices.push(LineVertex { position: [t, 0.0, half], color });
    }
    vertices
}

/// Line pipeline drawing the ground grid helper
pub struct GridPipeline {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl GridPipeline {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
        extent: f32,
        divisions: u32,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("grid_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../../../shaders/grid.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("grid_pipeline_layout"),
            bind_group_layouts: &[camera_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("grid_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<LineVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
                }],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthTexture::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        let vertices = grid_vertices(extent, divisions);
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("grid_vertices"),
            size: (vertices.len() * std::mem::size_of::<LineVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&vertex_buffer, 0, bytemuck::cast_slice(&vertices));

        Self {
            pipeline,
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        }
    }

    /// Draw the grid
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, camera_bind_group: &wgpu::BindGroup) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, camera_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_vertex_count() {
        // 21 lines per direction, 2 vertices per line
        assert_eq!(grid_vertices(1000.0, 20).len(), 21 * 4);
    }

    #[test]
    fn test_grid_lies_on_ground_plane() {
        for v in grid_vertices(1000.0, 20) {
            assert_eq!(v.position[1], 0.0);
            assert!(v.position[0].abs() <= 500.0);
            assert!(v.position[2].abs() <= 500.0);
        }
    }
}
