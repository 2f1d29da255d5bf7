use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::camera::Camera;

/// Per-vertex data for grid line segments.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 2],
    pub color: [f32; 4], // premultiplied RGBA
}

/// #222222, opaque.
const GRID_COLOR: [f32; 4] = [0x22 as f32 / 255.0, 0x22 as f32 / 255.0, 0x22 as f32 / 255.0, 1.0];
/// Enough for a 4K viewport at the default spacing, with room to spare.
const MAX_GRID_VERTICES: usize = 4096;

/// Append the background grid as line-list vertices, two per line.
pub fn push_grid(out: &mut Vec<LineVertex>, camera: &Camera, viewport: Vec2, spacing: f32) {
    let (xs, ys) = camera.grid_lines(viewport, spacing);
    for y in ys {
        out.push(LineVertex {
            position: [0.0, y],
            color: GRID_COLOR,
        });
        out.push(LineVertex {
            position: [viewport.x, y],
            color: GRID_COLOR,
        });
    }
    for x in xs {
        out.push(LineVertex {
            position: [x, 0.0],
            color: GRID_COLOR,
        });
        out.push(LineVertex {
            position: [x, viewport.y],
            color: GRID_COLOR,
        });
    }
}

/// GPU pipeline for rendering the grid as lines.
pub struct GridPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    pub screen_bind_group: wgpu::BindGroup,
    pub num_vertices: u32,
}

impl GridPipeline {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        screen_layout: &wgpu::BindGroupLayout,
        screen_uniform_buffer: &wgpu::Buffer,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("grid_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/grid.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("grid_pipeline_layout"),
            bind_group_layouts: &[screen_layout],
            push_constant_ranges: &[],
        });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 8,
                    shader_location: 1,
                },
            ],
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("grid_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("grid_vertex_buffer"),
            size: (MAX_GRID_VERTICES * std::mem::size_of::<LineVertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let screen_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("grid_screen_bind_group"),
            layout: screen_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen_uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            pipeline,
            vertex_buffer,
            screen_bind_group,
            num_vertices: 0,
        }
    }

    pub fn update_vertices(&mut self, queue: &wgpu::Queue, vertices: &[LineVertex]) {
        let count = vertices.len().min(MAX_GRID_VERTICES);
        self.num_vertices = count as u32;
        if count > 0 {
            queue.write_buffer(
                &self.vertex_buffer,
                0,
                bytemuck::cast_slice(&vertices[..count]),
            );
        }
    }
}
