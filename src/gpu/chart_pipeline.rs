//! Hexagon fill and line pipelines with their immutable geometry buffers.

use std::ops::Range;

use wgpu::util::DeviceExt;

use super::{Globals, GLOBALS_SLOT_BYTES};
use crate::chart;
use crate::geometry::{self, Vertex};
use crate::math;

/// Static chart rendering: the data-scaled fan plus the spoke and
/// perimeter quads. Everything is uploaded once at construction.
pub struct ChartPipeline {
    hexagon_pipeline: wgpu::RenderPipeline,
    hexagon_vertices: wgpu::Buffer,
    hexagon_indices: wgpu::Buffer,
    hexagon_index_count: u32,
    hexagon_bind_group: wgpu::BindGroup,

    lines_pipeline: wgpu::RenderPipeline,
    line_vertices: wgpu::Buffer,
    spoke_range: Range<u32>,
    perimeter_range: Range<u32>,
    lines_bind_group: wgpu::BindGroup,
}

impl ChartPipeline {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
    ) -> Self {
        // Hexagon fill: triangle fan over the magnitude-scaled vertices.
        let fill = geometry::fill_geometry(&chart::MAGNITUDES, chart::HEXAGON_SHRINK);
        let hexagon_vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("hexagon vertices"),
            contents: bytemuck::cast_slice(&fill.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let hexagon_indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("hexagon indices"),
            contents: bytemuck::cast_slice(&fill.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let hexagon_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("hexagon globals layout"),
            entries: &[globals_entry(false)],
        });
        let hexagon_globals = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("hexagon globals"),
            contents: bytemuck::bytes_of(&Globals {
                transform: math::identity(),
                colour: chart::FILL_COLOUR.to_array(),
            }),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let hexagon_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("hexagon bind group"),
            layout: &hexagon_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: hexagon_globals.as_entire_binding(),
            }],
        });

        let hexagon_pipeline = build_pipeline(
            device,
            format,
            "hexagon pipeline",
            include_str!("shaders/hexagon.wgsl"),
            &hexagon_layout,
        );

        // Lines: shared magnitude-independent vertices expanded into quads,
        // spokes first so the perimeter draws over any overlap.
        let lines = geometry::line_geometry(chart::HEXAGON_SHRINK);
        let screen = [chart::SCREEN_WIDTH as f32, chart::SCREEN_HEIGHT as f32];
        let mut line_quads = geometry::segment_quads(
            &lines.vertices,
            &lines.spokes,
            chart::SPOKE_WIDTH_PX,
            screen,
        );
        let spoke_range = 0..line_quads.len() as u32;
        line_quads.extend(geometry::segment_quads(
            &lines.vertices,
            &lines.perimeter,
            chart::PERIMETER_WIDTH_PX,
            screen,
        ));
        let perimeter_range = spoke_range.end..line_quads.len() as u32;

        let line_vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("line vertices"),
            contents: bytemuck::cast_slice(&line_quads),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let lines_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lines globals layout"),
            entries: &[globals_entry(true)],
        });

        // Two uniform slots, one per line colour, selected by dynamic
        // offset so the colour is set per draw call.
        let lines_globals = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lines globals"),
            size: 2 * GLOBALS_SLOT_BYTES,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        for (slot, colour) in [chart::SPOKE_COLOUR, chart::PERIMETER_COLOUR]
            .iter()
            .enumerate()
        {
            queue.write_buffer(
                &lines_globals,
                slot as u64 * GLOBALS_SLOT_BYTES,
                bytemuck::bytes_of(&Globals {
                    transform: math::identity(),
                    colour: colour.to_array(),
                }),
            );
        }
        let lines_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lines bind group"),
            layout: &lines_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &lines_globals,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<Globals>() as u64),
                }),
            }],
        });

        let lines_pipeline = build_pipeline(
            device,
            format,
            "lines pipeline",
            include_str!("shaders/lines.wgsl"),
            &lines_layout,
        );

        Self {
            hexagon_pipeline,
            hexagon_vertices,
            hexagon_indices,
            hexagon_index_count: fill.indices.len() as u32,
            hexagon_bind_group,
            lines_pipeline,
            line_vertices,
            spoke_range,
            perimeter_range,
            lines_bind_group,
        }
    }

    /// Fixed draw sequence: fill, spokes, perimeter.
    pub fn draw<'pass>(&'pass self, pass: &mut wgpu::RenderPass<'pass>) {
        pass.set_pipeline(&self.hexagon_pipeline);
        pass.set_bind_group(0, &self.hexagon_bind_group, &[]);
        pass.set_vertex_buffer(0, self.hexagon_vertices.slice(..));
        pass.set_index_buffer(self.hexagon_indices.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.hexagon_index_count, 0, 0..1);

        pass.set_pipeline(&self.lines_pipeline);
        pass.set_vertex_buffer(0, self.line_vertices.slice(..));
        pass.set_bind_group(0, &self.lines_bind_group, &[0]);
        pass.draw(self.spoke_range.clone(), 0..1);
        pass.set_bind_group(0, &self.lines_bind_group, &[GLOBALS_SLOT_BYTES as u32]);
        pass.draw(self.perimeter_range.clone(), 0..1);
    }
}

fn globals_entry(dynamic: bool) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: dynamic,
            min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<Globals>() as u64),
        },
        count: None,
    }
}

fn build_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    label: &str,
    shader_source: &str,
    globals_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(shader_source.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[globals_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: "vs_main",
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            }],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    })
}
