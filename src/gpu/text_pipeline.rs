//! Text renderer: one draw call per glyph against that glyph's own
//! texture, all quads packed into one shared dynamic vertex buffer.
//!
//! Per string the transform is `ortho * translate(anchor - halfWidth) *
//! rotate`, written to a dynamic-offset uniform slot; per glyph the local
//! quad (pen advancement already baked in by layout) is written to the
//! glyph's region of the vertex buffer. wgpu executes queued buffer writes
//! before the render pass, so each glyph keeps its own region instead of
//! rewriting a single quad between draws.

use super::{Globals, GLOBALS_SLOT_BYTES};
use crate::chart::{self, Label};
use crate::gpu::GlyphStore;
use crate::layout;
use crate::math;

/// Bytes of one glyph quad: 6 vertices of [x, y, u, v].
const QUAD_BYTES: u64 = 6 * 4 * 4;

struct GlyphDraw {
    /// Dynamic offset of the owning string's uniform slot.
    globals_offset: u32,
    /// Character code, used to bind the glyph's texture.
    code: usize,
    /// Byte offset of this glyph's quad in the vertex buffer.
    vertex_offset: u64,
}

pub struct TextPipeline {
    pipeline: wgpu::RenderPipeline,
    glyph_layout: wgpu::BindGroupLayout,
    globals_layout: wgpu::BindGroupLayout,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    string_capacity: usize,
    vertex_buffer: wgpu::Buffer,
    glyph_capacity: usize,
    draws: Vec<GlyphDraw>,
    projection: math::Mat4,
}

impl TextPipeline {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("text shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/text.wgsl").into()),
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("text globals layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<Globals>() as u64
                    ),
                },
                count: None,
            }],
        });

        let glyph_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("glyph texture layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("text pipeline layout"),
            bind_group_layouts: &[&globals_layout, &glyph_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("text pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: 4 * 4,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
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
        });

        let string_capacity = 8;
        let glyph_capacity = 256;
        let globals_buffer = create_globals_buffer(device, string_capacity);
        let globals_bind_group =
            create_globals_bind_group(device, &globals_layout, &globals_buffer);
        let vertex_buffer = create_vertex_buffer(device, glyph_capacity);

        Self {
            pipeline,
            glyph_layout,
            globals_layout,
            globals_buffer,
            globals_bind_group,
            string_capacity,
            vertex_buffer,
            glyph_capacity,
            draws: Vec::new(),
            projection: math::orthographic(
                chart::SCREEN_WIDTH as f32,
                chart::SCREEN_HEIGHT as f32,
            ),
        }
    }

    /// Layout for the per-glyph texture bind groups the glyph store builds.
    pub fn glyph_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.glyph_layout
    }

    /// Lay out all labels for this frame and queue the buffer writes.
    /// Buffers grow by recreation up front, before any write, so every
    /// queued region lands in the buffer that gets bound.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        store: &GlyphStore,
        labels: &[Label],
    ) {
        self.draws.clear();

        let glyph_count: usize = labels
            .iter()
            .map(|label| layout::layout_line(label.text, store.metrics()).len())
            .sum();
        self.ensure_capacity(device, labels.len(), glyph_count);

        let mut next_glyph = 0u64;
        for (slot, label) in labels.iter().enumerate() {
            next_glyph = self.queue_string(queue, store, label, slot, next_glyph);
        }
    }

    /// The render-text operation for one string: centre on the anchor,
    /// write the string's transform slot, then one quad region per
    /// drawable glyph. An empty string writes its slot and nothing else.
    fn queue_string(
        &mut self,
        queue: &wgpu::Queue,
        store: &GlyphStore,
        label: &Label,
        slot: usize,
        mut next_glyph: u64,
    ) -> u64 {
        let table = store.metrics();
        let half_width = (layout::line_width_px(label.text, table) / 2) as f32;

        let transform = math::multiply(
            &self.projection,
            &math::multiply(
                &math::translation(label.anchor[0] - half_width, label.anchor[1], 0.0),
                &math::rotation_deg(label.rotation_deg),
            ),
        );
        let globals_offset = (slot as u64 * GLOBALS_SLOT_BYTES) as u32;
        queue.write_buffer(
            &self.globals_buffer,
            globals_offset as u64,
            bytemuck::bytes_of(&Globals {
                transform,
                colour: chart::TEXT_COLOUR.to_array(),
            }),
        );

        for glyph in layout::layout_line(label.text, table) {
            let vertex_offset = next_glyph * QUAD_BYTES;
            queue.write_buffer(
                &self.vertex_buffer,
                vertex_offset,
                bytemuck::cast_slice(&glyph.vertices),
            );
            self.draws.push(GlyphDraw {
                globals_offset,
                code: glyph.code,
                vertex_offset,
            });
            next_glyph += 1;
        }
        next_glyph
    }

    /// Issue one 6-vertex draw per queued glyph.
    pub fn render<'pass>(
        &'pass self,
        pass: &mut wgpu::RenderPass<'pass>,
        store: &'pass GlyphStore,
    ) {
        if self.draws.is_empty() {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        for draw in &self.draws {
            pass.set_bind_group(0, &self.globals_bind_group, &[draw.globals_offset]);
            pass.set_bind_group(1, store.bind_group(draw.code), &[]);
            pass.set_vertex_buffer(
                0,
                self.vertex_buffer
                    .slice(draw.vertex_offset..draw.vertex_offset + QUAD_BYTES),
            );
            pass.draw(0..6, 0..1);
        }
    }

    fn ensure_capacity(&mut self, device: &wgpu::Device, strings: usize, glyphs: usize) {
        if strings > self.string_capacity {
            self.string_capacity = strings.next_power_of_two();
            self.globals_buffer = create_globals_buffer(device, self.string_capacity);
            self.globals_bind_group =
                create_globals_bind_group(device, &self.globals_layout, &self.globals_buffer);
        }
        if glyphs > self.glyph_capacity {
            self.glyph_capacity = glyphs.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(device, self.glyph_capacity);
        }
    }
}

fn create_globals_buffer(device: &wgpu::Device, string_capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("text globals"),
        size: string_capacity as u64 * GLOBALS_SLOT_BYTES,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_globals_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("text globals bind group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer,
                offset: 0,
                size: wgpu::BufferSize::new(std::mem::size_of::<Globals>() as u64),
            }),
        }],
    })
}

fn create_vertex_buffer(device: &wgpu::Device, glyph_capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("text vertices"),
        size: glyph_capacity as u64 * QUAD_BYTES,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
