//! Glyph store: rasterizes the supported character range once at startup
//! and uploads every glyph as an independent single-channel texture.

use anyhow::anyhow;
use fontdue::{Font, FontSettings};

use crate::layout::{metrics_from_raster, GlyphMetrics, GlyphTable, GLYPH_TABLE_SIZE};

/// One GPU texture + bind group per character code 0..128, plus the metrics
/// table consumed by layout. Built once; the textures live until the store
/// drops at shutdown.
pub struct GlyphStore {
    metrics: GlyphTable,
    bind_groups: Vec<wgpu::BindGroup>,
}

impl GlyphStore {
    /// Parse the font and rasterize every supported code at the fixed pixel
    /// size. A failed parse is fatal; a glyph the font cannot produce gets
    /// a zero-size entry backed by a 1x1 placeholder texture (wgpu forbids
    /// zero-extent textures) and renders as nothing.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        glyph_layout: &wgpu::BindGroupLayout,
        font_data: &[u8],
        font_size: f32,
    ) -> anyhow::Result<Self> {
        let font = Font::from_bytes(font_data, FontSettings::default())
            .map_err(|e| anyhow!("failed to parse font: {e}"))?;

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("glyph sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let mut metrics = [GlyphMetrics::default(); GLYPH_TABLE_SIZE];
        let mut bind_groups = Vec::with_capacity(GLYPH_TABLE_SIZE);

        for code in 0..GLYPH_TABLE_SIZE {
            let ch = code as u8 as char;
            let (raster, bitmap) = font.rasterize(ch, font_size);
            metrics[code] = metrics_from_raster(
                raster.width,
                raster.height,
                raster.xmin,
                raster.ymin,
                raster.advance_width,
            );

            let texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("glyph texture"),
                size: wgpu::Extent3d {
                    width: (raster.width as u32).max(1),
                    height: (raster.height as u32).max(1),
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::R8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });

            if raster.width > 0 && raster.height > 0 {
                queue.write_texture(
                    wgpu::ImageCopyTexture {
                        texture: &texture,
                        mip_level: 0,
                        origin: wgpu::Origin3d::ZERO,
                        aspect: wgpu::TextureAspect::All,
                    },
                    &bitmap,
                    wgpu::ImageDataLayout {
                        offset: 0,
                        bytes_per_row: Some(raster.width as u32),
                        rows_per_image: Some(raster.height as u32),
                    },
                    wgpu::Extent3d {
                        width: raster.width as u32,
                        height: raster.height as u32,
                        depth_or_array_layers: 1,
                    },
                );
            }

            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
            bind_groups.push(device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("glyph bind group"),
                layout: glyph_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&sampler),
                    },
                ],
            }));
        }

        Ok(Self {
            metrics,
            bind_groups,
        })
    }

    pub fn metrics(&self) -> &GlyphTable {
        &self.metrics
    }

    pub fn bind_group(&self, code: usize) -> &wgpu::BindGroup {
        &self.bind_groups[code]
    }
}
