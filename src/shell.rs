//! Frame driver: window, event loop, and the per-frame draw sequence.
//!
//! Single-threaded and synchronous: poll events, clear, draw the fixed
//! sequence (fill, spokes, perimeter, labels), present, repeat until the
//! window closes. All GPU state is built once in `resumed`; wgpu resources
//! release exactly once when the state drops on exit.

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::chart::{self, Label};
use crate::gpu::{ChartPipeline, GlyphStore, GpuState, TextPipeline};

/// Everything needed to redraw the frame.
struct RenderState {
    gpu: GpuState,
    chart: ChartPipeline,
    text: TextPipeline,
    glyphs: GlyphStore,
    labels: Vec<Label>,
}

struct App {
    window: Option<Arc<Window>>,
    render: Option<RenderState>,
    /// Fatal startup error, propagated out of the event loop.
    init_error: Option<anyhow::Error>,
}

pub fn run() -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App {
        window: None,
        render: None,
        init_error: None,
    };
    event_loop
        .run_app(&mut app)
        .context("event loop terminated abnormally")?;
    match app.init_error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

impl App {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let attributes = Window::default_attributes()
            .with_title("hexplot")
            .with_inner_size(LogicalSize::new(chart::SCREEN_WIDTH, chart::SCREEN_HEIGHT));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("failed to create window")?,
        );

        let gpu = GpuState::new(window.clone())?;

        // Font initialization is the one fatal runtime dependency.
        let font_data = std::fs::read(chart::FONT_PATH)
            .with_context(|| format!("failed to read font file `{}`", chart::FONT_PATH))?;
        let text = TextPipeline::new(&gpu.device, gpu.config.format);
        let glyphs = GlyphStore::new(
            &gpu.device,
            &gpu.queue,
            text.glyph_bind_group_layout(),
            &font_data,
            chart::FONT_SIZE_PX,
        )?;

        let chart_pipeline = ChartPipeline::new(&gpu.device, &gpu.queue, gpu.config.format);

        info!(
            width = gpu.config.width,
            height = gpu.config.height,
            format = ?gpu.config.format,
            "graphics state initialized"
        );

        self.render = Some(RenderState {
            gpu,
            chart: chart_pipeline,
            text,
            glyphs,
            labels: chart::labels().to_vec(),
        });
        self.window = Some(window);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render) = self.render.as_mut() else {
            return;
        };

        let surface_texture = match render.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = (render.gpu.config.width, render.gpu.config.height);
                render.gpu.resize(width, height);
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("surface timeout, skipping frame");
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("surface out of memory");
                event_loop.exit();
                return;
            }
        };

        render
            .text
            .prepare(&render.gpu.device, &render.gpu.queue, &render.glyphs, &render.labels);

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = render
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });

        {
            let background = chart::BACKGROUND_COLOUR;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("chart pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: background.r as f64,
                            g: background.g as f64,
                            b: background.b as f64,
                            a: background.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render.chart.draw(&mut pass);
            render.text.render(&mut pass, &render.glyphs);
        }

        render.gpu.queue.submit(Some(encoder.finish()));
        surface_texture.present();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        event_loop.set_control_flow(ControlFlow::Poll);
        if let Err(err) = self.init(event_loop) {
            error!("startup failed: {err:#}");
            self.init_error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("window close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(render) = self.render.as_mut() {
                    render.gpu.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
