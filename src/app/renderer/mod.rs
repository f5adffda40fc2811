//! Rendering module: wgpu scene pass with an egui overlay
//!
//! ## Architecture
//!
//! - `scene`: converts a [`FrameSnapshot`] into rects and lines
//! - the [`ShaderRegistry`] draws them (rects first, then hitbox lines)
//! - egui is drawn in a second pass on top of the scene

use std::sync::Arc;

use egui::Context;
use tracing::info;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};
use winit::event::WindowEvent;
use winit::window::Window;

use super::line_renderer::LineRenderer;
use super::rect_renderer::RectRenderer;
use super::shader_system::ShaderRegistry;
use crate::sim::FrameSnapshot;

pub mod scene;
use scene::SceneBuilder;

/// Renderer handles wgpu setup, the scene pass and egui rendering
pub struct Renderer {
    surface: Surface<'static>,
    device: Device,
    queue: Queue,
    config: SurfaceConfiguration,
    adapter_info: wgpu::AdapterInfo,
    egui_ctx: Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    shader_registry: ShaderRegistry,
    scene_builder: SceneBuilder,
}

impl Renderer {
    /// Returns a reference to the surface configuration
    pub fn config(&self) -> &SurfaceConfiguration {
        &self.config
    }

    /// Adapter the renderer runs on
    pub fn adapter_info(&self) -> &wgpu::AdapterInfo {
        &self.adapter_info
    }

    /// Creates a new renderer for the given window
    ///
    /// `field` is the logical size of the game field and `background_width`
    /// the width of one city layer tile.
    pub async fn new(
        window: Arc<Window>,
        field: [f32; 2],
        background_width: f32,
        vsync: bool,
    ) -> anyhow::Result<Self> {
        info!("Initializing wgpu renderer");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        let adapter_info = adapter.get_info();
        info!(
            adapter.name = adapter_info.name,
            adapter.backend = ?adapter_info.backend,
            "Found GPU adapter"
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Main Device"),
                ..Default::default()
            })
            .await?;

        let config = surface_config(
            &surface.get_capabilities(&adapter),
            window.inner_size(),
            vsync,
        )?;
        surface.configure(&device, &config);
        info!(
            surface.width = config.width,
            surface.height = config.height,
            surface.format = ?config.format,
            "Surface configured"
        );

        let egui_ctx = Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &device,
            config.format,
            egui_wgpu::RendererOptions {
                msaa_samples: 1,
                ..Default::default()
            },
        );

        // Registration order is draw order: hitbox lines go over the rects
        let mut shader_registry = ShaderRegistry::new();
        shader_registry.register(Box::new(RectRenderer::new(field)));
        shader_registry.register(Box::new(LineRenderer::new(field)));
        shader_registry.init_all(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            adapter_info,
            egui_ctx,
            egui_state,
            egui_renderer,
            shader_registry,
            scene_builder: SceneBuilder::new(background_width, field[1]),
        })
    }

    /// Handles window events for egui
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.egui_state.on_window_event(window, event);
        response.consumed
    }

    /// Resizes the surface
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);

            info!(
                width = new_size.width,
                height = new_size.height,
                "Surface resized"
            );
        }
    }

    /// Renders a frame: the scene for `snapshot`, then the egui UI on top
    pub fn draw(
        &mut self,
        window: &Window,
        snapshot: &FrameSnapshot,
        show_hitboxes: bool,
        render_ui: impl FnMut(&Context),
    ) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.encode_scene(&mut encoder, &view, snapshot, show_hitboxes);
        self.encode_ui(&mut encoder, &view, window, render_ui);

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Clears to the scene colour and draws the snapshot's rects and lines
    fn encode_scene(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        snapshot: &FrameSnapshot,
        show_hitboxes: bool,
    ) {
        let scene = self.scene_builder.build(snapshot, show_hitboxes);
        if let Some(rects) = self.shader_registry.get_typed_mut::<RectRenderer>("rect") {
            scene.rects.into_iter().for_each(|rect| rects.draw_rect(rect));
        }
        if let Some(lines) = self.shader_registry.get_typed_mut::<LineRenderer>("line") {
            scene.lines.into_iter().for_each(|line| lines.draw_line(line));
        }
        self.shader_registry.begin_frame(&self.device, &self.queue);

        let [r, g, b, a] = scene.clear_color.map(f64::from);
        let mut rpass = begin_pass(
            encoder,
            view,
            "Scene Render Pass",
            wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
        );
        self.shader_registry.render_all(&mut rpass);
        drop(rpass);

        self.shader_registry.end_frame();
    }

    /// Runs the egui frame and draws it over the scene
    fn encode_ui(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        window: &Window,
        mut render_ui: impl FnMut(&Context),
    ) {
        let raw_input = self.egui_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| render_ui(ctx));
        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: window.scale_factor() as f32,
        };
        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            encoder,
            &tris,
            &screen_descriptor,
        );

        // forget_lifetime() because egui_wgpu wants a 'static pass
        let rpass = begin_pass(encoder, view, "Egui Render Pass", wgpu::LoadOp::Load);
        self.egui_renderer
            .render(&mut rpass.forget_lifetime(), &tris, &screen_descriptor);

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

fn begin_pass<'a>(
    encoder: &'a mut wgpu::CommandEncoder,
    view: &'a wgpu::TextureView,
    label: &'static str,
    load: wgpu::LoadOp<wgpu::Color>,
) -> wgpu::RenderPass<'a> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load,
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    })
}

/// Picks an sRGB format when available and the present mode for `vsync`
fn surface_config(
    caps: &wgpu::SurfaceCapabilities,
    size: winit::dpi::PhysicalSize<u32>,
    vsync: bool,
) -> anyhow::Result<SurfaceConfiguration> {
    let format = caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| caps.formats.first())
        .copied()
        .ok_or_else(|| anyhow::anyhow!("surface reports no supported formats"))?;

    Ok(SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: if vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        },
        alpha_mode: caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto),
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    })
}
