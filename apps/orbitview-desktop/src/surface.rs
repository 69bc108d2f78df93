use crate::error::ViewerError;
use crate::hud;
use egui::Context as EguiContext;
use orbitview_common::ViewerConfig;
use orbitview_render::{Frame, RenderSurface};
use orbitview_render_wgpu::{GridRenderer, MSAA_SAMPLES};
use std::sync::Arc;
use winit::event::WindowEvent;
use winit::window::Window;

/// Window-backed wgpu surface with an optional egui HUD on top of the grid.
pub struct GpuSurface {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: GridRenderer,
    egui_ctx: EguiContext,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    show_hud: bool,
    frame_lost: bool,
}

impl GpuSurface {
    pub fn new(
        window: Arc<Window>,
        viewer: &ViewerConfig,
        show_hud: bool,
    ) -> Result<Self, ViewerError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(ViewerError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("orbitview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(ViewerError::NoSurfaceFormat)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let msaa_supported = adapter
            .get_texture_format_features(surface_format)
            .flags
            .sample_count_supported(MSAA_SAMPLES);
        let antialias = viewer.surface.antialias && msaa_supported;
        if viewer.surface.antialias && !msaa_supported {
            tracing::warn!("{MSAA_SAMPLES}x MSAA unsupported for {surface_format:?}, antialiasing off");
        }

        let renderer = GridRenderer::new(
            &device,
            surface_format,
            antialias,
            config.width,
            config.height,
        );

        let egui_ctx = EguiContext::default();
        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend, format {:?}, msaa {}",
            adapter.get_info().backend.to_str(),
            surface_format,
            renderer.sample_count()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_ctx,
            egui_winit,
            egui_renderer,
            show_hud,
            frame_lost: false,
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn toggle_hud(&mut self) {
        self.show_hud = !self.show_hud;
    }

    /// Feed a window event to egui. Returns `(consumed, repaint)`.
    pub fn on_window_event(&mut self, event: &WindowEvent) -> (bool, bool) {
        if !self.show_hud {
            return (false, false);
        }
        let response = self.egui_winit.on_window_event(&self.window, event);
        (response.consumed, response.repaint)
    }

    /// Whether the last draw was dropped because the surface had to be reconfigured.
    pub fn take_frame_lost(&mut self) -> bool {
        std::mem::take(&mut self.frame_lost)
    }

    fn encode_hud(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        frame: &Frame<'_>,
    ) -> Vec<wgpu::CommandBuffer> {
        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            hud::draw_hud(ctx, frame.orbit);
        });
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let callbacks = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("hud_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        callbacks
    }
}

impl RenderSurface for GpuSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    fn draw(&mut self, frame: &Frame<'_>) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                self.frame_lost = true;
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        self.renderer.encode(
            &self.device,
            &self.queue,
            &mut encoder,
            &view,
            frame.scene,
            frame.camera,
        );

        let callbacks = if self.show_hud {
            self.encode_hud(&mut encoder, &view, frame)
        } else {
            Vec::new()
        };

        self.queue
            .submit(callbacks.into_iter().chain(std::iter::once(encoder.finish())));
        output.present();
    }
}
