use anyhow::Result;
use clap::Parser;
use glam::Vec2;
use orbitview_common::ViewerConfig;
use orbitview_input::{EventResponse, InputRouter, ViewEvent, WheelDelta};
use orbitview_render::MainView;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalPosition, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId};

mod error;
mod hud;
mod surface;

use error::ViewerError;
use surface::GpuSurface;

#[derive(Parser)]
#[command(name = "orbitview-desktop", about = "Orbit viewer for a 3D reference grid")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial window width in physical pixels
    #[arg(long)]
    width: Option<u32>,

    /// Initial window height in physical pixels
    #[arg(long)]
    height: Option<u32>,

    /// Start in borderless fullscreen
    #[arg(long)]
    fullscreen: bool,

    /// Hide the camera HUD (F1 toggles it at runtime)
    #[arg(long)]
    no_hud: bool,
}

/// Translate a winit wheel delta into the signal the controller expects.
///
/// Line deltas are whole notches (legacy units, positive away from the
/// user); pixel deltas become a standard delta in logical pixels, positive
/// towards the user.
fn wheel_delta(delta: MouseScrollDelta, scale_factor: f64) -> WheelDelta {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => WheelDelta::from_raw(Some(y * WheelDelta::NOTCH), 0.0),
        MouseScrollDelta::PixelDelta(pos) => {
            let logical: LogicalPosition<f32> = pos.to_logical(scale_factor);
            WheelDelta::from_raw(None, -logical.y)
        }
    }
}

/// Whether a cursor position lies on the canvas, which fills the window.
fn inside(position: PhysicalPosition<f64>, size: PhysicalSize<u32>) -> bool {
    position.x >= 0.0
        && position.y >= 0.0
        && position.x < size.width as f64
        && position.y < size.height as f64
}

fn logical_cursor(position: PhysicalPosition<f64>, scale_factor: f64) -> Vec2 {
    let logical: LogicalPosition<f32> = position.to_logical(scale_factor);
    Vec2::new(logical.x, logical.y)
}

struct ViewerApp {
    config: ViewerConfig,
    fullscreen: bool,
    show_hud: bool,
    router: InputRouter,
    view: Option<MainView<GpuSurface>>,
    /// Last cursor position in logical pixels.
    cursor: Vec2,
    scale_factor: f64,
    error: Option<ViewerError>,
}

impl ViewerApp {
    fn new(config: ViewerConfig, fullscreen: bool, show_hud: bool) -> Self {
        Self {
            config,
            fullscreen,
            show_hud,
            router: InputRouter::new(),
            view: None,
            cursor: Vec2::ZERO,
            scale_factor: 1.0,
            error: None,
        }
    }

    fn mount(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let mut attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        if self.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        let window = Arc::new(event_loop.create_window(attrs)?);
        self.scale_factor = window.scale_factor();

        let surface = GpuSurface::new(window.clone(), &self.config, self.show_hud)?;
        let size = window.inner_size();
        self.view = Some(MainView::mount(
            &self.router,
            &self.config,
            surface,
            size.width,
            size.height,
        ));
        window.request_redraw();
        Ok(())
    }

    fn unmount(&mut self) {
        if let Some(view) = self.view.take() {
            drop(view.unmount());
        }
    }

    /// Map a window event onto a view event, tracking cursor and hover state.
    fn translate(&mut self, event: &WindowEvent) -> Option<ViewEvent> {
        match *event {
            WindowEvent::CursorMoved { position, .. } => {
                // Some platforms never send CursorEntered for a cursor that
                // starts inside the window.
                if let Some(view) = &self.view {
                    let size = view.surface().window().inner_size();
                    self.router.set_hovering(inside(position, size));
                }
                self.cursor = logical_cursor(position, self.scale_factor);
                Some(ViewEvent::PointerMove(self.cursor))
            }
            WindowEvent::CursorEntered { .. } => {
                self.router.set_hovering(true);
                None
            }
            WindowEvent::CursorLeft { .. } => {
                self.router.set_hovering(false);
                None
            }
            WindowEvent::MouseInput { state, .. } => Some(match state {
                ElementState::Pressed => ViewEvent::PointerDown(self.cursor),
                ElementState::Released => ViewEvent::PointerUp,
            }),
            WindowEvent::MouseWheel { delta, .. } => {
                Some(ViewEvent::Wheel(wheel_delta(delta, self.scale_factor)))
            }
            WindowEvent::Resized(size) => Some(ViewEvent::Resize {
                width: size.width,
                height: size.height,
            }),
            _ => None,
        }
    }

    fn request_redraw(&self) {
        if let Some(view) = &self.view {
            view.surface().window().request_redraw();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.view.is_some() {
            return;
        }
        if let Err(e) = self.mount(event_loop) {
            tracing::error!("failed to start viewer: {e}");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(view) = &mut self.view else {
            return;
        };

        let (hud_consumed, hud_repaint) = view.surface_mut().on_window_event(&event);
        if hud_repaint {
            view.invalidate();
            view.surface().window().request_redraw();
        }
        // Releases always reach the view so a drag never gets stuck.
        let is_release = matches!(
            event,
            WindowEvent::MouseInput {
                state: ElementState::Released,
                ..
            }
        );
        if hud_consumed && !is_release {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.unmount();
                event_loop.exit();
                return;
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = scale_factor;
                return;
            }
            WindowEvent::RedrawRequested => {
                // Also sent by the OS on expose, when nothing is dirty.
                view.repaint();
                if view.surface_mut().take_frame_lost() {
                    view.invalidate();
                    view.surface().window().request_redraw();
                }
                return;
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                let response = match key {
                    KeyCode::F1 => {
                        view.surface_mut().toggle_hud();
                        view.invalidate();
                        EventResponse {
                            redraw: true,
                            consumed: true,
                        }
                    }
                    KeyCode::KeyR => view.reset(),
                    KeyCode::Escape if self.fullscreen => {
                        self.unmount();
                        event_loop.exit();
                        return;
                    }
                    _ => EventResponse::default(),
                };
                if response.redraw {
                    self.request_redraw();
                }
                return;
            }
            _ => {}
        }

        let Some(view_event) = self.translate(&event) else {
            return;
        };
        if !self.router.route(&view_event) {
            return;
        }
        let Some(view) = &mut self.view else {
            return;
        };
        let response = view.handle(&view_event);
        if response.redraw {
            self.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.unmount();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    tracing::info!("orbitview-desktop starting");

    let mut config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    if let Some(width) = cli.width {
        config.window.width = width;
    }
    if let Some(height) = cli.height {
        config.window.height = height;
    }
    config.validate()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = ViewerApp::new(config, cli.fullscreen, !cli.no_hud);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.error.take() {
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_delta_is_legacy_notches() {
        let d = wheel_delta(MouseScrollDelta::LineDelta(0.0, 1.0), 1.0);
        assert_eq!(d, WheelDelta::Legacy(120.0));
    }

    #[test]
    fn zero_line_delta_falls_back_to_standard() {
        let d = wheel_delta(MouseScrollDelta::LineDelta(0.0, 0.0), 1.0);
        assert_eq!(d, WheelDelta::Standard(0.0));
    }

    #[test]
    fn pixel_delta_is_logical_and_flipped() {
        let d = wheel_delta(
            MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 40.0)),
            2.0,
        );
        assert_eq!(d, WheelDelta::Standard(-20.0));
    }

    #[test]
    fn cursor_bounds_are_half_open() {
        let size = PhysicalSize::new(800, 600);
        assert!(inside(PhysicalPosition::new(0.0, 0.0), size));
        assert!(inside(PhysicalPosition::new(799.5, 599.5), size));
        assert!(!inside(PhysicalPosition::new(800.0, 10.0), size));
        assert!(!inside(PhysicalPosition::new(10.0, 600.0), size));
        assert!(!inside(PhysicalPosition::new(-1.0, 10.0), size));
        assert!(!inside(PhysicalPosition::new(10.0, -0.5), size));
    }

    #[test]
    fn cursor_is_converted_to_logical_pixels() {
        let cursor = logical_cursor(PhysicalPosition::new(200.0, 100.0), 2.0);
        assert_eq!(cursor, Vec2::new(100.0, 50.0));
        let cursor = logical_cursor(PhysicalPosition::new(30.0, 45.0), 1.0);
        assert_eq!(cursor, Vec2::new(30.0, 45.0));
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from(["orbitview-desktop", "-v", "--width", "640", "--no-hud"]);
        assert!(cli.verbose);
        assert_eq!(cli.width, Some(640));
        assert!(cli.no_hud);
        assert!(cli.config.is_none());
    }
}
