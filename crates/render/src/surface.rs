use crate::GridLines;
use orbitview_camera::{OrbitState, PerspectiveCamera};
use orbitview_common::{Rgb, ViewerConfig};
use std::fmt::Write;

/// Everything drawn by the viewer. Built once at mount.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub grid: GridLines,
    pub clear_color: Rgb,
}

impl Scene {
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            grid: GridLines::from_config(&config.grid),
            clear_color: config.surface.clear_color,
        }
    }
}

/// One draw request: the scene, the camera to draw it with and the orbit it
/// was derived from (for overlays).
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub scene: &'a Scene,
    pub camera: &'a PerspectiveCamera,
    pub orbit: &'a OrbitState,
}

/// Passive drawing target sized to the window.
///
/// Implementations never mutate the camera or scene; they only size their
/// output and draw what they are given.
pub trait RenderSurface {
    /// Resize the output, in physical pixels.
    fn resize(&mut self, width: u32, height: u32);

    /// Draw one frame.
    fn draw(&mut self, frame: &Frame<'_>);
}

/// Text surface: describes each frame instead of rasterising it.
///
/// Useful for logging and for exercising the view without a GPU.
#[derive(Debug, Default)]
pub struct DebugTextSurface {
    size: (u32, u32),
    frames: Vec<String>,
}

impl DebugTextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Number of draw calls issued so far.
    pub fn draw_count(&self) -> usize {
        self.frames.len()
    }

    pub fn last_frame(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }

    pub fn describe(frame: &Frame<'_>, size: (u32, u32)) -> String {
        let cam = frame.camera;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Frame {}x{} clear={} ===",
            size.0, size.1, frame.scene.clear_color
        );
        let _ = writeln!(
            out,
            "Grid: lines={} spacing={:.2} segments={}",
            frame.scene.grid.line_count(),
            frame.scene.grid.spacing(),
            frame.scene.grid.segment_count()
        );
        let _ = writeln!(
            out,
            "Orbit: azimuth={:.2} elevation={:.2} distance={:.3}",
            frame.orbit.azimuth(),
            frame.orbit.elevation(),
            frame.orbit.distance()
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) aspect={:.3}",
            cam.position.x,
            cam.position.y,
            cam.position.z,
            cam.target.x,
            cam.target.y,
            cam.target.z,
            cam.aspect
        );
        out
    }
}

impl RenderSurface for DebugTextSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn draw(&mut self, frame: &Frame<'_>) {
        let text = Self::describe(frame, self.size);
        tracing::trace!("{text}");
        self.frames.push(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbitview_camera::recompute_pose;

    #[test]
    fn text_surface_describes_frame() {
        let scene = Scene::from_config(&ViewerConfig::default());
        let orbit = OrbitState::default();
        let mut camera = PerspectiveCamera::default();
        camera.apply_pose(&recompute_pose(0.0, 0.0, 50.0));
        camera.set_viewport(200, 100);

        let mut surface = DebugTextSurface::new();
        surface.resize(200, 100);
        surface.draw(&Frame {
            scene: &scene,
            camera: &camera,
            orbit: &orbit,
        });

        assert_eq!(surface.draw_count(), 1);
        let text = surface.last_frame().unwrap();
        assert!(text.contains("200x100"));
        assert!(text.contains("clear=#555555"));
        assert!(text.contains("lines=21"));
        assert!(text.contains("eye=(0.00, 0.00, 50.00)"));
        assert!(text.contains("aspect=2.000"));
    }

    #[test]
    fn new_surface_has_no_frames() {
        let surface = DebugTextSurface::new();
        assert_eq!(surface.draw_count(), 0);
        assert!(surface.last_frame().is_none());
    }
}
