use egui::Context as EguiContext;
use orbitview_camera::OrbitState;

pub const HELP: &str = "Drag: Orbit | Wheel: Zoom | R: Reset | F1: Toggle HUD";

/// Text rows shown in the camera overlay.
pub fn hud_lines(orbit: &OrbitState) -> [String; 3] {
    [
        format!("Azimuth: {:.1}°", orbit.azimuth()),
        format!("Elevation: {:.1}°", orbit.elevation()),
        format!("Distance: {:.3}", orbit.distance()),
    ]
}

/// Camera readout in the top-left corner.
pub fn draw_hud(ctx: &EguiContext, orbit: &OrbitState) {
    egui::Window::new("Camera")
        .anchor(egui::Align2::LEFT_TOP, [8.0, 8.0])
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            for line in hud_lines(orbit) {
                ui.label(line);
            }
            ui.separator();
            ui.small(HELP);
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_show_default_orbit() {
        let lines = hud_lines(&OrbitState::default());
        assert_eq!(lines[0], "Azimuth: 0.0°");
        assert_eq!(lines[1], "Elevation: 15.0°");
        assert_eq!(lines[2], "Distance: 50.000");
    }
}
