use crate::{ViewEvent, WheelDelta};
use glam::Vec2;
use orbitview_camera::{OrbitPose, OrbitState};
use orbitview_common::ControlConfig;

/// Input sensitivities for the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSettings {
    /// Degrees per logical pixel of drag.
    pub rotate_speed: f32,
    pub legacy_wheel_scale: f32,
    pub wheel_scale: f32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self::from(&ControlConfig::default())
    }
}

impl From<&ControlConfig> for ControlSettings {
    fn from(config: &ControlConfig) -> Self {
        Self {
            rotate_speed: config.rotate_speed,
            legacy_wheel_scale: config.legacy_wheel_scale,
            wheel_scale: config.wheel_scale,
        }
    }
}

impl ControlSettings {
    /// Zoom increment for a wheel signal.
    pub fn zoom_increment(&self, delta: WheelDelta) -> f32 {
        match delta {
            WheelDelta::Legacy(w) => w * self.legacy_wheel_scale,
            WheelDelta::Standard(dy) => dy * self.wheel_scale,
        }
    }
}

/// Pointer drag state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { anchor: Vec2 },
}

/// What the caller should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResponse {
    /// The camera changed and a new frame should be drawn.
    pub redraw: bool,
    /// The platform's default handling (page scrolling) must be skipped.
    pub consumed: bool,
}

impl EventResponse {
    const IGNORED: Self = Self {
        redraw: false,
        consumed: false,
    };
    const REDRAW: Self = Self {
        redraw: true,
        consumed: false,
    };
}

/// Translates pointer and wheel events into orbit updates.
///
/// Owns the orbit state and the drag state; nothing else mutates them.
#[derive(Debug, Clone)]
pub struct ViewportController {
    orbit: OrbitState,
    initial: OrbitState,
    drag: DragState,
    settings: ControlSettings,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(OrbitState::default(), ControlSettings::default())
    }
}

impl ViewportController {
    pub fn new(orbit: OrbitState, settings: ControlSettings) -> Self {
        Self {
            orbit,
            initial: orbit,
            drag: DragState::Idle,
            settings,
        }
    }

    pub fn orbit(&self) -> &OrbitState {
        &self.orbit
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn pose(&self) -> OrbitPose {
        self.orbit.pose()
    }

    /// Dispatch a raw event. Resize only asks for a redraw here; the view
    /// owns the surface and camera aspect.
    pub fn handle(&mut self, event: &ViewEvent) -> EventResponse {
        match *event {
            ViewEvent::PointerDown(pos) => {
                self.pointer_down(pos);
                EventResponse::IGNORED
            }
            ViewEvent::PointerMove(pos) => self.pointer_move(pos),
            ViewEvent::PointerUp => {
                self.pointer_up();
                EventResponse::IGNORED
            }
            ViewEvent::Wheel(delta) => self.wheel(delta),
            ViewEvent::Resize { .. } => EventResponse::REDRAW,
        }
    }

    pub fn pointer_down(&mut self, position: Vec2) {
        self.drag = DragState::Dragging { anchor: position };
        tracing::debug!(x = position.x, y = position.y, "drag start");
    }

    pub fn pointer_move(&mut self, position: Vec2) -> EventResponse {
        let DragState::Dragging { anchor } = self.drag else {
            return EventResponse::IGNORED;
        };

        let delta = position - anchor;
        let speed = self.settings.rotate_speed;
        self.orbit.rotate(-delta.x * speed, delta.y * speed);
        self.drag = DragState::Dragging { anchor: position };

        tracing::debug!(
            azimuth = self.orbit.azimuth(),
            elevation = self.orbit.elevation(),
            "orbit"
        );
        EventResponse::REDRAW
    }

    pub fn pointer_up(&mut self) {
        if self.is_dragging() {
            tracing::debug!("drag end");
        }
        self.drag = DragState::Idle;
    }

    pub fn wheel(&mut self, delta: WheelDelta) -> EventResponse {
        self.orbit.zoom(self.settings.zoom_increment(delta));
        tracing::debug!(distance = self.orbit.distance(), "zoom");
        EventResponse {
            redraw: true,
            consumed: true,
        }
    }

    /// Restore the orientation the controller was created with.
    pub fn reset(&mut self) -> EventResponse {
        self.orbit = self.initial;
        self.drag = DragState::Idle;
        EventResponse::REDRAW
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbitview_camera::OrbitLimits;

    fn controller() -> ViewportController {
        ViewportController::default()
    }

    #[test]
    fn starts_idle() {
        let c = controller();
        assert_eq!(c.drag(), DragState::Idle);
        assert_eq!(c.orbit().elevation(), 15.0);
    }

    #[test]
    fn move_while_idle_is_noop() {
        let mut c = controller();
        let before = *c.orbit();
        let resp = c.pointer_move(Vec2::new(100.0, 100.0));
        assert!(!resp.redraw);
        assert_eq!(*c.orbit(), before);
        assert_eq!(c.drag(), DragState::Idle);
    }

    #[test]
    fn drag_rotates_and_moves_anchor() {
        let mut c = controller();
        c.pointer_down(Vec2::new(10.0, 10.0));
        assert!(c.is_dragging());

        let resp = c.pointer_move(Vec2::new(14.0, 18.0));
        assert!(resp.redraw);
        assert!(!resp.consumed);
        assert_eq!(c.orbit().azimuth(), -1.0);
        assert_eq!(c.orbit().elevation(), 17.0);
        assert_eq!(
            c.drag(),
            DragState::Dragging {
                anchor: Vec2::new(14.0, 18.0)
            }
        );

        // Deltas are relative to the updated anchor.
        c.pointer_move(Vec2::new(14.0, 18.0));
        assert_eq!(c.orbit().azimuth(), -1.0);
        assert_eq!(c.orbit().elevation(), 17.0);
    }

    #[test]
    fn pointer_up_ends_drag() {
        let mut c = controller();
        c.pointer_down(Vec2::ZERO);
        c.pointer_up();
        assert_eq!(c.drag(), DragState::Idle);
        let before = *c.orbit();
        c.pointer_move(Vec2::new(50.0, 50.0));
        assert_eq!(*c.orbit(), before);
    }

    #[test]
    fn drag_clamps_elevation() {
        let mut c = controller();
        c.pointer_down(Vec2::ZERO);
        c.pointer_move(Vec2::new(0.0, 10_000.0));
        assert_eq!(c.orbit().elevation(), 89.9);
        c.pointer_move(Vec2::new(0.0, -10_000.0));
        assert_eq!(c.orbit().elevation(), -89.9);
    }

    #[test]
    fn wheel_legacy_and_standard_scales() {
        let mut c = controller();
        let resp = c.wheel(WheelDelta::Legacy(120.0));
        assert!(resp.redraw && resp.consumed);
        assert!((c.orbit().distance() - 86.0).abs() < 1e-4);

        c.wheel(WheelDelta::Standard(-100.0));
        assert!((c.orbit().distance() - 83.0).abs() < 1e-4);
    }

    #[test]
    fn wheel_clamps_distance() {
        let mut c = controller();
        for _ in 0..100 {
            c.wheel(WheelDelta::Legacy(-120.0));
        }
        assert_eq!(c.orbit().distance(), 0.001);
        for _ in 0..100 {
            c.wheel(WheelDelta::Legacy(120.0));
        }
        assert_eq!(c.orbit().distance(), 1000.0);
    }

    #[test]
    fn resize_requests_redraw_without_touching_orbit() {
        let mut c = controller();
        let before = *c.orbit();
        let resp = c.handle(&ViewEvent::Resize {
            width: 800,
            height: 600,
        });
        assert!(resp.redraw);
        assert_eq!(*c.orbit(), before);
    }

    #[test]
    fn handle_dispatches_pointer_events() {
        let mut c = controller();
        c.handle(&ViewEvent::PointerDown(Vec2::ZERO));
        assert!(c.is_dragging());
        assert!(c.handle(&ViewEvent::PointerMove(Vec2::new(4.0, 0.0))).redraw);
        c.handle(&ViewEvent::PointerUp);
        assert!(!c.is_dragging());
    }

    #[test]
    fn reset_restores_initial_orientation() {
        let orbit = OrbitState::new(10.0, 20.0, 30.0, OrbitLimits::default());
        let mut c = ViewportController::new(orbit, ControlSettings::default());
        c.pointer_down(Vec2::ZERO);
        c.pointer_move(Vec2::new(40.0, 40.0));
        c.wheel(WheelDelta::Standard(100.0));
        assert!(c.reset().redraw);
        assert_eq!(*c.orbit(), orbit);
        assert!(!c.is_dragging());
    }

    #[test]
    fn custom_settings_apply() {
        let settings = ControlSettings {
            rotate_speed: 1.0,
            ..ControlSettings::default()
        };
        let mut c = ViewportController::new(OrbitState::default(), settings);
        c.pointer_down(Vec2::ZERO);
        c.pointer_move(Vec2::new(5.0, 0.0));
        assert_eq!(c.orbit().azimuth(), -5.0);
    }
}
