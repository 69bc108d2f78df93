use glam::Vec2;

/// Normalised scroll-wheel signal.
///
/// Input devices report scrolling either as a legacy notch value (120 per
/// notch, positive when the wheel moves away from the user) or as a standard
/// vertical delta (positive when the wheel moves towards the user).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelDelta {
    Legacy(f32),
    Standard(f32),
}

impl WheelDelta {
    /// One wheel notch in legacy units.
    pub const NOTCH: f32 = 120.0;

    /// Pick the signal the way a browser wheel event is read: a legacy value
    /// wins unless it is absent or zero.
    pub fn from_raw(wheel_delta: Option<f32>, delta_y: f32) -> Self {
        match wheel_delta {
            Some(w) if w != 0.0 => Self::Legacy(w),
            _ => Self::Standard(delta_y),
        }
    }
}

/// A raw UI event addressed to the main view. Positions are canvas-local
/// logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewEvent {
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp,
    Wheel(WheelDelta),
    Resize { width: u32, height: u32 },
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    /// Only while the cursor is over the drawing surface.
    Canvas,
    /// Everywhere, so drags keep tracking outside the canvas.
    Document,
    Window,
}

/// The listeners a view registers, one per event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Listener {
    PointerDown,
    PointerMove,
    PointerUp,
    Wheel,
    Resize,
}

impl Listener {
    pub const ALL: [Listener; 5] = [
        Listener::PointerUp,
        Listener::PointerMove,
        Listener::Wheel,
        Listener::PointerDown,
        Listener::Resize,
    ];

    pub fn scope(self) -> Scope {
        match self {
            Listener::PointerDown | Listener::Wheel => Scope::Canvas,
            Listener::PointerMove | Listener::PointerUp => Scope::Document,
            Listener::Resize => Scope::Window,
        }
    }
}

impl ViewEvent {
    /// The listener that receives this event.
    pub fn listener(&self) -> Listener {
        match self {
            ViewEvent::PointerDown(_) => Listener::PointerDown,
            ViewEvent::PointerMove(_) => Listener::PointerMove,
            ViewEvent::PointerUp => Listener::PointerUp,
            ViewEvent::Wheel(_) => Listener::Wheel,
            ViewEvent::Resize { .. } => Listener::Resize,
        }
    }
}
