//! Viewport input: pointer and wheel events mapped to orbit camera updates.
//!
//! # Invariants
//! - Pointer-move only changes the orbit while a drag is active.
//! - Out-of-range results are clamped, never rejected.
//! - A listener receives events only while its subscription guard is alive.

mod controller;
mod event;
mod subscription;

pub use controller::{ControlSettings, DragState, EventResponse, ViewportController};
pub use event::{Listener, Scope, ViewEvent, WheelDelta};
pub use subscription::{InputRouter, Subscription};
