//! Rendering adapter: renderer-agnostic surface interface and the main view.
//!
//! # Invariants
//! - Surfaces never mutate camera or scene state.
//! - The grid is built once at mount; only camera parameters change afterwards.
//! - At most one draw call per state change.

mod grid;
mod surface;
mod view;

pub use grid::{FLOATS_PER_LINE, GridLines, build_grid_buffer};
pub use surface::{DebugTextSurface, Frame, RenderSurface, Scene};
pub use view::MainView;
