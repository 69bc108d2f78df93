//! wgpu render backend for the orbit viewer.
//!
//! Draws the reference grid as a line list with a single view-projection
//! uniform. Overlays (HUD) are encoded by the caller after the grid pass.
//!
//! # Invariants
//! - The grid vertex buffer is uploaded once; frames only rewrite the uniform.
//! - Renderer never mutates camera or scene state.

mod gpu;
mod shaders;

pub use gpu::{GridRenderer, MSAA_SAMPLES};
