//! Orbit camera: orientation state, derived pose and perspective projection.
//!
//! # Invariants
//! - Elevation and distance are inside their limits after every update.
//! - The pose is a pure function of the orientation; it is never stored apart from it.

mod orbit;
mod perspective;

pub use orbit::{OrbitLimits, OrbitPose, OrbitState, recompute_pose};
pub use perspective::PerspectiveCamera;
