//! Shared types for the orbit viewer: configuration and colours.
//!
//! # Invariants
//! - A `ViewerConfig` returned by `load`/`from_yaml` has passed `validate`.

mod config;
mod types;

pub use config::{
    CameraConfig, ConfigError, ControlConfig, GridConfig, SurfaceConfig, ViewerConfig,
    WindowConfig,
};
pub use types::{ParseRgbError, Rgb};
