use crate::Rgb;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors produced while loading or validating a [`ViewerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Top-level viewer configuration. Every field has a default, so an empty
/// YAML document is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub controls: ControlConfig,
    pub grid: GridConfig,
    pub surface: SurfaceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "orbitview".into(),
            width: 1280,
            height: 720,
        }
    }
}

/// Projection parameters and the initial orbit orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Initial azimuth in degrees.
    pub azimuth: f32,
    /// Initial elevation in degrees.
    pub elevation: f32,
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 1500.0,
            azimuth: 0.0,
            elevation: 15.0,
            distance: 50.0,
        }
    }
}

/// Input sensitivities and orbit clamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Degrees of rotation per logical pixel of drag.
    pub rotate_speed: f32,
    /// Scale applied to legacy `wheelDelta`-style signals (120 per notch).
    pub legacy_wheel_scale: f32,
    /// Scale applied to standard `deltaY`-style signals.
    pub wheel_scale: f32,
    /// Elevation is clamped to `[-elevation_limit, elevation_limit]`.
    pub elevation_limit: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            rotate_speed: 0.25,
            legacy_wheel_scale: 0.3,
            wheel_scale: 0.03,
            elevation_limit: 89.9,
            min_distance: 0.001,
            max_distance: 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub line_count: usize,
    pub spacing: f32,
    pub color: Rgb,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            line_count: 21,
            spacing: 10.0,
            color: Rgb::from_hex(0x7f7f7f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub clear_color: Rgb,
    pub antialias: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            clear_color: Rgb::from_hex(0x555555),
            antialias: true,
        }
    }
}

impl ViewerConfig {
    /// Parse a config from YAML text and validate it.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty mapping.
        let config: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&text)?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
            ConfigError::Invalid { field, reason }
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(invalid("window", "width and height must be at least 1"));
        }

        let cam = &self.camera;
        if !(cam.fov_y_degrees > 0.0 && cam.fov_y_degrees < 180.0) {
            return Err(invalid("camera.fov_y_degrees", "must be in (0, 180)"));
        }
        if !(cam.near > 0.0 && cam.far > cam.near) {
            return Err(invalid("camera.near", "must satisfy 0 < near < far"));
        }
        if !cam.azimuth.is_finite() || !cam.elevation.is_finite() {
            return Err(invalid("camera.azimuth", "orientation must be finite"));
        }
        if !cam.distance.is_finite() {
            return Err(invalid("camera.distance", "must be finite"));
        }

        let ctl = &self.controls;
        if !(ctl.elevation_limit > 0.0 && ctl.elevation_limit < 90.0) {
            return Err(invalid("controls.elevation_limit", "must be in (0, 90)"));
        }
        if !(ctl.min_distance > 0.0 && ctl.max_distance > ctl.min_distance) {
            return Err(invalid(
                "controls.min_distance",
                "must satisfy 0 < min_distance < max_distance",
            ));
        }
        if !ctl.rotate_speed.is_finite()
            || !ctl.wheel_scale.is_finite()
            || !ctl.legacy_wheel_scale.is_finite()
        {
            return Err(invalid("controls", "speeds must be finite"));
        }

        if self.grid.line_count == 0 {
            return Err(invalid("grid.line_count", "must be at least 1"));
        }
        if !(self.grid.spacing > 0.0 && self.grid.spacing.is_finite()) {
            return Err(invalid("grid.spacing", "must be positive"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = ViewerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.camera.elevation, 15.0);
        assert_eq!(config.camera.distance, 50.0);
        assert_eq!(config.grid.line_count, 21);
        assert_eq!(config.controls.elevation_limit, 89.9);
    }

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = ViewerConfig::from_yaml("").unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn partial_yaml_overrides_fields() {
        let yaml = "grid:\n  line_count: 11\n  color: \"#ff0000\"\ncamera:\n  distance: 20.0\n";
        let config = ViewerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.grid.line_count, 11);
        assert_eq!(config.grid.spacing, 10.0);
        assert_eq!(config.grid.color, Rgb::from_hex(0xff0000));
        assert_eq!(config.camera.distance, 20.0);
        assert_eq!(config.camera.elevation, 15.0);
    }

    #[test]
    fn bad_colour_is_parse_error() {
        let err = ViewerConfig::from_yaml("grid:\n  color: grey\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn inverted_distance_range_is_invalid() {
        let yaml = "controls:\n  min_distance: 10.0\n  max_distance: 5.0\n";
        let err = ViewerConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "controls.min_distance",
                ..
            }
        ));
    }

    #[test]
    fn non_finite_camera_start_is_invalid() {
        let err = ViewerConfig::from_yaml("camera:\n  distance: .nan\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "camera.distance",
                ..
            }
        ));
        let err = ViewerConfig::from_yaml("camera:\n  azimuth: .inf\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "camera.azimuth",
                ..
            }
        ));
        let mut config = ViewerConfig::default();
        config.camera.elevation = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn elevation_limit_at_pole_is_invalid() {
        let mut config = ViewerConfig::default();
        config.controls.elevation_limit = 90.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_grid_lines_is_invalid() {
        let mut config = ViewerConfig::default();
        config.grid.line_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "window:\n  title: test\n  width: 640\n  height: 480").unwrap();
        let config = ViewerConfig::load(file.path()).unwrap();
        assert_eq!(config.window.title, "test");
        assert_eq!(config.window.width, 640);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ViewerConfig::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
