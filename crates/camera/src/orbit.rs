use glam::{Quat, Vec3};
use orbitview_common::{CameraConfig, ControlConfig};

/// Clamps applied to every orbit update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLimits {
    /// Elevation stays within `[-max_elevation, max_elevation]` degrees.
    /// Kept short of 90 to avoid gimbal lock with a +Y up vector.
    pub max_elevation: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            max_elevation: 89.9,
            min_distance: 0.001,
            max_distance: 1000.0,
        }
    }
}

impl From<&ControlConfig> for OrbitLimits {
    fn from(config: &ControlConfig) -> Self {
        Self {
            max_elevation: config.elevation_limit,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
        }
    }
}

impl OrbitLimits {
    pub fn clamp_elevation(&self, elevation: f32) -> f32 {
        elevation.clamp(-self.max_elevation, self.max_elevation)
    }

    pub fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.min_distance, self.max_distance)
    }
}

/// Camera orientation around the world origin, in degrees.
///
/// Azimuth is unbounded. Elevation and distance are kept inside
/// [`OrbitLimits`] by every mutating method, including construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    azimuth: f32,
    elevation: f32,
    distance: f32,
    limits: OrbitLimits,
}

impl Default for OrbitState {
    fn default() -> Self {
        Self::new(0.0, 15.0, 50.0, OrbitLimits::default())
    }
}

impl OrbitState {
    pub fn new(azimuth: f32, elevation: f32, distance: f32, limits: OrbitLimits) -> Self {
        Self {
            azimuth,
            elevation: limits.clamp_elevation(elevation),
            distance: limits.clamp_distance(distance),
            limits,
        }
    }

    /// Initial orientation from the camera config, clamped by the control config.
    pub fn from_config(camera: &CameraConfig, controls: &ControlConfig) -> Self {
        Self::new(
            camera.azimuth,
            camera.elevation,
            camera.distance,
            OrbitLimits::from(controls),
        )
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn limits(&self) -> &OrbitLimits {
        &self.limits
    }

    /// Add to azimuth and elevation (degrees); elevation is clamped.
    pub fn rotate(&mut self, d_azimuth: f32, d_elevation: f32) {
        self.azimuth += d_azimuth;
        self.elevation = self.limits.clamp_elevation(self.elevation + d_elevation);
    }

    /// Add to the orbit distance; the result is clamped.
    pub fn zoom(&mut self, increment: f32) {
        self.distance = self.limits.clamp_distance(self.distance + increment);
    }

    /// Camera pose derived from the current orientation.
    pub fn pose(&self) -> OrbitPose {
        recompute_pose(self.azimuth, self.elevation, self.distance)
    }
}

/// Camera position and look-at target. Always derived, never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPose {
    pub position: Vec3,
    pub target: Vec3,
}

/// Spherical-to-Cartesian pose for an orbit around the origin.
///
/// `(0, 0, distance)` is tilted by `elevation` around -X first, then swung by
/// `azimuth` around world +Y. Swapping the order tilts around the wrong axis.
pub fn recompute_pose(azimuth: f32, elevation: f32, distance: f32) -> OrbitPose {
    let tilt = Quat::from_axis_angle(Vec3::NEG_X, elevation.to_radians());
    let swing = Quat::from_axis_angle(Vec3::Y, azimuth.to_radians());
    let position = swing * (tilt * Vec3::new(0.0, 0.0, distance));
    OrbitPose {
        position,
        target: Vec3::ZERO,
    }
}
