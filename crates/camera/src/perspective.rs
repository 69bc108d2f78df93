use crate::OrbitPose;
use glam::{Mat4, Vec3};
use orbitview_common::CameraConfig;

/// Perspective camera with a mutable position, aspect and projection.
/// Field of view is stored in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl PerspectiveCamera {
    /// Camera at the origin looking down -Z with aspect 1.0; callers apply a
    /// pose and the real aspect once the surface size is known.
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            fov_y: config.fov_y_degrees.to_radians(),
            aspect: 1.0,
            near: config.near,
            far: config.far,
        }
    }

    pub fn apply_pose(&mut self, pose: &OrbitPose) {
        self.position = pose.position;
        self.target = pose.target;
    }

    /// Set the aspect ratio from an output size. A zero height counts as 1.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recompute_pose;

    #[test]
    fn default_projection_parameters() {
        let cam = PerspectiveCamera::default();
        assert!((cam.fov_y - 60f32.to_radians()).abs() < 1e-6);
        assert_eq!(cam.near, 0.1);
        assert_eq!(cam.far, 1500.0);
        assert_eq!(cam.aspect, 1.0);
    }

    #[test]
    fn viewport_sets_aspect() {
        let mut cam = PerspectiveCamera::default();
        cam.set_viewport(1920, 1080);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
        cam.set_viewport(800, 0);
        assert_eq!(cam.aspect, 800.0);
    }

    #[test]
    fn origin_projects_to_screen_centre() {
        let mut cam = PerspectiveCamera::default();
        cam.apply_pose(&recompute_pose(30.0, 20.0, 50.0));
        let clip = cam.view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4);
        assert!(ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn view_projection_is_finite_near_pole() {
        let mut cam = PerspectiveCamera::default();
        cam.apply_pose(&recompute_pose(0.0, 89.9, 50.0));
        let vp = cam.view_projection();
        assert!(vp.is_finite());
    }
}
