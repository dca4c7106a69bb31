/// Perspective camera.
///
/// Holds the projection parameters and a look-at pose. The aspect ratio is
/// owned by the viewport (set on every resize); the pose is owned by the
/// orbit controls while the user interacts.

use glam::{Mat4, Vec3};
use crate::config::CameraConfig;

/// Right-handed perspective camera looking at a target
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    fov_y_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
    position: Vec3,
    target: Vec3,
    up: Vec3,
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_degrees,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
        }
    }

    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self::new(config.fov_degrees, aspect, config.near, config.far);
        camera.position = Vec3::from_array(config.position);
        camera.target = Vec3::from_array(config.target);
        camera
    }

    // ===== GETTERS =====

    pub fn fov_y_degrees(&self) -> f32 {
        self.fov_y_degrees
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Unit vector from the camera toward its target
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// projection * view
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    // ===== SETTERS =====

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
