/// Orbit controls: drag to rotate the camera around a target.
///
/// Pointer input accumulates spherical deltas; `update` (called once per
/// frame) applies them to the camera. With damping enabled each update
/// applies `damping_factor` of the pending delta and keeps the rest, so
/// motion decays geometrically after release.
///
/// State machine:
///
/// ```text
/// Idle ──pointer_down──▶ UserDragging ──pointer_up──▶ Damping ──residual < ε──▶ Idle
///                                      (no damping) ──────────────────────────▶ Idle
/// ```

use std::f32::consts::{PI, TAU};
use glam::Vec3;
use crate::config::ControlsConfig;
use super::camera::PerspectiveCamera;

/// Keeps the camera off the poles, where the look-at basis degenerates
const POLAR_EPSILON: f32 = 1e-6;

/// Interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Idle,
    UserDragging,
    Damping,
}

/// Spherical offset from the target (three.js convention: theta around +Y
/// measured from +Z, phi from +Y)
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self { radius, theta: 0.0, phi: 0.0 };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

/// Camera orbit controller
#[derive(Debug, Clone)]
pub struct OrbitControls {
    settings: ControlsConfig,
    target: Vec3,
    state: ControlState,
    theta_delta: f32,
    phi_delta: f32,
    pan_offset: Vec3,
    zoom_scale: f32,
    pointer: Option<(f32, f32)>,
    viewport_height: f32,
}

impl OrbitControls {
    pub fn new(settings: &ControlsConfig, target: Vec3) -> Self {
        Self {
            settings: settings.clone(),
            target,
            state: ControlState::Idle,
            theta_delta: 0.0,
            phi_delta: 0.0,
            pan_offset: Vec3::ZERO,
            zoom_scale: 1.0,
            pointer: None,
            viewport_height: 1.0,
        }
    }

    // ===== GETTERS =====

    pub fn state(&self) -> ControlState {
        self.state
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn settings(&self) -> &ControlsConfig {
        &self.settings
    }

    /// Pending (azimuth, polar) rotation not yet applied to the camera
    pub fn pending_rotation(&self) -> (f32, f32) {
        (self.theta_delta, self.phi_delta)
    }

    // ===== SETTERS =====

    /// Drag distances are measured relative to this height
    pub fn set_viewport_height(&mut self, height: f32) {
        if height > 0.0 && height.is_finite() {
            self.viewport_height = height;
        }
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.settings.auto_rotate = enabled;
    }

    pub fn set_enable_damping(&mut self, enabled: bool) {
        self.settings.enable_damping = enabled;
    }

    // ===== POINTER INPUT =====

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.state = ControlState::UserDragging;
        self.pointer = Some((x, y));
    }

    /// Rotate by the pointer travel since the last event while dragging
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if self.state != ControlState::UserDragging {
            return;
        }
        if let Some((last_x, last_y)) = self.pointer {
            let scale = TAU / self.viewport_height * self.settings.rotate_speed;
            self.theta_delta -= (x - last_x) * scale;
            self.phi_delta -= (y - last_y) * scale;
        }
        self.pointer = Some((x, y));
    }

    pub fn pointer_up(&mut self) {
        if self.state != ControlState::UserDragging {
            return;
        }
        self.pointer = None;
        self.state = if self.settings.enable_damping && self.has_residual() {
            ControlState::Damping
        } else {
            ControlState::Idle
        };
    }

    /// Dolly in (negative delta) or out. Returns false when zoom is disabled.
    pub fn wheel(&mut self, delta_y: f32) -> bool {
        if !self.settings.enable_zoom || delta_y == 0.0 {
            return false;
        }
        let step = 0.95_f32.powf(self.settings.zoom_speed);
        if delta_y < 0.0 {
            self.zoom_scale *= step;
        } else {
            self.zoom_scale /= step;
        }
        true
    }

    /// Shift the target in the camera plane. Returns false when pan is disabled.
    pub fn pan(&mut self, dx: f32, dy: f32, camera: &PerspectiveCamera) -> bool {
        if !self.settings.enable_pan {
            return false;
        }
        let forward = camera.forward();
        let right = forward.cross(camera.up()).normalize_or_zero();
        let up = right.cross(forward);
        let distance = (camera.position() - self.target).length();
        let half_fov = (camera.fov_y_degrees().to_radians() * 0.5).tan();
        let world_per_pixel = 2.0 * distance * half_fov / self.viewport_height;
        self.pan_offset += (up * dy - right * dx) * world_per_pixel;
        true
    }

    // ===== UPDATE =====

    /// Apply pending motion to `camera`. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let auto_rotate = self.settings.auto_rotate && self.state != ControlState::UserDragging;
        if !auto_rotate && !self.has_residual() && self.zoom_scale == 1.0 {
            if self.state == ControlState::Damping {
                self.state = ControlState::Idle;
            }
            return false;
        }

        let mut spherical = Spherical::from_offset(camera.position() - self.target);
        if auto_rotate {
            spherical.theta -= self.auto_rotate_angle();
        }

        let damping = self.settings.enable_damping;
        let applied = if damping { self.settings.damping_factor } else { 1.0 };
        spherical.theta += self.theta_delta * applied;
        spherical.phi += self.phi_delta * applied;
        spherical.phi = spherical.phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.target += self.pan_offset * applied;

        if self.settings.enable_zoom {
            spherical.radius = (spherical.radius * self.zoom_scale)
                .clamp(self.settings.min_distance, self.settings.max_distance);
        }
        self.zoom_scale = 1.0;

        let before = camera.position();
        camera.set_position(self.target + spherical.to_offset());
        camera.look_at(self.target);

        if damping {
            let keep = 1.0 - self.settings.damping_factor;
            self.theta_delta *= keep;
            self.phi_delta *= keep;
            self.pan_offset *= keep;
        } else {
            self.clear_pending();
        }

        if self.state == ControlState::Damping && !self.has_residual() {
            self.state = ControlState::Idle;
        }

        camera.position() != before
    }

    fn auto_rotate_angle(&self) -> f32 {
        TAU / 60.0 / 60.0 * self.settings.auto_rotate_speed
    }

    /// Whether any pending delta is above the rest threshold. Drops the
    /// residual once it falls below.
    fn has_residual(&mut self) -> bool {
        let epsilon = self.settings.rest_epsilon;
        let moving = self.theta_delta.abs() >= epsilon
            || self.phi_delta.abs() >= epsilon
            || self.pan_offset.length() >= epsilon;
        if !moving {
            self.clear_pending();
        }
        moving
    }

    fn clear_pending(&mut self) {
        self.theta_delta = 0.0;
        self.phi_delta = 0.0;
        self.pan_offset = Vec3::ZERO;
    }
}

#[cfg(test)]
#[path = "orbit_controls_tests.rs"]
mod tests;
