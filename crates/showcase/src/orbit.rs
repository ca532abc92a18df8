//! Orbit camera controls: rotate around a target, pan the target, dolly in and out.

use glam::{Vec2, Vec3};
use renderer::Camera;
use std::f32::consts::{PI, TAU};

pub const MIN_DISTANCE: f32 = 5.0;
pub const MAX_DISTANCE: f32 = 50.0;
/// Per scroll line; < 1 moves closer when scrolling away from the user.
const ZOOM_SCALE: f32 = 0.95;
/// Keeps the camera off the poles where the up vector degenerates.
const POLAR_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    distance: f32,
    /// Angle around +Y, measured from +Z toward +X.
    azimuth: f32,
    /// Angle down from +Y.
    polar: f32,
    pub auto_rotate: bool,
    /// 1.0 = one full orbit per minute.
    pub auto_rotate_speed: f32,
}

impl OrbitControls {
    /// Controls that reproduce a camera at `eye` looking at `target`.
    pub fn from_eye(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        let (azimuth, polar) = if offset.length_squared() > 1e-12 {
            let dir = offset.normalize();
            (dir.x.atan2(dir.z), dir.y.clamp(-1.0, 1.0).acos())
        } else {
            (0.0, PI * 0.5)
        };
        Self {
            target,
            distance,
            azimuth,
            polar: polar.clamp(POLAR_EPSILON, PI - POLAR_EPSILON),
            auto_rotate: false,
            auto_rotate_speed: 0.5,
        }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn eye(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + self.distance
                * Vec3::new(
                    sin_polar * self.azimuth.sin(),
                    self.polar.cos(),
                    sin_polar * self.azimuth.cos(),
                )
    }

    /// Drag rotation. A drag the height of the viewport turns a full circle.
    pub fn rotate(&mut self, delta_px: Vec2, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.azimuth -= TAU * delta_px.x / h;
        self.polar = (self.polar - TAU * delta_px.y / h).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
    }

    /// Drag panning in the screen plane; the point under the cursor stays under it at the target depth.
    pub fn pan(&mut self, delta_px: Vec2, viewport_height: f32, camera: &Camera) {
        let h = viewport_height.max(1.0);
        let target_extent = self.distance * (camera.fov_degrees.to_radians() * 0.5).tan();
        let world_per_px = 2.0 * target_extent / h;
        self.target += -camera.right() * delta_px.x * world_per_px + camera.up() * delta_px.y * world_per_px;
    }

    /// Positive lines (wheel away from the user) move closer.
    pub fn zoom(&mut self, lines: f32) {
        if lines == 0.0 {
            return;
        }
        self.distance = (self.distance * ZOOM_SCALE.powf(lines)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Auto-rotation step.
    pub fn update(&mut self, dt: f32) {
        if self.auto_rotate {
            self.azimuth -= TAU / 60.0 * self.auto_rotate_speed * dt;
        }
        self.azimuth = self.azimuth.rem_euclid(TAU);
    }

    pub fn apply(&self, camera: &mut Camera) {
        camera.look_at(self.eye(), self.target);
    }
}
