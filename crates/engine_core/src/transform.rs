//! Placement of an object in the world.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Position, rotation, and scale. Scale is always uniform in this project.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_position(Vec3::ZERO)
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Scene placement: XYZ Euler angles in radians and a uniform scale.
    pub fn from_placement(position: Vec3, euler: Vec3, scale: f32) -> Self {
        Self {
            position,
            rotation: Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z),
            scale: Vec3::splat(scale),
        }
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Local-space point to world space: scale, then rotate, then translate.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * (self.scale * local)
    }

    /// -Z, right-handed.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn uniform_scale(&self) -> f32 {
        self.scale.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_applies_uniform_scale() {
        let t = Transform::from_placement(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, 1.5);
        assert_eq!(t.scale, Vec3::splat(1.5));
        assert_eq!(t.uniform_scale(), 1.5);
        assert_eq!(t.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn transform_point_scales_then_rotates_then_translates() {
        let t = Transform::from_placement(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
            2.0,
        );
        // +X rotated 90 degrees about Y lands on -Z.
        let p = t.transform_point(Vec3::X);
        assert!((p - Vec3::new(0.0, 1.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn matrix_matches_transform_point() {
        let t = Transform::from_placement(Vec3::new(-8.0, 2.0, -5.0), Vec3::new(0.0, 0.5, 0.0), 1.2);
        let local = Vec3::new(0.0, 2.0, 0.0);
        let a = t.transform_point(local);
        let b = t.to_matrix().transform_point3(local);
        assert!((a - b).length() < 1e-4);
    }
}
