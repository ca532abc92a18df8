//! Perspective camera, screen-space projection, and pointer rays.

use bytemuck::{Pod, Zeroable};
use engine_core::{Ray, Transform};
use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

/// Perspective camera. Orientation lives in `transform`; projection is right-handed, depth 0..1.
#[derive(Debug, Clone)]
pub struct Camera {
    pub transform: Transform,
    /// Vertical, in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Width over height.
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl Camera {
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Move to `eye` and face `target` with +Y up. A zero-length view direction keeps the old rotation.
    pub fn look_at(&mut self, eye: Vec3, target: Vec3) {
        self.transform.position = eye;
        let dir = target - eye;
        if dir.length_squared() > 1e-8 {
            self.transform.rotation = Quat::from_mat4(&Mat4::look_to_rh(eye, dir, Vec3::Y)).inverse();
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.transform.position, self.forward(), self.up())
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn forward(&self) -> Vec3 {
        self.transform.forward()
    }

    pub fn right(&self) -> Vec3 {
        self.transform.right()
    }

    pub fn up(&self) -> Vec3 {
        self.transform.up()
    }

    /// World-space ray through a window pixel (origin top-left).
    pub fn screen_ray(&self, cursor: Vec2, screen: Vec2) -> Ray {
        let ndc = Vec2::new(
            (cursor.x / screen.x.max(1.0)) * 2.0 - 1.0,
            1.0 - (cursor.y / screen.y.max(1.0)) * 2.0,
        );
        let inv = self.view_projection_matrix().inverse();
        let near = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(near, far - near)
    }

    /// Project a world point to window pixels. None when behind the camera or outside the depth range.
    pub fn world_to_screen(&self, point: Vec3, screen: Vec2) -> Option<Vec2> {
        let clip = self.view_projection_matrix() * Vec4::new(point.x, point.y, point.z, 1.0);
        if clip.w <= 1e-6 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !(0.0..=1.0).contains(&ndc.z) {
            return None;
        }
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * screen.x,
            (1.0 - ndc.y) * 0.5 * screen.y,
        ))
    }
}

/// Camera block shared by the mesh and backdrop shaders.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// The backdrop keeps only its rotation part.
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    /// xyz = eye, w = 1.
    pub position: [f32; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        let identity = Mat4::IDENTITY.to_cols_array_2d();
        Self {
            view_proj: identity,
            view: identity,
            proj: identity,
            position: [0.0, 0.0, 0.0, 1.0],
        }
    }

    pub fn update(&mut self, camera: &Camera) {
        let view = camera.view_matrix();
        let proj = camera.projection_matrix();
        self.view = view.to_cols_array_2d();
        self.proj = proj.to_cols_array_2d();
        self.view_proj = (proj * view).to_cols_array_2d();
        self.position = camera.transform.position.extend(1.0).to_array();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at_z10() -> Camera {
        let mut camera = Camera::default();
        camera.set_aspect(1280, 720);
        camera.look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        camera
    }

    #[test]
    fn look_at_faces_target() {
        let camera = camera_at_z10();
        assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn center_ray_points_at_target() {
        let camera = camera_at_z10();
        let screen = Vec2::new(1280.0, 720.0);
        let ray = camera.screen_ray(screen * 0.5, screen);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
        assert!(ray.intersect_sphere(Vec3::ZERO, 0.5).is_some());
    }

    #[test]
    fn world_to_screen_inverts_screen_ray() {
        let camera = camera_at_z10();
        let screen = Vec2::new(1280.0, 720.0);
        let cursor = Vec2::new(900.0, 200.0);
        let ray = camera.screen_ray(cursor, screen);
        let p = ray.origin + ray.direction * 12.0;
        let back = camera.world_to_screen(p, screen).unwrap();
        assert!((back - cursor).length() < 0.5, "{back:?}");
    }

    #[test]
    fn uniform_carries_eye_position() {
        let mut uniform = CameraUniform::default();
        uniform.update(&camera_at_z10());
        assert_eq!(uniform.position, [0.0, 0.0, 10.0, 1.0]);
    }

    #[test]
    fn points_behind_camera_do_not_project() {
        let camera = camera_at_z10();
        let screen = Vec2::new(1280.0, 720.0);
        assert!(camera.world_to_screen(Vec3::new(0.0, 0.0, 20.0), screen).is_none());
    }
}
