//! Mesh data structures and primitive generation.
//!
//! Primitives are built as [`MeshData`] on the CPU and uploaded with [`MeshData::upload`].
//! All are centered on the origin; cylinders and cones run along +Y.

use crate::vertex::Vertex;
use glam::Vec3;
use std::f32::consts::{PI, TAU};
use wgpu::util::DeviceExt;

/// A GPU mesh with vertex and index buffers.
pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
}

impl Mesh {
    /// Create a mesh from vertex and index data.
    pub fn new(device: &wgpu::Device, vertices: &[Vertex], indices: &[u32]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            num_indices: indices.len() as u32,
        }
    }

    /// Create a billboard quad (XY plane, facing +Z). Use with a camera-facing rotation
    /// so the quad always faces the viewer.
    pub fn billboard_quad(device: &wgpu::Device, size: f32) -> Self {
        MeshData::quad(size).upload(device)
    }
}

/// Mesh data before GPU upload (for procedural generation).
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload(&self, device: &wgpu::Device) -> Mesh {
        Mesh::new(device, &self.vertices, &self.indices)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Square in the XY plane facing +Z.
    pub fn quad(size: f32) -> Self {
        let half = size / 2.0;
        let n = [0.0, 0.0, 1.0];
        Self {
            vertices: vec![
                Vertex::new([-half, -half, 0.0], n, [0.0, 1.0]),
                Vertex::new([half, -half, 0.0], n, [1.0, 1.0]),
                Vertex::new([half, half, 0.0], n, [1.0, 0.0]),
                Vertex::new([-half, half, 0.0], n, [0.0, 0.0]),
            ],
            indices: vec![0, 1, 2, 2, 3, 0],
        }
    }

    /// Axis-aligned box with the given full extents.
    pub fn cuboid(size: Vec3) -> Self {
        let h = size * 0.5;
        // (normal, u axis, v axis) per face; corners are n*h ± u*h ± v*h.
        let faces = [
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        ];
        let mut mesh = Self::new();
        for (normal, u, v) in faces {
            let base = mesh.vertices.len() as u32;
            let center = normal * h;
            let du = u * h;
            let dv = v * h;
            let corners = [
                (center - du - dv, [0.0, 1.0]),
                (center + du - dv, [1.0, 1.0]),
                (center + du + dv, [1.0, 0.0]),
                (center - du + dv, [0.0, 0.0]),
            ];
            for (p, uv) in corners {
                mesh.vertices.push(Vertex::new(p.into(), normal.into(), uv));
            }
            mesh.indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }
        mesh
    }

    /// UV sphere.
    pub fn sphere(radius: f32, segments: u32, rings: u32) -> Self {
        let segments = segments.max(3);
        let rings = rings.max(2);
        let mut mesh = Self::new();

        for ring in 0..=rings {
            let phi = PI * ring as f32 / rings as f32;
            let y = radius * phi.cos();
            let ring_radius = radius * phi.sin();

            for segment in 0..=segments {
                let theta = TAU * segment as f32 / segments as f32;
                // Winding is counter-clockwise seen from outside.
                let x = ring_radius * theta.sin();
                let z = ring_radius * theta.cos();
                let normal = Vec3::new(x, y, z).normalize_or_zero();
                let uv = [segment as f32 / segments as f32, ring as f32 / rings as f32];
                mesh.vertices.push(Vertex::new([x, y, z], normal.into(), uv));
            }
        }

        for ring in 0..rings {
            for segment in 0..segments {
                let current = ring * (segments + 1) + segment;
                let next = current + segments + 1;
                mesh.indices.extend_from_slice(&[current, next, current + 1]);
                mesh.indices.extend_from_slice(&[current + 1, next, next + 1]);
            }
        }
        mesh
    }

    /// Capped cylinder (or frustum) along Y, `height` tall, centered on the origin.
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        let half = height * 0.5;
        let mut mesh = Self::new();

        // Side normals tilt by the slope of the frustum.
        let slope = (radius_bottom - radius_top) / height.max(f32::EPSILON);
        for i in 0..=segments {
            let theta = TAU * i as f32 / segments as f32;
            let (s, c) = theta.sin_cos();
            let normal = Vec3::new(s, slope, c).normalize_or_zero();
            let u = i as f32 / segments as f32;
            mesh.vertices.push(Vertex::new([radius_top * s, half, radius_top * c], normal.into(), [u, 0.0]));
            mesh.vertices.push(Vertex::new(
                [radius_bottom * s, -half, radius_bottom * c],
                normal.into(),
                [u, 1.0],
            ));
        }
        for i in 0..segments {
            let top = i * 2;
            let bottom = top + 1;
            let next_top = top + 2;
            let next_bottom = top + 3;
            mesh.indices.extend_from_slice(&[top, bottom, next_top, next_top, bottom, next_bottom]);
        }

        if radius_top > 0.0 {
            mesh.add_cap(radius_top, half, Vec3::Y, segments);
        }
        if radius_bottom > 0.0 {
            mesh.add_cap(radius_bottom, -half, Vec3::NEG_Y, segments);
        }
        mesh
    }

    /// Cone along Y with its apex at `+height / 2`.
    pub fn cone(radius: f32, height: f32, segments: u32) -> Self {
        Self::cylinder(0.0, radius, height, segments)
    }

    /// Triangle fan closing one end of a cylinder.
    fn add_cap(&mut self, radius: f32, y: f32, normal: Vec3, segments: u32) {
        let center = self.vertices.len() as u32;
        self.vertices.push(Vertex::new([0.0, y, 0.0], normal.into(), [0.5, 0.5]));
        for i in 0..=segments {
            let theta = TAU * i as f32 / segments as f32;
            let (s, c) = theta.sin_cos();
            self.vertices.push(Vertex::new(
                [radius * s, y, radius * c],
                normal.into(),
                [0.5 + 0.5 * s, 0.5 + 0.5 * c],
            ));
        }
        for i in 0..segments {
            let a = center + 1 + i;
            let b = a + 1;
            if normal.y > 0.0 {
                self.indices.extend_from_slice(&[center, a, b]);
            } else {
                self.indices.extend_from_slice(&[center, b, a]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(mesh: &MeshData) -> (Vec3, Vec3) {
        mesh.vertices.iter().fold(
            (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
            |(lo, hi), v| {
                let p = Vec3::from(v.position);
                (lo.min(p), hi.max(p))
            },
        )
    }

    /// Triangle normal from winding should agree with the stored vertex normals.
    fn assert_outward_winding(mesh: &MeshData) {
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize]);
            let pa = Vec3::from(a.position);
            let face = (Vec3::from(b.position) - pa).cross(Vec3::from(c.position) - pa);
            if face.length_squared() < 1e-10 {
                continue;
            }
            let stored = Vec3::from(a.normal) + Vec3::from(b.normal) + Vec3::from(c.normal);
            assert!(face.dot(stored) > 0.0, "inward triangle {tri:?}");
        }
    }

    #[test]
    fn cuboid_matches_extents() {
        let mesh = MeshData::cuboid(Vec3::new(2.0, 0.5, 4.0));
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        let (lo, hi) = bounds(&mesh);
        assert_eq!(lo, Vec3::new(-1.0, -0.25, -2.0));
        assert_eq!(hi, Vec3::new(1.0, 0.25, 2.0));
        assert_outward_winding(&mesh);
    }

    #[test]
    fn sphere_is_round_and_outward() {
        let mesh = MeshData::sphere(0.4, 16, 8);
        for v in &mesh.vertices {
            assert!((Vec3::from(v.position).length() - 0.4).abs() < 1e-5);
        }
        assert_outward_winding(&mesh);
    }

    #[test]
    fn cylinder_spans_height() {
        let mesh = MeshData::cylinder(0.2, 0.3, 1.0, 12);
        let (lo, hi) = bounds(&mesh);
        assert!((lo.y + 0.5).abs() < 1e-6 && (hi.y - 0.5).abs() < 1e-6);
        assert!((hi.x - 0.3).abs() < 1e-3);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
        assert_outward_winding(&mesh);
    }

    #[test]
    fn cone_has_no_top_cap() {
        let cone = MeshData::cone(0.5, 1.0, 10);
        let cylinder = MeshData::cylinder(0.5, 0.5, 1.0, 10);
        assert_eq!(cylinder.triangle_count() - cone.triangle_count(), 10);
        assert_outward_winding(&cone);
    }

    #[test]
    fn quad_faces_positive_z() {
        let quad = MeshData::quad(2.0);
        assert_eq!(quad.triangle_count(), 2);
        assert_outward_winding(&quad);
    }
}
