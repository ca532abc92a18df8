//! Mesh vertex and per-instance layouts.

use bytemuck::{Pod, Zeroable};

/// Standard vertex with position, normal, UV coordinates, and color.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coords,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }

    pub fn with_color(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2], color: [f32; 4]) -> Self {
        Self { position, normal, tex_coords, color }
    }

    /// Lit mesh layout: position, normal, uv at locations 0..=2. Color is not read.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }

    /// Backdrop layout: position at 0, vertex color at 1 (normal and uv skipped).
    pub fn layout_with_color() -> wgpu::VertexBufferLayout<'static> {
        const COLOR_OFFSET: wgpu::BufferAddress = std::mem::size_of::<[f32; 8]>() as wgpu::BufferAddress;
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
            wgpu::VertexAttribute { offset: 0, shader_location: 0, format: wgpu::VertexFormat::Float32x3 },
            wgpu::VertexAttribute { offset: COLOR_OFFSET, shader_location: 1, format: wgpu::VertexFormat::Float32x4 },
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Per-instance data for the lit mesh pipeline.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct InstanceData {
    /// Model matrix, column-major.
    pub model: [[f32; 4]; 4],
    /// Base color (linear RGB, alpha = opacity).
    pub color: [f32; 4],
    /// Emissive color (linear RGB) with intensity in w.
    pub emissive: [f32; 4],
    /// x = metalness, y = roughness, z = 1 for unlit round sprites, w unused.
    pub material: [f32; 4],
}

impl InstanceData {
    pub fn new(model: [[f32; 4]; 4], color: [f32; 4]) -> Self {
        Self {
            model,
            color,
            ..Default::default()
        }
    }

    pub fn with_emissive(mut self, rgb: [f32; 3], intensity: f32) -> Self {
        self.emissive = [rgb[0], rgb[1], rgb[2], intensity];
        self
    }

    pub fn with_material(mut self, metalness: f32, roughness: f32) -> Self {
        self.material = [metalness, roughness, 0.0, 0.0];
        self
    }

    /// Draw as an unlit disc: emissive only, alpha fading to the quad edge.
    pub fn unlit_sprite(mut self) -> Self {
        self.material[2] = 1.0;
        self
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 7] = wgpu::vertex_attr_array![
            3 => Float32x4, // model column 0
            4 => Float32x4, // model column 1
            5 => Float32x4, // model column 2
            6 => Float32x4, // model column 3
            7 => Float32x4, // color
            8 => Float32x4, // emissive
            9 => Float32x4, // material
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceData>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }
}

impl Default for InstanceData {
    fn default() -> Self {
        Self {
            model: glam::Mat4::IDENTITY.to_cols_array_2d(),
            color: [1.0, 1.0, 1.0, 1.0],
            emissive: [0.0; 4],
            material: [0.0, 1.0, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_layout_stride_matches_struct() {
        assert_eq!(std::mem::size_of::<InstanceData>(), 28 * 4);
        assert_eq!(InstanceData::layout().attributes.len(), 7);
    }

    #[test]
    fn backdrop_layout_reads_color_field() {
        let layout = Vertex::layout_with_color();
        assert_eq!(layout.attributes[1].offset as usize, std::mem::offset_of!(Vertex, color));
    }

    #[test]
    fn default_instance_is_rough_dielectric() {
        let inst = InstanceData::default();
        assert_eq!(inst.material, [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(inst.emissive[3], 0.0);
        assert_eq!(InstanceData::default().unlit_sprite().material[2], 1.0);
    }
}
