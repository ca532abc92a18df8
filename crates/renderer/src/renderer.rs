//! GPU context and the frame's render passes: backdrop, instanced meshes, overlay.

use crate::{
    camera::{Camera, CameraUniform},
    mesh::Mesh,
    overlay::OverlayVertex,
    pipeline::{
        create_backdrop_pipeline, create_camera_bind_group_layout, create_overlay_bind_group_layout,
        create_overlay_pipeline, create_render_pipeline,
    },
    texture::Texture,
    vertex::InstanceData,
};
use anyhow::{anyhow, Result};
use bytemuck::{Pod, Zeroable};
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::{dpi::PhysicalSize, window::Window};

/// Point light (must match mesh.wgsl PointLight). No distance falloff.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct PointLight {
    pub position: [f32; 4],
    /// Linear RGB, w = intensity.
    pub color: [f32; 4],
}

impl PointLight {
    pub fn new(position: glam::Vec3, color: [f32; 3], intensity: f32) -> Self {
        Self {
            position: position.extend(1.0).to_array(),
            color: [color[0], color[1], color[2], intensity],
        }
    }
}

/// Scene lighting (must match mesh.wgsl LightUniform).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LightUniform {
    /// Linear RGB, w = intensity.
    pub ambient: [f32; 4],
    pub points: [PointLight; 2],
}

impl Default for LightUniform {
    fn default() -> Self {
        Self {
            ambient: [1.0, 1.0, 1.0, 0.2],
            points: [PointLight::zeroed(); 2],
        }
    }
}

/// Which instanced mesh pipeline a draw uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    /// Writes depth.
    Opaque,
    /// Depth-tested but not written; draw after opaque geometry.
    Translucent,
}

const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;
const MAX_INSTANCES: u32 = 8192;

pub struct Renderer {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    pub window: Arc<Window>,

    opaque_pipeline: wgpu::RenderPipeline,
    translucent_pipeline: wgpu::RenderPipeline,
    backdrop_pipeline: wgpu::RenderPipeline,
    overlay_pipeline: wgpu::RenderPipeline,

    /// Camera at binding 0, lights at binding 1. Group 0 of every 3D pass.
    scene_bind_group: wgpu::BindGroup,
    camera_buffer: wgpu::Buffer,
    camera_uniform: CameraUniform,
    light_buffer: wgpu::Buffer,
    /// Font atlas and sampler.
    overlay_bind_group: wgpu::BindGroup,

    depth_texture: Texture,

    /// Shared by every instanced draw in a frame. Each draw writes its own
    /// region, since all `write_buffer` calls land before the encoder runs.
    instance_buffer: wgpu::Buffer,
    instances_used: u32,
}

/// Prefer an sRGB surface format and, with vsync, mailbox presentation.
fn surface_config(
    caps: &wgpu::SurfaceCapabilities,
    size: PhysicalSize<u32>,
    vsync: bool,
) -> Result<wgpu::SurfaceConfiguration> {
    let format = caps
        .formats
        .iter()
        .copied()
        .find(wgpu::TextureFormat::is_srgb)
        .or_else(|| caps.formats.first().copied())
        .ok_or_else(|| anyhow!("Surface reports no texture formats"))?;

    let present_mode = match vsync {
        true if caps.present_modes.contains(&wgpu::PresentMode::Mailbox) => wgpu::PresentMode::Mailbox,
        true => wgpu::PresentMode::AutoVsync,
        false => wgpu::PresentMode::AutoNoVsync,
    };

    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode,
        alpha_mode: caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    })
}

fn uniform_buffer<T: Pod>(device: &wgpu::Device, label: &str, value: &T) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::bytes_of(value),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

impl Renderer {
    pub async fn new(window: Arc<Window>, vsync: bool) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow!("No GPU adapter can present to this window"))?;
        log::info!("Using GPU: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Showcase Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let config = surface_config(&surface.get_capabilities(&adapter), size, vsync)?;
        log::debug!("Surface format {:?}, present mode {:?}", config.format, config.present_mode);
        surface.configure(&device, &config);

        let camera_uniform = CameraUniform::new();
        let camera_buffer = uniform_buffer(&device, "Camera Buffer", &camera_uniform);
        let light_buffer = uniform_buffer(&device, "Light Buffer", &LightUniform::default());

        let scene_layout = create_camera_bind_group_layout(&device);
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &scene_layout,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: camera_buffer.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: light_buffer.as_entire_binding() },
            ],
        });

        let (atlas, atlas_w, atlas_h) = crate::font::generate_font_atlas();
        let font = Texture::from_r8(&device, &queue, &atlas, atlas_w, atlas_h, "Font Atlas");
        let overlay_layout = create_overlay_bind_group_layout(&device);
        let overlay_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Overlay Bind Group"),
            layout: &overlay_layout,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(&font.view) },
                wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::Sampler(&font.sampler) },
            ],
        });

        let opaque_pipeline = create_render_pipeline(&device, &config, &scene_layout, true, "Mesh Pipeline");
        let translucent_pipeline =
            create_render_pipeline(&device, &config, &scene_layout, false, "Translucent Mesh Pipeline");
        let backdrop_pipeline = create_backdrop_pipeline(&device, &config, &scene_layout);
        let overlay_pipeline = create_overlay_pipeline(&device, &config, &overlay_layout);

        let depth_texture = Texture::create_depth_texture(&device, config.width, config.height, "Depth Texture");
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (std::mem::size_of::<InstanceData>() * MAX_INSTANCES as usize) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        log::info!("Renderer ready: {}x{}", config.width, config.height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            opaque_pipeline,
            translucent_pipeline,
            backdrop_pipeline,
            overlay_pipeline,
            scene_bind_group,
            camera_buffer,
            camera_uniform,
            light_buffer,
            overlay_bind_group,
            depth_texture,
            instance_buffer,
            instances_used: 0,
        })
    }

    /// Resize the surface and depth buffer. Zero-sized (minimized) windows are ignored.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            Texture::create_depth_texture(&self.device, new_size.width, new_size.height, "Depth Texture");
    }

    /// Reconfigure at the current size after `SurfaceError::Lost` or `Outdated`.
    pub fn reconfigure(&mut self) {
        self.resize(self.size);
    }

    pub fn update_camera(&mut self, camera: &Camera) {
        self.camera_uniform.update(camera);
        self.queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&self.camera_uniform));
    }

    pub fn update_lights(&mut self, lights: &LightUniform) {
        self.queue.write_buffer(&self.light_buffer, 0, bytemuck::bytes_of(lights));
    }

    /// Acquire the next surface texture and a fresh encoder.
    pub fn begin_frame(&mut self) -> Result<(wgpu::SurfaceTexture, wgpu::CommandEncoder), wgpu::SurfaceError> {
        self.instances_used = 0;
        let output = self.surface.get_current_texture()?;
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Frame Encoder") });
        Ok((output, encoder))
    }

    /// A pass over the frame's color and depth targets. `clear` starts both from scratch.
    fn scene_pass<'e>(
        &'e self,
        encoder: &'e mut wgpu::CommandEncoder,
        view: &'e wgpu::TextureView,
        label: &str,
        clear: bool,
    ) -> wgpu::RenderPass<'e> {
        let (color_load, depth_load) = if clear {
            (wgpu::LoadOp::Clear(CLEAR_COLOR), wgpu::LoadOp::Clear(1.0))
        } else {
            (wgpu::LoadOp::Load, wgpu::LoadOp::Load)
        };
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations { load: color_load, store: wgpu::StoreOp::Store },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations { load: depth_load, store: wgpu::StoreOp::Store }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_bind_group(0, &self.scene_bind_group, &[]);
        pass
    }

    /// Clear the frame, then draw the backdrop sphere. First pass of every frame.
    pub fn render_backdrop(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView, mesh: &Mesh) {
        let mut pass = self.scene_pass(encoder, view, "Backdrop Pass", true);
        pass.set_pipeline(&self.backdrop_pipeline);
        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..mesh.num_indices, 0, 0..1);
    }

    /// Upload `instances` into the next free region of the instance buffer.
    /// Returns the instance range to draw, or None when nothing fits.
    fn reserve_instances(&mut self, instances: &[InstanceData]) -> Option<std::ops::Range<u32>> {
        let start = self.instances_used;
        let count = instances.len().min(MAX_INSTANCES.saturating_sub(start) as usize);
        if count < instances.len() {
            log::warn!("Instance buffer full; dropping {} instances", instances.len() - count);
        }
        if count == 0 {
            return None;
        }
        let byte_offset = (start as usize * std::mem::size_of::<InstanceData>()) as wgpu::BufferAddress;
        self.queue
            .write_buffer(&self.instance_buffer, byte_offset, bytemuck::cast_slice(&instances[..count]));
        self.instances_used = start + count as u32;
        Some(start..self.instances_used)
    }

    /// Draw `mesh` once per instance on top of the current frame.
    pub fn draw_instanced(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        mesh: &Mesh,
        instances: &[InstanceData],
        blend: Blend,
    ) {
        if instances.is_empty() {
            return;
        }
        let Some(range) = self.reserve_instances(instances) else {
            return;
        };

        let mut pass = self.scene_pass(encoder, view, "Instanced Pass", false);
        pass.set_pipeline(match blend {
            Blend::Opaque => &self.opaque_pipeline,
            Blend::Translucent => &self.translucent_pipeline,
        });
        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..mesh.num_indices, 0, range);
    }

    /// Draw overlay geometry from an `OverlayTextBuilder`. Last pass before `end_frame`.
    pub fn render_overlay(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        vertices: &[OverlayVertex],
        indices: &[u32],
    ) {
        if indices.is_empty() {
            return;
        }
        let vertex_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Overlay Vertices"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Overlay Indices"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Overlay Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.overlay_pipeline);
        pass.set_bind_group(0, &self.overlay_bind_group, &[]);
        pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..indices.len() as u32, 0, 0..1);
    }

    /// Submit the frame's commands and present.
    pub fn end_frame(&self, output: wgpu::SurfaceTexture, encoder: wgpu::CommandEncoder) {
        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_uniform_is_vec4_aligned() {
        assert_eq!(std::mem::size_of::<PointLight>(), 32);
        assert_eq!(std::mem::size_of::<LightUniform>(), 16 + 2 * 32);
    }

    #[test]
    fn point_light_packs_intensity_in_w() {
        let light = PointLight::new(glam::Vec3::new(10.0, 10.0, 10.0), [0.1, 0.5, 0.3], 0.5);
        assert_eq!(light.position, [10.0, 10.0, 10.0, 1.0]);
        assert_eq!(light.color[3], 0.5);
    }

    fn caps(formats: Vec<wgpu::TextureFormat>, present_modes: Vec<wgpu::PresentMode>) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats,
            present_modes,
            alpha_modes: vec![wgpu::CompositeAlphaMode::Opaque],
            usages: wgpu::TextureUsages::RENDER_ATTACHMENT,
        }
    }

    #[test]
    fn surface_config_prefers_srgb_and_mailbox() {
        let caps = caps(
            vec![wgpu::TextureFormat::Bgra8Unorm, wgpu::TextureFormat::Bgra8UnormSrgb],
            vec![wgpu::PresentMode::Fifo, wgpu::PresentMode::Mailbox],
        );
        let config = surface_config(&caps, PhysicalSize::new(0, 720), true).unwrap();
        assert_eq!(config.format, wgpu::TextureFormat::Bgra8UnormSrgb);
        assert_eq!(config.present_mode, wgpu::PresentMode::Mailbox);
        assert_eq!(config.width, 1);
    }

    #[test]
    fn surface_config_without_vsync_or_formats() {
        let fifo = caps(vec![wgpu::TextureFormat::Rgba8Unorm], vec![wgpu::PresentMode::Fifo]);
        let config = surface_config(&fifo, PhysicalSize::new(640, 480), false).unwrap();
        assert_eq!(config.present_mode, wgpu::PresentMode::AutoNoVsync);
        assert_eq!(config.format, wgpu::TextureFormat::Rgba8Unorm);

        let empty = caps(vec![], vec![]);
        assert!(surface_config(&empty, PhysicalSize::new(640, 480), true).is_err());
    }
}
