//! Night environment backdrop: a vertex-colored sky sphere with faint noise nebulae.

use glam::Vec3;
use noise::{NoiseFn, Perlin};

/// Backdrop palette and nebula parameters.
#[derive(Debug, Clone, Copy)]
pub struct BackdropConfig {
    pub seed: u64,
    /// Linear RGB at the zenith and nadir.
    pub zenith: [f32; 3],
    /// Linear RGB along the horizon band.
    pub horizon: [f32; 3],
    /// Linear RGB of the nebula tint.
    pub nebula: [f32; 3],
    /// Peak nebula contribution.
    pub nebula_strength: f32,
    pub octaves: u32,
    pub frequency: f64,
    pub segments: u32,
    pub rings: u32,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            seed: 2387,
            zenith: [0.002, 0.003, 0.008],
            horizon: [0.010, 0.014, 0.024],
            nebula: [0.004, 0.045, 0.030],
            nebula_strength: 0.6,
            octaves: 4,
            frequency: 1.6,
            segments: 48,
            rings: 24,
        }
    }
}

/// Vertex of the backdrop sphere (unit radius, centered on the viewer).
#[derive(Debug, Clone, Copy)]
pub struct BackdropVertex {
    pub position: Vec3,
    pub color: [f32; 4],
}

fn deterministic_noise_seed(seed: u64, offset: u64) -> u32 {
    ((seed.wrapping_add(offset))
        .wrapping_mul(0x9e3779b97f4a7c15_u64)
        .wrapping_add(offset.wrapping_mul(0x6c078965_u64))
        >> 32) as u32
}

/// Samples backdrop colors for view directions.
pub struct Backdrop {
    config: BackdropConfig,
    perlin: Perlin,
}

impl Backdrop {
    pub fn new(config: BackdropConfig) -> Self {
        Self {
            perlin: Perlin::new(deterministic_noise_seed(config.seed, 0)),
            config,
        }
    }

    /// Fractal noise in 0..1 at a point on the unit sphere.
    fn fbm(&self, p: Vec3) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = self.config.frequency;
        let mut max_value = 0.0;
        for _ in 0..self.config.octaves {
            value += self.perlin.get([
                p.x as f64 * frequency,
                p.y as f64 * frequency,
                p.z as f64 * frequency,
            ]) * amplitude;
            max_value += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }
        if max_value > 0.0 {
            ((value / max_value + 1.0) * 0.5).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Linear RGBA for a view direction.
    pub fn color(&self, direction: Vec3) -> [f32; 4] {
        let dir = direction.normalize_or_zero();
        let horizon_t = 1.0 - dir.y.abs();
        let band = horizon_t * horizon_t;
        let c = &self.config;
        let mut rgb = [0.0f32; 3];
        for i in 0..3 {
            rgb[i] = c.zenith[i] + (c.horizon[i] - c.zenith[i]) * band;
        }

        // Only the upper half of the noise range shows, so clouds stay patchy.
        let n = self.fbm(dir) as f32;
        let cloud = ((n - 0.5) * 2.0).max(0.0);
        let nebula = cloud * cloud * c.nebula_strength;
        for i in 0..3 {
            rgb[i] += c.nebula[i] * nebula;
        }
        [rgb[0], rgb[1], rgb[2], 1.0]
    }

    /// Build the unit sphere with per-vertex colors.
    pub fn generate_mesh(&self) -> (Vec<BackdropVertex>, Vec<u32>) {
        let segments = self.config.segments.max(3);
        let rings = self.config.rings.max(2);
        let mut vertices = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
        let mut indices = Vec::with_capacity((segments * rings * 6) as usize);

        for ring in 0..=rings {
            let phi = std::f32::consts::PI * ring as f32 / rings as f32;
            let y = phi.cos();
            let ring_radius = phi.sin();
            for segment in 0..=segments {
                let theta = std::f32::consts::TAU * segment as f32 / segments as f32;
                let position = Vec3::new(ring_radius * theta.cos(), y, ring_radius * theta.sin());
                vertices.push(BackdropVertex {
                    position,
                    color: self.color(position),
                });
            }
        }

        for ring in 0..rings {
            for segment in 0..segments {
                let current = ring * (segments + 1) + segment;
                let next = current + segments + 1;
                indices.extend_from_slice(&[current, next, current + 1, current + 1, next, next + 1]);
            }
        }

        log::debug!("Backdrop sphere: {} vertices, {} triangles", vertices.len(), indices.len() / 3);
        (vertices, indices)
    }
}
