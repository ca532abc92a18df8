//! Starfield generation: a spherical shell of stars around the scene origin.

use glam::Vec3;
use rand::prelude::*;

/// Parameters for the background star shell.
#[derive(Debug, Clone, Copy)]
pub struct StarfieldConfig {
    pub seed: u64,
    /// Inner radius of the shell.
    pub radius: f32,
    /// Shell thickness; stars lie in `radius..=radius + depth`.
    pub depth: f32,
    pub count: usize,
    /// Size multiplier; each star gets `(0.5..1.0) * factor`.
    pub factor: f32,
    /// HSL saturation of star colors (0 = white stars).
    pub saturation: f32,
    /// Twinkle speed multiplier.
    pub speed: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            seed: 7,
            radius: 300.0,
            depth: 60.0,
            count: 2000,
            factor: 7.0,
            saturation: 0.0,
            speed: 1.0,
        }
    }
}

/// One generated star.
#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub position: Vec3,
    /// Linear RGBA color.
    pub color: [f32; 4],
    pub size: f32,
    /// Twinkle phase offset in radians.
    pub phase: f32,
}

impl Star {
    /// Brightness multiplier at `time` seconds, in `0.5..=1.0`.
    pub fn twinkle(&self, time: f32, speed: f32) -> f32 {
        0.75 + 0.25 * (time * speed + self.phase).sin()
    }
}

/// Generate the star shell. Radius steps inward by at most `depth / count` per star,
/// so the shell is filled from the outside in and never crosses the inner radius.
pub fn generate_starfield(config: &StarfieldConfig) -> Vec<Star> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let count = config.count.max(1);
    let increment = config.depth / count as f32;
    let mut r = config.radius + config.depth;

    (0..config.count)
        .map(|i| {
            r -= increment * rng.gen::<f32>();
            let phi = (1.0 - rng.gen::<f32>() * 2.0).clamp(-1.0, 1.0).acos();
            let theta = rng.gen::<f32>() * std::f32::consts::TAU;
            let position = Vec3::new(
                r * phi.sin() * theta.sin(),
                r * phi.cos(),
                r * phi.sin() * theta.cos(),
            );

            let hue = i as f32 / count as f32;
            let [cr, cg, cb] = hsl_to_rgb(hue, config.saturation, 0.9);
            let size = (0.5 + 0.5 * rng.gen::<f32>()) * config.factor;
            let phase = rng.gen::<f32>() * std::f32::consts::TAU;

            Star {
                position,
                color: [cr, cg, cb, 1.0],
                size,
                phase,
            }
        })
        .collect()
}

/// Convert HSL (all components 0..1) to RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s <= 0.0 {
        return [l, l, l];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |mut t: f32| {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };
    [channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starfield_count_and_shell_bounds() {
        let config = StarfieldConfig::default();
        let stars = generate_starfield(&config);
        assert_eq!(stars.len(), 2000);
        for star in &stars {
            let d = star.position.length();
            assert!(d >= config.radius - 0.01, "star inside shell: {d}");
            assert!(d <= config.radius + config.depth + 0.01, "star outside shell: {d}");
        }
    }

    #[test]
    fn starfield_same_seed_same_stars() {
        let config = StarfieldConfig { count: 50, ..Default::default() };
        let a = generate_starfield(&config);
        let b = generate_starfield(&config);
        assert_eq!(a[17].position, b[17].position);
        assert_eq!(a[49].size, b[49].size);
    }

    #[test]
    fn zero_saturation_gives_white_stars() {
        let stars = generate_starfield(&StarfieldConfig { count: 10, ..Default::default() });
        for star in stars {
            assert_eq!(star.color[0], star.color[1]);
            assert_eq!(star.color[1], star.color[2]);
            assert!((star.color[0] - 0.9).abs() < 1e-6);
        }
    }

    #[test]
    fn sizes_scale_with_factor() {
        let config = StarfieldConfig { count: 200, ..Default::default() };
        for star in generate_starfield(&config) {
            assert!(star.size >= 0.5 * config.factor && star.size <= config.factor);
        }
    }

    #[test]
    fn twinkle_stays_in_range() {
        let star = Star { position: Vec3::ZERO, color: [1.0; 4], size: 1.0, phase: 1.3 };
        for i in 0..100 {
            let b = star.twinkle(i as f32 * 0.37, 1.0);
            assert!((0.5..=1.0).contains(&b));
        }
    }

    #[test]
    fn hsl_primary_red() {
        let [r, g, b] = hsl_to_rgb(0.0, 1.0, 0.5);
        assert!((r - 1.0).abs() < 1e-6 && g.abs() < 1e-6 && b.abs() < 1e-6);
    }
}
