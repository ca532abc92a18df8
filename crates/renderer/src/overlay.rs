//! Screen-space overlay geometry: solid rects and bitmap text in one vertex stream.

use bytemuck::{Pod, Zeroable};

use crate::font::{glyph_uv, text_width, GLYPH_PX_H, GLYPH_PX_W};

/// UV marker for solid quads; the overlay shader skips the atlas for negative u.
const SOLID_UV: [f32; 4] = [-1.0, -1.0, -1.0, -1.0];

/// Overlay vertex in normalized device coordinates.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct OverlayVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl OverlayVertex {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
            wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2, 2 => Float32x4];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<OverlayVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Accumulates overlay quads for one frame. Coordinates are pixels from the top-left.
pub struct OverlayTextBuilder {
    pub vertices: Vec<OverlayVertex>,
    pub indices: Vec<u32>,
    screen_w: f32,
    screen_h: f32,
}

impl OverlayTextBuilder {
    pub fn new(screen_w: f32, screen_h: f32) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            screen_w: screen_w.max(1.0),
            screen_h: screen_h.max(1.0),
        }
    }

    fn to_ndc(&self, x: f32, y: f32) -> [f32; 2] {
        [x / self.screen_w * 2.0 - 1.0, 1.0 - y / self.screen_h * 2.0]
    }

    fn push_quad(&mut self, x: f32, y: f32, w: f32, h: f32, uv: [f32; 4], color: [f32; 4]) {
        let base = self.vertices.len() as u32;
        let [u0, v0, u1, v1] = uv;
        let corners = [(x, y, u0, v0), (x + w, y, u1, v0), (x + w, y + h, u1, v1), (x, y + h, u0, v1)];
        for (px, py, u, v) in corners {
            self.vertices.push(OverlayVertex {
                position: self.to_ndc(px, py),
                uv: [u, v],
                color,
            });
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Text with its top-left corner at (`x`, `y`).
    pub fn add_text(&mut self, x: f32, y: f32, text: &str, scale: f32, color: [f32; 4]) {
        let (gw, gh) = (GLYPH_PX_W * scale, GLYPH_PX_H * scale);
        let mut cx = x;
        for ch in text.chars() {
            if let Some(uv) = glyph_uv(ch) {
                self.push_quad(cx, y, gw, gh, uv, color);
            }
            cx += gw;
        }
    }

    /// Text horizontally centered on `center_x`, top edge at `y`.
    pub fn add_text_centered(&mut self, center_x: f32, y: f32, text: &str, scale: f32, color: [f32; 4]) {
        let x = center_x - text_width(text, scale) * 0.5;
        self.add_text(x, y, text, scale, color);
    }

    pub fn add_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        self.push_quad(x, y, w, h, SOLID_UV, color);
    }

    /// Border of `thickness` pixels drawn inside the rect.
    pub fn add_rect_outline(&mut self, x: f32, y: f32, w: f32, h: f32, thickness: f32, color: [f32; 4]) {
        let t = thickness.min(w * 0.5).min(h * 0.5);
        self.add_rect(x, y, w, t, color);
        self.add_rect(x, y + h - t, w, t, color);
        self.add_rect(x, y + t, t, h - 2.0 * t, color);
        self.add_rect(x + w - t, y + t, t, h - 2.0 * t, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn spaces_emit_no_quads() {
        let mut tb = OverlayTextBuilder::new(800.0, 600.0);
        tb.add_text(0.0, 0.0, "A B", 1.0, WHITE);
        assert_eq!(tb.vertices.len(), 8);
        assert_eq!(tb.indices.len(), 12);
        // The B quad starts two advances in.
        let b_left = tb.vertices[4].position[0];
        assert!((b_left - (2.0 * GLYPH_PX_W / 800.0 * 2.0 - 1.0)).abs() < 1e-6);
    }

    #[test]
    fn rect_maps_pixels_to_ndc() {
        let mut tb = OverlayTextBuilder::new(200.0, 100.0);
        tb.add_rect(0.0, 0.0, 200.0, 100.0, WHITE);
        assert_eq!(tb.vertices[0].position, [-1.0, 1.0]);
        assert_eq!(tb.vertices[2].position, [1.0, -1.0]);
        assert!(tb.vertices.iter().all(|v| v.uv[0] < 0.0));
    }

    #[test]
    fn outline_is_four_rects() {
        let mut tb = OverlayTextBuilder::new(100.0, 100.0);
        tb.add_rect_outline(10.0, 10.0, 50.0, 20.0, 1.0, WHITE);
        assert_eq!(tb.indices.len(), 4 * 6);
    }

    #[test]
    fn empty_rect_is_skipped() {
        let mut tb = OverlayTextBuilder::new(100.0, 100.0);
        tb.add_rect(5.0, 5.0, 0.0, 10.0, WHITE);
        assert!(tb.vertices.is_empty());
    }

    #[test]
    fn centered_text_straddles_center() {
        let mut tb = OverlayTextBuilder::new(100.0, 100.0);
        tb.add_text_centered(50.0, 0.0, "II", 1.0, WHITE);
        let left = tb.vertices[0].position[0];
        let right = tb.vertices[tb.vertices.len() - 3].position[0];
        assert!((left + right).abs() < 1e-6);
    }
}
