//! Overlay rendering: header card, screen dots, hover labels, detail panel, loading screen.

use engine_core::hex_to_linear;
use glam::Vec2;
use hecs::World;
use renderer::{text_width, Camera, OverlayTextBuilder, GLYPH_PX_H};

use crate::detail::{capitalize_words, DetailView, DESCRIPTION_HEADING, HISTORY_HEADING, SPECS_HEADING};
use crate::loading::{LoadingSequence, SUBTITLE, TITLE};
use crate::scene::{self, LABEL_COLOR, LABEL_WORLD_HEIGHT};
use crate::ui::{self, DetailLayout, Rect, ScreenDot, TextSection};
use crate::Showcase;

// Dark theme with a green accent, matching the scene lights.
const BACKGROUND: &str = "#030712";
const POPOVER: &str = "#0f172a";
const CARD: &str = "#111827";
const ACCENT: &str = "#10b981";
const FOREGROUND: &str = "#f9fafb";
const MUTED: &str = "#9ca3af";
const SECONDARY: &str = "#475569";
const ON_PRIMARY: &str = "#022c22";

/// Linear RGBA for the overlay (the surface is sRGB).
fn color(hex: &str, alpha: f32) -> [f32; 4] {
    let [r, g, b, _] = hex_to_linear(hex).unwrap_or([1.0, 0.0, 1.0, 1.0]);
    [r, g, b, alpha]
}

/// Build the screen-space overlay for the current frame.
pub fn build(state: &Showcase, sw: f32, sh: f32) -> OverlayTextBuilder {
    let mut tb = OverlayTextBuilder::new(sw, sh);

    if let Some(loading) = &state.loading {
        build_loading(&mut tb, loading, sw, sh);
        return tb;
    }

    let time = state.time.elapsed_seconds();
    build_screen_dots(&mut tb, &state.screen_dots, time, sw, sh);
    build_hover_labels(&mut tb, &state.world, &state.camera, sw, sh);
    build_header(&mut tb, sw);

    if let Some(record) = state.details.selected() {
        let view = DetailView::from_record(record);
        let layout = ui::detail_layout(&view, sw, sh);
        build_detail(&mut tb, &layout, sw, sh);
    }
    tb
}

fn build_screen_dots(tb: &mut OverlayTextBuilder, dots: &[ScreenDot], time: f32, sw: f32, sh: f32) {
    let size = 2.0 * ui::ui_scale(sw);
    for dot in dots {
        let x = dot.position.x * sw;
        let y = dot.position.y * sh;
        tb.add_rect(x, y, size, size, color(ACCENT, dot.opacity(time)));
    }
}

/// Ship names floating above hovered ships, sized like text at that depth.
fn build_hover_labels(tb: &mut OverlayTextBuilder, world: &World, camera: &Camera, sw: f32, sh: f32) {
    let screen = Vec2::new(sw, sh);
    for (name, anchor, ship_scale) in scene::hover_labels(world) {
        let Some(center) = camera.world_to_screen(anchor, screen) else {
            continue;
        };
        let top = anchor + camera.up() * LABEL_WORLD_HEIGHT * ship_scale;
        let px_height = camera
            .world_to_screen(top, screen)
            .map(|p| (p - center).length())
            .unwrap_or(GLYPH_PX_H);
        let scale = (px_height / GLYPH_PX_H).round().max(1.0);
        let y = center.y - GLYPH_PX_H * scale * 0.5;
        tb.add_text_centered(center.x, y, name, scale, color(LABEL_COLOR, 1.0));
    }
}

fn build_header(tb: &mut OverlayTextBuilder, sw: f32) {
    let header = ui::header_layout(sw);
    let card = header.card;
    tb.add_rect(card.x, card.y, card.w, card.h, color(POPOVER, 0.8));
    tb.add_rect_outline(card.x, card.y, card.w, card.h, 1.0, color(ACCENT, 0.3));
    tb.add_text(header.title_pos.x, header.title_pos.y, ui::HEADER_TITLE, header.title_scale, color(FOREGROUND, 1.0));
    tb.add_text(
        header.subtitle_pos.x,
        header.subtitle_pos.y,
        ui::HEADER_SUBTITLE,
        header.subtitle_scale,
        color(MUTED, 1.0),
    );
}

fn fill(tb: &mut OverlayTextBuilder, r: Rect, c: [f32; 4]) {
    tb.add_rect(r.x, r.y, r.w, r.h, c);
}

fn outline(tb: &mut OverlayTextBuilder, r: Rect, c: [f32; 4]) {
    tb.add_rect_outline(r.x, r.y, r.w, r.h, 1.0, c);
}

/// Text vertically centered in `r`, horizontally centered on it.
fn label_in(tb: &mut OverlayTextBuilder, r: Rect, text: &str, scale: f32, c: [f32; 4]) {
    let center = r.center();
    tb.add_text_centered(center.x, center.y - GLYPH_PX_H * scale * 0.5, text, scale, c);
}

fn text_section(tb: &mut OverlayTextBuilder, section: &TextSection, heading: &str, layout: &DetailLayout) {
    let s = layout.scale;
    let inset = 2.0 * s;
    tb.add_text(section.heading_pos.x, section.heading_pos.y + inset, heading, s, color(FOREGROUND, 1.0));
    for (i, line) in section.lines.iter().enumerate() {
        let y = section.body_pos.y + i as f32 * layout.line_height + inset;
        tb.add_text(section.body_pos.x, y, line, s, color(MUTED, 1.0));
    }
}

fn build_detail(tb: &mut OverlayTextBuilder, layout: &DetailLayout, sw: f32, sh: f32) {
    let s = layout.scale;
    let inset = 2.0 * s;

    // Dimmed backdrop, then the card.
    tb.add_rect(0.0, 0.0, sw, sh, color(BACKGROUND, 0.8));
    fill(tb, layout.card, color(CARD, 0.95));
    outline(tb, layout.card, color(ACCENT, 0.3));

    fill(tb, layout.close, color(SECONDARY, 0.2));
    label_in(tb, layout.close, "X", s, color(FOREGROUND, 1.0));

    let title_scale = s * 1.5;
    let title_lh = layout.line_height * 1.5;
    for (i, line) in layout.title_lines.iter().enumerate() {
        let y = layout.title_pos.y + i as f32 * title_lh;
        tb.add_text(layout.title_pos.x, y, line, title_scale, color(FOREGROUND, 1.0));
    }

    for (i, badge) in layout.badges.iter().enumerate() {
        let text_color = if i == 0 {
            fill(tb, badge.rect, color(ACCENT, 0.2));
            color(FOREGROUND, 1.0)
        } else {
            color(ACCENT, 1.0)
        };
        outline(tb, badge.rect, color(ACCENT, 0.3));
        label_in(tb, badge.rect, badge.text, s, text_color);
    }

    text_section(tb, &layout.description, DESCRIPTION_HEADING, layout);

    tb.add_text(layout.specs_heading_pos.x, layout.specs_heading_pos.y + inset, SPECS_HEADING, s, color(FOREGROUND, 1.0));
    for cell in &layout.spec_cells {
        fill(tb, cell.rect, color(SECONDARY, 0.2));
        outline(tb, cell.rect, color(SECONDARY, 0.3));
        let x = cell.rect.x + layout.cell_padding;
        let y = cell.rect.y + layout.cell_padding + inset;
        tb.add_text(x, y, &capitalize_words(&cell.label), s, color(MUTED, 1.0));
        for (i, line) in cell.value_lines.iter().enumerate() {
            tb.add_text(x, y + (i + 1) as f32 * layout.line_height, line, s, color(FOREGROUND, 1.0));
        }
    }

    text_section(tb, &layout.history, HISTORY_HEADING, layout);

    let [primary, secondary] = layout.actions;
    fill(tb, primary, color(ACCENT, 1.0));
    label_in(tb, primary, crate::detail::ACTIONS[0], s, color(ON_PRIMARY, 1.0));
    fill(tb, secondary, color(SECONDARY, 0.2));
    outline(tb, secondary, color(SECONDARY, 0.3));
    label_in(tb, secondary, crate::detail::ACTIONS[1], s, color(FOREGROUND, 1.0));
}

fn build_loading(tb: &mut OverlayTextBuilder, loading: &LoadingSequence, sw: f32, sh: f32) {
    let layout = ui::loading_layout(sw, sh);
    let s = layout.scale;
    let time = loading.elapsed().as_secs_f32();

    tb.add_rect(0.0, 0.0, sw, sh, color(BACKGROUND, 1.0));
    tb.add_text_centered(sw * 0.5, layout.title_y, TITLE, layout.title_scale, color(FOREGROUND, 1.0));
    tb.add_text_centered(sw * 0.5, layout.subtitle_y, SUBTITLE, s, color(MUTED, 1.0));

    let bar = layout.bar;
    fill(tb, bar, color(SECONDARY, 0.2));
    let filled = bar.w * f32::from(loading.progress()) / 100.0;
    if filled > 0.0 {
        tb.add_rect(bar.x, bar.y, filled, bar.h, color(ACCENT, 1.0));
    }

    tb.add_text(bar.x, layout.caption_y, loading.phase_text(), s, color(MUTED, 1.0));
    let percent = format!("{}%", loading.progress());
    tb.add_text(bar.right() - text_width(&percent, s), layout.caption_y, &percent, s, color(MUTED, 1.0));

    for (pos, delay) in &layout.stars {
        let opacity = ui::loading_star_opacity(*delay, time);
        tb.add_rect(pos.x, pos.y, layout.star_size, layout.star_size, color(ACCENT, opacity));
    }
}
