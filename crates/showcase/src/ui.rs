//! Screen-space layout for the header card, detail panel and loading screen.
//!
//! Everything here is pure pixel geometry so the same layout drives both drawing
//! and pointer hit-testing.

use crate::detail::{DetailView, BADGES};
use glam::Vec2;
use rand::prelude::*;
use renderer::{text_width, GLYPH_PX_H, GLYPH_PX_W};

/// Gap between the screen edge and floating cards.
pub const MARGIN: f32 = 16.0;
pub const DETAIL_MAX_WIDTH: f32 = 672.0;
/// Viewport width at which the specifications grid switches to two columns.
const TWO_COLUMN_MIN_WIDTH: f32 = 768.0;
pub const SCREEN_DOT_COUNT: usize = 50;
/// Longest random start delay of a screen dot, seconds.
const SCREEN_DOT_MAX_DELAY: f32 = 2.0;
/// Progress bar width at ui scale 1.
pub const LOADING_BAR_WIDTH: f32 = 320.0;
pub const LOADING_STAR_COUNT: usize = 8;
const LOADING_STAR_BOX: f32 = 128.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }

    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..self }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }
}

/// Glyph scale for body text: doubled on roomy windows.
pub fn ui_scale(screen_w: f32) -> f32 {
    if screen_w >= 960.0 {
        2.0
    } else {
        1.0
    }
}

fn line_height(scale: f32) -> f32 {
    (GLYPH_PX_H + 4.0) * scale
}

/// Greedy word wrap to at most `max_chars` characters per line. Words longer than a
/// line are split.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        if word.is_empty() {
            continue;
        }
        let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
        if needed > max_chars {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.extend(word.iter());
        line_len += word.len();
    }
    if line_len > 0 {
        lines.push(line);
    }
    lines
}

fn chars_that_fit(width: f32, scale: f32) -> usize {
    (width / (GLYPH_PX_W * scale)).floor().max(1.0) as usize
}

// ---- Header ----

pub const HEADER_TITLE: &str = "Explorador Espacial";
pub const HEADER_SUBTITLE: &str = "Haz clic en las naves para explorar sus detalles";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderLayout {
    pub card: Rect,
    pub title_pos: Vec2,
    pub title_scale: f32,
    pub subtitle_pos: Vec2,
    pub subtitle_scale: f32,
}

/// Top-left title card.
pub fn header_layout(screen_w: f32) -> HeaderLayout {
    let scale = ui_scale(screen_w);
    let pad = 8.0 * scale;
    let title_scale = scale * 1.5;
    let subtitle_scale = scale * 0.75;
    let title_w = text_width(HEADER_TITLE, title_scale);
    let subtitle_w = text_width(HEADER_SUBTITLE, subtitle_scale);
    let title_pos = Vec2::new(MARGIN + pad, MARGIN + pad);
    let subtitle_pos = Vec2::new(title_pos.x, title_pos.y + GLYPH_PX_H * title_scale + 4.0 * scale);
    let height = (subtitle_pos.y - MARGIN) + GLYPH_PX_H * subtitle_scale + pad;
    HeaderLayout {
        card: Rect::new(MARGIN, MARGIN, title_w.max(subtitle_w) + pad * 2.0, height),
        title_pos,
        title_scale,
        subtitle_pos,
        subtitle_scale,
    }
}

// ---- Detail panel ----

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub rect: Rect,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpecCell {
    pub rect: Rect,
    pub label: String,
    pub value_lines: Vec<String>,
}

/// A heading followed by wrapped body lines.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSection {
    pub heading_pos: Vec2,
    pub body_pos: Vec2,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailLayout {
    pub card: Rect,
    pub close: Rect,
    pub scale: f32,
    pub line_height: f32,
    /// Inset of text inside a spec cell.
    pub cell_padding: f32,
    pub title_pos: Vec2,
    pub title_lines: Vec<String>,
    pub badges: Vec<Badge>,
    pub description: TextSection,
    pub specs_heading_pos: Vec2,
    pub spec_cells: Vec<SpecCell>,
    pub history: TextSection,
    /// Primary then secondary.
    pub actions: [Rect; 2],
}

impl DetailLayout {
    /// Index into `detail::ACTIONS` of the button under `p`.
    pub fn action_at(&self, p: Vec2) -> Option<usize> {
        self.actions.iter().position(|r| r.contains(p))
    }
}

/// Where a resolved left click lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The detail panel's close button.
    Close,
    /// Index into `detail::ACTIONS`.
    Action(usize),
    /// Swallowed by an overlay card.
    Consumed,
    /// Passes through to ship picking.
    Scene,
}

/// Route a click at `p`: detail panel controls, then the card, then the header, then the scene.
/// `detail` is the open panel's layout, if any.
pub fn route_click(detail: Option<&DetailLayout>, header: &HeaderLayout, p: Vec2) -> ClickTarget {
    if let Some(layout) = detail {
        if layout.close.contains(p) {
            return ClickTarget::Close;
        }
        if let Some(action) = layout.action_at(p) {
            return ClickTarget::Action(action);
        }
        if layout.card.contains(p) {
            return ClickTarget::Consumed;
        }
    }
    if header.card.contains(p) {
        return ClickTarget::Consumed;
    }
    ClickTarget::Scene
}

/// Centered detail card sized to its content. Rects are in window pixels.
pub fn detail_layout(view: &DetailView, screen_w: f32, screen_h: f32) -> DetailLayout {
    let scale = ui_scale(screen_w);
    let lh = line_height(scale);
    let pad = 12.0 * scale;
    let gap = 8.0 * scale;
    let card_w = DETAIL_MAX_WIDTH.min(screen_w - MARGIN * 2.0).max(GLYPH_PX_W * scale * 8.0);
    let content_w = card_w - pad * 2.0;

    // Laid out from the card's top-left, moved into place once the height is known.
    let mut y = pad;

    let close_size = 16.0 * scale;
    let close = Rect::new(card_w - pad - close_size, pad, close_size, close_size);

    let title_scale = scale * 1.5;
    let title_pos = Vec2::new(pad, y);
    let title_lines = wrap_text(view.title, chars_that_fit(content_w - close_size - gap, title_scale));
    y += title_lines.len().max(1) as f32 * line_height(title_scale) + gap * 0.5;

    let mut badges = Vec::with_capacity(BADGES.len());
    let mut bx = pad;
    let badge_h = (GLYPH_PX_H + 4.0) * scale;
    for text in view.badges {
        let w = text_width(text, scale) + 8.0 * scale;
        badges.push(Badge { rect: Rect::new(bx, y, w, badge_h), text });
        bx += w + gap;
    }
    y += badge_h + gap * 2.0;

    let body_chars = chars_that_fit(content_w, scale);
    let description = TextSection {
        heading_pos: Vec2::new(pad, y),
        body_pos: Vec2::new(pad, y + lh),
        lines: wrap_text(view.description, body_chars),
    };
    y += lh * (1 + description.lines.len()) as f32 + gap * 2.0;

    let specs_heading_pos = Vec2::new(pad, y);
    y += lh + gap * 0.5;
    let columns = if screen_w >= TWO_COLUMN_MIN_WIDTH { 2 } else { 1 };
    let cell_w = (content_w - gap * (columns - 1) as f32) / columns as f32;
    let cell_pad = 6.0 * scale;
    let cell_chars = chars_that_fit(cell_w - cell_pad * 2.0, scale);
    let mut spec_cells = Vec::with_capacity(view.specs.len());
    for row in view.specs.chunks(columns) {
        let wrapped: Vec<(String, Vec<String>)> = row
            .iter()
            .map(|spec| (spec.label.clone(), wrap_text(spec.value, cell_chars)))
            .collect();
        let tallest = wrapped.iter().map(|(_, v)| v.len().max(1)).max().unwrap_or(1);
        let cell_h = cell_pad * 2.0 + lh * (1 + tallest) as f32;
        for (col, (label, value_lines)) in wrapped.into_iter().enumerate() {
            let x = pad + col as f32 * (cell_w + gap);
            spec_cells.push(SpecCell { rect: Rect::new(x, y, cell_w, cell_h), label, value_lines });
        }
        y += cell_h + gap;
    }
    y += gap;

    let history = TextSection {
        heading_pos: Vec2::new(pad, y),
        body_pos: Vec2::new(pad, y + lh),
        lines: wrap_text(view.history, body_chars),
    };
    y += lh * (1 + history.lines.len()) as f32 + gap * 2.0;

    let button_h = lh + 12.0 * scale;
    let button_w = (content_w - gap) * 0.5;
    let actions = [
        Rect::new(pad, y, button_w, button_h),
        Rect::new(pad + button_w + gap, y, button_w, button_h),
    ];
    y += button_h + pad;

    let card_h = y;
    let origin_x = ((screen_w - card_w) * 0.5).max(MARGIN);
    let origin_y = ((screen_h - card_h) * 0.5).max(MARGIN);
    let at = |p: Vec2| Vec2::new(p.x + origin_x, p.y + origin_y);
    let shift = |r: Rect| r.translated(origin_x, origin_y);

    DetailLayout {
        card: Rect::new(origin_x, origin_y, card_w, card_h),
        close: shift(close),
        scale,
        line_height: lh,
        cell_padding: cell_pad,
        title_pos: at(title_pos),
        title_lines,
        badges: badges.into_iter().map(|b| Badge { rect: shift(b.rect), ..b }).collect(),
        description: TextSection {
            heading_pos: at(description.heading_pos),
            body_pos: at(description.body_pos),
            ..description
        },
        specs_heading_pos: at(specs_heading_pos),
        spec_cells: spec_cells.into_iter().map(|c| SpecCell { rect: shift(c.rect), ..c }).collect(),
        history: TextSection {
            heading_pos: at(history.heading_pos),
            body_pos: at(history.body_pos),
            ..history
        },
        actions: actions.map(shift),
    }
}

// ---- Screen dots ----

/// A twinkling dot drawn over the scene, placed as a fraction of the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenDot {
    pub position: Vec2,
    /// Animation start delay, seconds.
    pub delay: f32,
}

impl ScreenDot {
    /// Opacity of a 2 s pulse between 1.0 and 0.5. Full opacity before the delay elapses.
    pub fn opacity(&self, time: f32) -> f32 {
        pulse(time - self.delay)
    }
}

fn pulse(t: f32) -> f32 {
    if t < 0.0 {
        return 1.0;
    }
    0.75 + 0.25 * (t * std::f32::consts::PI).cos()
}

pub fn generate_screen_dots<R: Rng>(rng: &mut R) -> Vec<ScreenDot> {
    (0..SCREEN_DOT_COUNT)
        .map(|_| ScreenDot {
            position: Vec2::new(rng.gen::<f32>(), rng.gen::<f32>()),
            delay: rng.gen_range(0.0..SCREEN_DOT_MAX_DELAY),
        })
        .collect()
}

// ---- Loading screen ----

#[derive(Debug, Clone, PartialEq)]
pub struct LoadingLayout {
    pub scale: f32,
    pub title_y: f32,
    pub title_scale: f32,
    pub subtitle_y: f32,
    pub bar: Rect,
    pub caption_y: f32,
    /// Centers of the animated stars, with their start delays.
    pub stars: Vec<(Vec2, f32)>,
    pub star_size: f32,
}

/// Vertically centered column: title, subtitle, progress bar with captions, star row.
pub fn loading_layout(screen_w: f32, screen_h: f32) -> LoadingLayout {
    let scale = ui_scale(screen_w);
    let title_scale = scale * 2.0;
    let lh = line_height(scale);
    let gap = 16.0 * scale;
    let bar_w = (LOADING_BAR_WIDTH * scale).min(screen_w - MARGIN * 2.0);
    let bar_h = 4.0 * scale;
    let box_size = LOADING_STAR_BOX * scale * 0.5;

    let total = GLYPH_PX_H * title_scale + gap * 0.5 + lh + gap + bar_h + gap * 0.5 + lh + gap + box_size;
    let top = ((screen_h - total) * 0.5).max(0.0);

    let title_y = top;
    let subtitle_y = title_y + GLYPH_PX_H * title_scale + gap * 0.5;
    let bar_y = subtitle_y + lh + gap;
    let caption_y = bar_y + bar_h + gap * 0.5;
    let box_y = caption_y + lh + gap;
    let box_x = (screen_w - box_size) * 0.5;

    let stars = (0..LOADING_STAR_COUNT)
        .map(|i| {
            let fx = (20.0 + i as f32 * 15.0) / 100.0;
            let fy = (30.0 + (i as f32).sin() * 20.0) / 100.0;
            (Vec2::new(box_x + fx * box_size, box_y + fy * box_size), i as f32 * 0.2)
        })
        .collect();

    LoadingLayout {
        scale,
        title_y,
        title_scale,
        subtitle_y,
        bar: Rect::new((screen_w - bar_w) * 0.5, bar_y, bar_w, bar_h),
        caption_y,
        stars,
        star_size: 4.0 * scale,
    }
}

/// Opacity of a loading-screen star at `time`.
pub fn loading_star_opacity(delay: f32, time: f32) -> f32 {
    pulse(time - delay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{find, SpaceshipRecord};
    use rand::rngs::StdRng;

    #[test]
    fn wrap_respects_width() {
        let text = "Nave de combate ligera diseñada para misiones de reconocimiento y combate rápido.";
        let lines = wrap_text(text, 20);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 20), "{lines:?}");
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn wrap_splits_long_words() {
        let lines = wrap_text("ab abcdefghij cd", 4);
        assert_eq!(lines, vec!["ab", "abcd", "efgh", "ij", "cd"]);
    }

    #[test]
    fn wrap_empty_text_has_no_lines() {
        assert!(wrap_text("   ", 10).is_empty());
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(r.contains(Vec2::new(14.9, 14.9)));
        assert!(!r.contains(Vec2::new(15.0, 12.0)));
    }

    #[test]
    fn header_sits_top_left() {
        let h = header_layout(1280.0);
        assert_eq!((h.card.x, h.card.y), (MARGIN, MARGIN));
        assert!(h.card.contains(h.title_pos));
        assert!(h.card.contains(h.subtitle_pos));
        let subtitle_end = h.subtitle_pos.x + text_width(HEADER_SUBTITLE, h.subtitle_scale);
        assert!(subtitle_end <= h.card.right());
    }

    #[test]
    fn detail_card_is_centered_and_capped() {
        let view = DetailView::from_record(find(2).unwrap());
        let layout = detail_layout(&view, 1920.0, 1080.0);
        assert_eq!(layout.card.w, DETAIL_MAX_WIDTH);
        assert!((layout.card.center().x - 960.0).abs() < 1e-3);
        assert_eq!(layout.spec_cells.len(), 4);
        // Two columns on wide screens.
        assert_eq!(layout.spec_cells[0].rect.y, layout.spec_cells[1].rect.y);
        assert!(layout.spec_cells[1].rect.x > layout.spec_cells[0].rect.x);
    }

    #[test]
    fn detail_controls_lie_inside_card() {
        let view = DetailView::from_record(find(4).unwrap());
        for (w, h) in [(1280.0, 720.0), (640.0, 480.0)] {
            let layout = detail_layout(&view, w, h);
            let card = layout.card;
            for r in [layout.close, layout.actions[0], layout.actions[1]] {
                assert!(r.x >= card.x && r.right() <= card.right() + 1e-3, "{r:?} outside {card:?}");
                assert!(r.y >= card.y && r.bottom() <= card.bottom() + 1e-3);
            }
            assert!(layout.actions[0].right() < layout.actions[1].x);
            assert_eq!(layout.action_at(layout.actions[1].center()), Some(1));
            assert_eq!(layout.action_at(layout.close.center()), None);
        }
    }

    #[test]
    fn clicks_route_by_panel_then_header() {
        let header = header_layout(1280.0);
        let view = DetailView::from_record(find(3).unwrap());
        let layout = detail_layout(&view, 1280.0, 720.0);
        let open = Some(&layout);

        assert_eq!(route_click(open, &header, layout.close.center()), ClickTarget::Close);
        assert_eq!(route_click(open, &header, layout.actions[0].center()), ClickTarget::Action(0));
        assert_eq!(route_click(open, &header, layout.actions[1].center()), ClickTarget::Action(1));
        assert_eq!(route_click(open, &header, layout.title_pos), ClickTarget::Consumed);
        assert_eq!(route_click(open, &header, header.card.center()), ClickTarget::Consumed);

        // Outside the card the ships stay clickable while the panel is open.
        let outside = Vec2::new(layout.card.x - 5.0, layout.card.bottom() - 5.0);
        assert!(!header.card.contains(outside));
        assert_eq!(route_click(open, &header, outside), ClickTarget::Scene);
    }

    #[test]
    fn closed_panel_controls_do_not_capture() {
        let header = header_layout(1280.0);
        let view = DetailView::from_record(find(3).unwrap());
        let layout = detail_layout(&view, 1280.0, 720.0);
        assert_eq!(route_click(None, &header, layout.close.center()), ClickTarget::Scene);
        assert_eq!(route_click(None, &header, layout.actions[0].center()), ClickTarget::Scene);
        assert_eq!(route_click(None, &header, header.card.center()), ClickTarget::Consumed);
    }

    #[test]
    fn ship_without_specs_lays_out_empty_grid() {
        let bare = SpaceshipRecord { specs: &[], ..*find(1).unwrap() };
        let view = DetailView::from_record(&bare);
        assert!(view.specs.is_empty());

        for width in [1280.0, 640.0] {
            let layout = detail_layout(&view, width, 720.0);
            assert!(layout.spec_cells.is_empty());
            assert!(!layout.history.lines.is_empty());
            assert!(layout.history.heading_pos.y > layout.specs_heading_pos.y);
            assert!(layout.actions[0].y > layout.history.body_pos.y);
            assert!(layout.actions[0].bottom() <= layout.card.bottom());
        }
    }

    #[test]
    fn narrow_screens_stack_specs() {
        let view = DetailView::from_record(find(1).unwrap());
        let layout = detail_layout(&view, 640.0, 900.0);
        let cells = &layout.spec_cells;
        assert!(cells.windows(2).all(|w| w[1].rect.y > w[0].rect.y));
        assert!(layout.card.w <= 640.0 - MARGIN * 2.0);
    }

    #[test]
    fn screen_dots_are_on_screen() {
        let mut rng = StdRng::seed_from_u64(3);
        let dots = generate_screen_dots(&mut rng);
        assert_eq!(dots.len(), SCREEN_DOT_COUNT);
        for d in &dots {
            assert!((0.0..1.0).contains(&d.position.x) && (0.0..1.0).contains(&d.position.y));
            assert!((0.0..SCREEN_DOT_MAX_DELAY).contains(&d.delay));
            for t in [0.0, 0.7, 1.9, 3.3] {
                let o = d.opacity(t);
                assert!((0.5..=1.0).contains(&o));
            }
        }
    }

    #[test]
    fn loading_stars_follow_reference_pattern() {
        let layout = loading_layout(1280.0, 720.0);
        assert_eq!(layout.stars.len(), LOADING_STAR_COUNT);
        assert!(layout.stars.windows(2).all(|w| w[1].0.x > w[0].0.x));
        assert!((layout.stars[3].1 - 0.6).abs() < 1e-6);
        assert_eq!(layout.bar.w, LOADING_BAR_WIDTH * 2.0);
        assert!(layout.bar.y > layout.subtitle_y && layout.caption_y > layout.bar.y);
    }
}
