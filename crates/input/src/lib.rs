//! Pointer input handling: buttons, cursor, scroll, and click-vs-drag resolution.

use glam::Vec2;
use std::collections::{HashMap, HashSet};

/// Pointer travel (in physical pixels) beyond which a press becomes a drag instead of a click.
pub const CLICK_DRAG_THRESHOLD: f32 = 5.0;

/// Manages pointer state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,
    /// Mouse buttons pressed this frame.
    mouse_pressed: HashSet<MouseButton>,
    /// Mouse buttons released this frame.
    mouse_released: HashSet<MouseButton>,
    /// Buttons whose press/release resolved to a click this frame.
    mouse_clicked: HashSet<MouseButton>,
    /// Pointer travel since each held button went down.
    press_travel: HashMap<MouseButton, f32>,

    /// Mouse position in window coordinates.
    mouse_position: Vec2,
    /// Mouse movement accumulated since the last `begin_frame`.
    mouse_delta: Vec2,
    /// Whether the cursor is inside the window.
    cursor_inside: bool,
    /// Whether a position has been reported since the cursor entered.
    has_position: bool,

    /// Scroll lines accumulated since the last `begin_frame` (positive = away from user).
    scroll_lines: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call once per frame after the update has consumed it.
    pub fn begin_frame(&mut self) {
        self.mouse_pressed.clear();
        self.mouse_released.clear();
        self.mouse_clicked.clear();
        self.mouse_delta = Vec2::ZERO;
        self.scroll_lines = 0.0;
    }

    /// Process a mouse button event.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.mouse_held.contains(&button) {
                    self.mouse_pressed.insert(button);
                    self.press_travel.insert(button, 0.0);
                }
                self.mouse_held.insert(button);
            }
            ElementState::Released => {
                if self.mouse_held.remove(&button) {
                    let travel = self.press_travel.remove(&button).unwrap_or(0.0);
                    if travel <= CLICK_DRAG_THRESHOLD {
                        self.mouse_clicked.insert(button);
                    } else {
                        log::trace!("{:?} released after {:.1}px drag", button, travel);
                    }
                }
                self.mouse_released.insert(button);
            }
        }
    }

    /// Process cursor position update.
    pub fn process_cursor_position(&mut self, position: (f64, f64)) {
        let position = Vec2::new(position.0 as f32, position.1 as f32);
        if self.has_position {
            let delta = position - self.mouse_position;
            self.mouse_delta += delta;
            let step = delta.length();
            for travel in self.press_travel.values_mut() {
                *travel += step;
            }
        }
        self.mouse_position = position;
        self.has_position = true;
        self.cursor_inside = true;
    }

    /// Cursor left the window: no pointer target until it comes back.
    pub fn process_cursor_left(&mut self) {
        self.cursor_inside = false;
        self.has_position = false;
    }

    /// Accumulate scroll wheel movement in lines.
    pub fn process_scroll_lines(&mut self, lines: f32) {
        self.scroll_lines += lines;
    }

    /// Accumulate trackpad scroll in pixels (converted at a nominal line height).
    pub fn process_scroll_pixels(&mut self, pixels: f64) {
        const PIXELS_PER_LINE: f64 = 40.0;
        self.scroll_lines += (pixels / PIXELS_PER_LINE) as f32;
    }

    // Query methods

    /// Check if a mouse button is held.
    pub fn is_mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Check if a mouse button was pressed this frame.
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    /// Check if a mouse button was released this frame.
    pub fn is_mouse_released(&self, button: MouseButton) -> bool {
        self.mouse_released.contains(&button)
    }

    /// Check if a press/release of this button resolved to a click (not a drag) this frame.
    pub fn is_clicked(&self, button: MouseButton) -> bool {
        self.mouse_clicked.contains(&button)
    }

    /// Held and moved past the click threshold.
    pub fn is_dragging(&self, button: MouseButton) -> bool {
        self.press_travel
            .get(&button)
            .is_some_and(|travel| *travel > CLICK_DRAG_THRESHOLD)
    }

    /// Get the mouse position in window coordinates, if the cursor is inside the window.
    pub fn cursor_position(&self) -> Option<Vec2> {
        (self.cursor_inside && self.has_position).then_some(self.mouse_position)
    }

    /// Mouse movement since the last `begin_frame`.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Scroll lines since the last `begin_frame`.
    pub fn scroll_lines(&self) -> f32 {
        self.scroll_lines
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
