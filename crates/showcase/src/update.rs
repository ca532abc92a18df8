//! Per-frame update: loading gate, pointer routing, orbit camera, ship animation.

use glam::Vec2;
use input::MouseButton;

use crate::detail::{DetailView, ACTIONS};
use crate::loading::LoadingEvent;
use crate::picking::{pick, update_hover};
use crate::scene::{self, Ship};
use crate::ui::{self, ClickTarget};
use crate::Showcase;

impl Showcase {
    pub(crate) fn update(&mut self) {
        self.time.update();
        let (sw, sh) = self.renderer.dimensions();
        let screen = Vec2::new(sw as f32, sh as f32);

        if self.advance_loading() {
            // Spin must not catch up on time spent behind the loading screen.
            self.time.discard_fixed_steps();
            self.input.begin_frame();
            return;
        }

        let cursor = self.input.cursor_position();
        let over_ui = cursor.is_some_and(|p| self.ui_contains(p, screen));

        if self.input.is_mouse_pressed(MouseButton::Left) || self.input.is_mouse_pressed(MouseButton::Right) {
            self.drag_on_ui = over_ui;
        } else if self.input.is_mouse_released(MouseButton::Left) || self.input.is_mouse_released(MouseButton::Right) {
            self.drag_on_ui = false;
        }

        if self.input.is_clicked(MouseButton::Left) {
            if let Some(p) = cursor {
                self.handle_click(p, screen);
            }
        }

        // Hover follows the pointer unless the UI is under it.
        let hover_target = match cursor {
            Some(p) if !over_ui => pick(&self.world, &self.camera.screen_ray(p, screen)).map(|(e, _)| e),
            _ => None,
        };
        update_hover(&mut self.world, hover_target);

        self.update_orbit(over_ui, screen);

        while self.time.should_fixed_update() {
            scene::step_spin(&mut self.world);
        }
        scene::update_poses(&mut self.world, self.time.elapsed_seconds());

        self.input.begin_frame();
    }

    /// Advance the loading screen. Returns true while it still covers the scene.
    fn advance_loading(&mut self) -> bool {
        let Some(loading) = self.loading.as_mut() else {
            return false;
        };
        let mut complete = false;
        for event in loading.advance(self.time.delta()) {
            match event {
                LoadingEvent::Progress(p) => log::trace!("Loading {}%", p),
                LoadingEvent::Complete => complete = true,
            }
        }
        if complete {
            self.loading = None;
        }
        !complete
    }

    /// Whether `p` is over an overlay card that consumes pointer input.
    fn ui_contains(&self, p: Vec2, screen: Vec2) -> bool {
        if ui::header_layout(screen.x).card.contains(p) {
            return true;
        }
        self.details.selected().is_some_and(|record| {
            let view = DetailView::from_record(record);
            ui::detail_layout(&view, screen.x, screen.y).card.contains(p)
        })
    }

    fn handle_click(&mut self, p: Vec2, screen: Vec2) {
        let layout = self.details.selected().map(|record| {
            let view = DetailView::from_record(record);
            ui::detail_layout(&view, screen.x, screen.y)
        });
        match ui::route_click(layout.as_ref(), &ui::header_layout(screen.x), p) {
            ClickTarget::Close => self.details.close(),
            ClickTarget::Action(action) => {
                if let Some(record) = self.details.selected() {
                    log::debug!("{:?} pressed for {}", ACTIONS[action], record.name);
                }
            }
            ClickTarget::Consumed => {}
            ClickTarget::Scene => {
                let ray = self.camera.screen_ray(p, screen);
                let record = pick(&self.world, &ray)
                    .and_then(|(entity, _)| self.world.get::<&Ship>(entity).ok().map(|ship| ship.record));
                if let Some(record) = record {
                    self.details.select(record);
                }
            }
        }
    }

    fn update_orbit(&mut self, over_ui: bool, screen: Vec2) {
        let delta = self.input.mouse_delta();
        let rotating = !self.drag_on_ui && self.input.is_mouse_held(MouseButton::Left);
        let panning = !self.drag_on_ui && self.input.is_mouse_held(MouseButton::Right);

        if rotating && delta != Vec2::ZERO {
            self.orbit.rotate(delta, screen.y);
        }
        if panning && delta != Vec2::ZERO {
            self.orbit.pan(delta, screen.y, &self.camera);
        }
        if !over_ui {
            self.orbit.zoom(self.input.scroll_lines());
        }
        let dragging = self.input.is_dragging(MouseButton::Left) || self.input.is_dragging(MouseButton::Right);
        if !dragging {
            self.orbit.update(self.time.delta_seconds());
        }
        self.orbit.apply(&mut self.camera);
    }
}
