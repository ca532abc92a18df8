//! Space Explorer: an orbitable starfield with five clickable spaceships and a detail panel.

mod catalog;
mod config;
mod detail;
mod events;
mod hull;
mod loading;
mod orbit;
mod picking;
mod render;
mod scene;
mod selection;
mod ui;
mod update;

use anyhow::Result;
use engine_core::Time;
use glam::Vec3;
use hecs::World;
use input::InputState;
use procgen::{Backdrop, BackdropConfig, Star, StarfieldConfig};
use renderer::{Camera, Mesh, Renderer, Vertex};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Fullscreen, Window, WindowId},
};

use config::ShowcaseConfig;
use hull::HullStyle;
use loading::LoadingSequence;
use orbit::OrbitControls;
use selection::DetailCoordinator;
use ui::ScreenDot;

const CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, 10.0);

/// Everything the showcase owns: GPU state, the ship world, camera, and UI state.
pub struct Showcase {
    pub renderer: Renderer,
    pub camera: Camera,
    pub orbit: OrbitControls,
    pub input: InputState,
    pub time: Time,
    pub world: World,
    pub hull: HullStyle,
    /// One mesh per hull part, indexed like `hull.parts()`.
    pub part_meshes: Vec<Mesh>,
    pub star_mesh: Mesh,
    pub backdrop_mesh: Mesh,
    pub stars: Vec<Star>,
    pub star_twinkle_speed: f32,
    pub screen_dots: Vec<ScreenDot>,
    pub details: DetailCoordinator,
    /// Present until the loading screen completes.
    pub loading: Option<LoadingSequence>,
    /// The current drag began over an overlay card, so the camera ignores it.
    drag_on_ui: bool,
    pub running: bool,
}

impl Showcase {
    async fn new(window: Arc<Window>, config: ShowcaseConfig) -> Result<Self> {
        let mut renderer = Renderer::new(window, config.vsync).await?;
        let (width, height) = renderer.dimensions();

        let mut camera = Camera::default();
        camera.set_aspect(width, height);
        let mut orbit = OrbitControls::from_eye(CAMERA_START, Vec3::ZERO);
        orbit.auto_rotate = config.auto_rotate;
        orbit.auto_rotate_speed = config.auto_rotate_speed;
        orbit.apply(&mut camera);

        let hull = config.hull_style;
        let part_meshes = hull
            .parts()
            .iter()
            .map(|part| part.shape.mesh_data().upload(renderer.device()))
            .collect();
        let star_mesh = Mesh::billboard_quad(renderer.device(), 1.0);

        let (backdrop_vertices, backdrop_indices) = Backdrop::new(BackdropConfig::default()).generate_mesh();
        let backdrop_vertices: Vec<Vertex> = backdrop_vertices
            .iter()
            .map(|v| Vertex::with_color(v.position.to_array(), (-v.position).to_array(), [0.0, 0.0], v.color))
            .collect();
        let backdrop_mesh = Mesh::new(renderer.device(), &backdrop_vertices, &backdrop_indices);

        let starfield = StarfieldConfig {
            count: config.star_count,
            ..Default::default()
        };
        let stars = procgen::generate_starfield(&starfield);
        let screen_dots = ui::generate_screen_dots(&mut rand::thread_rng());

        let mut world = World::new();
        scene::spawn_ships(&mut world, catalog::catalog(), hull);

        renderer.update_lights(&scene::scene_lights());

        let loading = if config.skip_loading { None } else { Some(LoadingSequence::new()) };

        log::info!(
            "Showcase ready: {} stars, {} ships, {}x{}",
            stars.len(),
            catalog::catalog().len(),
            width,
            height
        );

        Ok(Self {
            renderer,
            camera,
            orbit,
            input: InputState::new(),
            time: Time::new(),
            world,
            hull,
            part_meshes,
            star_mesh,
            backdrop_mesh,
            stars,
            star_twinkle_speed: starfield.speed,
            screen_dots,
            details: DetailCoordinator::new(),
            loading,
            drag_on_ui: false,
            running: true,
        })
    }

    fn render(&mut self) -> Result<()> {
        render::run(self)
    }
}

struct App {
    state: Option<Showcase>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_none() {
            let config = ShowcaseConfig::load();
            let mut window_attrs = Window::default_attributes()
                .with_title("Explorador Espacial")
                .with_inner_size(winit::dpi::LogicalSize::new(config.window_width, config.window_height));
            if config.fullscreen {
                window_attrs = window_attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
            }

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            match pollster::block_on(Showcase::new(window.clone(), config)) {
                Ok(s) => {
                    self.state = Some(s);
                    window.request_redraw();
                }
                Err(e) => {
                    log::error!("Failed to initialize showcase: {}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) || !state.running {
                event_loop.exit();
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting Explorador Espacial");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App { state: None };
    event_loop.run_app(&mut app)?;

    Ok(())
}
