#![allow(dead_code)]

mod animation;
mod app;
mod binder;
mod camera;
mod components;
mod config;
mod constants;
mod dungeon_gen;
mod error;
mod grid;
mod input;
mod physics;
mod renderer;
mod scene;
mod surface;
mod systems;
mod tile;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use glam::Vec2;
use glutin::prelude::*;
use glutin::surface::WindowSurface;
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::LevelFilter;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use egui_glow::EguiGlow;

use config::GameConfig;
use constants::*;
use error::GameError;
use renderer::Renderer;
use scene::{SceneKind, Session};

#[derive(Parser, Debug)]
#[command(name = "dungeon-walker")]
#[command(about = "Walk around an open arena or a generated dungeon with the arrow keys", long_about = None)]
struct Args {
    /// Scene to start in (overrides the config file)
    #[arg(long, value_enum)]
    scene: Option<SceneKind>,

    /// Seed for dungeon generation; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding the built-in settings
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Serve puffin profiling data on the default puffin_http port
    #[arg(long)]
    profile: bool,
}

fn main() -> Result<(), GameError> {
    let args = Args::parse();

    simplelog::TermLogger::init(
        args.log_level,
        simplelog::ConfigBuilder::new()
            .set_target_level(LevelFilter::Off)
            .set_location_level(LevelFilter::Off)
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(scene) = args.scene {
        config.scene = scene;
    }

    let _profiler = if args.profile {
        let addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
        let server = puffin_http::Server::new(&addr).map_err(|e| GameError::Profiler(e.to_string()))?;
        puffin::set_scopes_on(true);
        log::info!("serving profile data on {addr}");
        Some(server)
    } else {
        None
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("starting {:?} scene with seed {seed}", config.scene);

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, seed);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App {
    config: GameConfig,
    rng: StdRng,
    state: Option<AppState>,
    /// Startup failure raised inside the event loop
    error: Option<GameError>,
}

struct AppState {
    // Window and GL
    window: Window,
    gl_surface: glutin::surface::Surface<WindowSurface>,
    gl_context: glutin::context::PossiblyCurrentContext,
    gl: Arc<glow::Context>,
    egui_glow: EguiGlow,

    renderer: Renderer,
    session: Session,
    input: input::InputState,

    last_frame_time: Instant,
}

impl App {
    fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            state: None,
            error: None,
        }
    }

    fn init_state(&mut self, event_loop: &ActiveEventLoop) -> Result<AppState, GameError> {
        let app::WindowContext {
            window,
            gl_surface,
            gl_context,
            gl,
            egui_glow,
        } = app::create_window(event_loop, self.config.window_width, self.config.window_height)?;

        let renderer = Renderer::new(gl.clone()).map_err(GameError::Renderer)?;
        let size = window.inner_size();
        renderer.resize(size.width as i32, size.height as i32);

        let viewport = Vec2::new(size.width as f32, size.height as f32);
        let session = Session::create(self.config.scene, &self.config, &mut self.rng, viewport);

        Ok(AppState {
            window,
            gl_surface,
            gl_context,
            gl,
            egui_glow,
            renderer,
            session,
            input: input::InputState::new(),
            last_frame_time: Instant::now(),
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match self.init_state(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                log::error!("{err}");
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let state = match &mut self.state {
            Some(s) => s,
            None => return,
        };

        let egui_response = state.egui_glow.on_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                app::resize_surface(&state.gl_surface, &state.gl_context, size.width, size.height);
                state.renderer.resize(size.width as i32, size.height as i32);
                state.session.resize(size.width as f32, size.height as f32);
            }
            WindowEvent::Focused(false) => {
                // Releases that happen while unfocused are never delivered
                state.input.clear();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if egui_response.consumed {
                    return;
                }
                if let PhysicalKey::Code(key) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => {
                            if key == KeyCode::Escape {
                                event_loop.exit();
                            }
                            state.input.press(key);
                        }
                        ElementState::Released => state.input.release(key),
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                state.update_and_render();
                state.window.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}

impl AppState {
    fn update_and_render(&mut self) {
        puffin::GlobalProfiler::lock().new_frame();
        puffin::profile_function!();

        let current_time = Instant::now();
        let raw_dt = (current_time - self.last_frame_time).as_secs_f32();
        self.last_frame_time = current_time;

        // A long stall would otherwise move the player through walls
        let dt = raw_dt.min(MAX_FRAME_DT);

        self.session.update(dt, &self.input);

        if let Err(err) = self.renderer.render(&self.session.camera, &self.session.surface) {
            log::error!("render failed: {err}");
        }

        let labels = self.session.surface.labels();
        let camera = &self.session.camera;
        self.egui_glow.run(&self.window, |ctx| {
            ui::draw_labels(ctx, labels, camera);
        });
        self.egui_glow.paint(&self.window);

        if let Err(err) = self.gl_surface.swap_buffers(&self.gl_context) {
            log::warn!("swap_buffers failed: {err}");
        }
    }
}
