//! Main application handler for the game

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use super::audio::Audio;
use super::config::AppConfig;
use super::debug_ui::DebugUIState;
use super::hud;
use super::input::InputCollector;
use super::renderer::Renderer;
use super::window::window_attributes_from_config;
use crate::sim::{SessionEvent, World};

/// Main game application
pub struct App {
    config: AppConfig,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    world: World,
    /// None when no output device could be opened
    audio: Option<Audio>,
    debug_ui: DebugUIState,
    input_collector: InputCollector,
    last_update: Option<Instant>,
}

impl App {
    /// Creates a new game application with the provided configuration
    pub fn new(mut config: AppConfig) -> Self {
        info!(profile = %config.profile, "Starting game");
        info!(?config.window, "Window configuration");

        config.game = config.game.or_default_if_unplayable();

        let mut world = World::new(config.game.clone());
        if !config.audio.enabled {
            // Nothing is playing yet, so the stop cue has nothing to stop
            world.session_mut().set_sound_enabled(false);
            world.session_mut().drain_events();
        }

        Self {
            config,
            window: None,
            renderer: None,
            world,
            audio: None,
            debug_ui: DebugUIState::default(),
            input_collector: InputCollector::new(),
            last_update: None,
        }
    }

    /// Creates a new game application with configuration loaded from environment
    pub fn from_env() -> Self {
        let config = AppConfig::load_from_env().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using default configuration");
            AppConfig::builtin(&AppConfig::profile_from_env())
        });
        Self::new(config)
    }

    fn open_audio(&mut self) {
        match Audio::new(self.config.audio.clone()) {
            Ok(mut audio) => {
                if self.world.session().sound_enabled() {
                    audio.start_music();
                }
                self.audio = Some(audio);
            }
            Err(e) => warn!(error = %e, "Audio unavailable, running silently"),
        }
    }

    /// Hands queued session events to audio and the event loop
    fn process_session_events(&mut self, event_loop: &ActiveEventLoop) {
        for event in self.world.session_mut().drain_events() {
            match event {
                SessionEvent::Sound(cue) => {
                    if let Some(audio) = &mut self.audio {
                        audio.play(cue);
                    }
                }
                SessionEvent::ExitRequested => {
                    info!("Exit requested");
                    event_loop.exit();
                }
                SessionEvent::RunEnded { cause, score } => {
                    info!(?cause, distance = score as u64, "Run over");
                }
                SessionEvent::StateChanged { .. } => {}
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };

        let snapshot = self.world.session().snapshot();
        let show_hitboxes = self.debug_ui.hitboxes_visible();
        let adapter_info = renderer.adapter_info().clone();
        let surface_config = renderer.config().clone();

        let debug_ui = &mut self.debug_ui;
        let world = &mut self.world;
        let mut clicked = None;

        let result = renderer.draw(window, &snapshot, show_hitboxes, |ctx| {
            if let Some(action) = hud::render(ctx, &snapshot) {
                clicked = Some(action);
            }
            debug_ui.render(ctx, world, &adapter_info, &surface_config);
        });

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring");
                renderer.resize(window.inner_size());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => {
                error!(error = %e, "Render error");
            }
        }

        if let Some(action) = clicked {
            self.world.session_mut().dispatch(action);
            self.process_session_events(event_loop);
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = window_attributes_from_config(&self.config.window);
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!(error = %e, "Failed to create window");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        info!(
            window.width = size.width,
            window.height = size.height,
            "Window created successfully"
        );

        // winit's event loop is synchronous, so block on renderer setup
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!(error = %e, "Failed to create tokio runtime");
                event_loop.exit();
                return;
            }
        };

        let game = &self.config.game;
        let renderer = runtime.block_on(Renderer::new(
            window.clone(),
            [game.field_width, game.field_height],
            game.background_width,
            self.config.window.vsync,
        ));

        match renderer {
            Ok(renderer) => {
                info!("Renderer initialized successfully");
                self.renderer = Some(renderer);
                self.window = Some(window);
                self.last_update = Some(Instant::now());
            }
            Err(e) => {
                error!(error = %e, "Failed to initialize renderer");
                event_loop.exit();
                return;
            }
        }

        self.open_audio();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(last_update) = self.last_update else {
            return;
        };

        let now = Instant::now();
        let delta_time = (now - last_update).as_secs_f32();
        self.last_update = Some(now);

        // Sample before advancing so JustPressed edges are seen once
        let input = self.input_collector.state();
        let controls = self.config.input.controls(input);
        if cfg!(debug_assertions) && self.config.input.debug_overlay_pressed(input) {
            self.debug_ui.toggle_window();
        }
        self.input_collector.advance_frame();

        self.world.tick(delta_time, controls);
        self.process_session_events(event_loop);

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Raw input first, so keys reach the game even when egui has focus
        self.input_collector.handle_window_event(&event);

        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            let _ = renderer.handle_event(window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
