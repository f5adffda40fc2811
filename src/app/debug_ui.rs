//! Debug overlay state and rendering

use std::collections::VecDeque;
use std::time::Instant;

use sysinfo::System;

use crate::sim::World;

const FRAME_HISTORY: usize = 100;

/// Debug UI state for toggling different panels
#[derive(Debug, Clone)]
pub struct DebugUIState {
    pub show_window: bool,
    pub show_fps: bool,
    pub show_world_state: bool,
    pub show_entities: bool,
    pub show_system_info: bool,
    /// Outline player, building and obstacle hitboxes in the scene
    pub show_hitboxes: bool,
    frame_times: VecDeque<f32>,
    last_frame_time: Instant,
    system_summary: Option<SystemSummary>,
}

/// System details gathered once, the first time the panel is shown
#[derive(Debug, Clone)]
struct SystemSummary {
    os: String,
    kernel: String,
    physical_cores: usize,
    logical_cores: usize,
    memory_gb: f64,
}

impl SystemSummary {
    fn gather() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();

        let unknown = || "Unknown".to_string();
        Self {
            os: format!(
                "{} {}",
                System::name().unwrap_or_else(unknown),
                System::os_version().unwrap_or_else(unknown)
            ),
            kernel: System::kernel_version().unwrap_or_else(unknown),
            physical_cores: System::physical_core_count().unwrap_or(0),
            logical_cores: sys.cpus().len(),
            memory_gb: sys.total_memory() as f64 / 1_073_741_824.0,
        }
    }
}

impl Default for DebugUIState {
    fn default() -> Self {
        Self {
            show_window: cfg!(debug_assertions),
            show_fps: true,
            show_world_state: true,
            show_entities: true,
            show_system_info: false,
            show_hitboxes: false,
            frame_times: VecDeque::with_capacity(FRAME_HISTORY),
            last_frame_time: Instant::now(),
            system_summary: None,
        }
    }
}

impl DebugUIState {
    /// Toggles the debug window visibility
    pub fn toggle_window(&mut self) {
        self.show_window = !self.show_window;
    }

    /// Updates frame timing information
    pub fn update_frame_time(&mut self) {
        let now = Instant::now();
        let frame_time = (now - self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;
        self.record_frame_time(frame_time);
    }

    fn record_frame_time(&mut self, frame_time: f32) {
        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > FRAME_HISTORY {
            self.frame_times.pop_front();
        }
    }

    /// Gets the current FPS
    pub fn fps(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let avg_frame_time: f32 =
            self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        if avg_frame_time > 0.0 {
            1.0 / avg_frame_time
        } else {
            0.0
        }
    }

    /// Hitboxes are only drawn while the overlay is open
    pub fn hitboxes_visible(&self) -> bool {
        self.show_window && self.show_hitboxes
    }

    /// Renders the debug UI
    pub fn render(
        &mut self,
        ctx: &egui::Context,
        world: &mut World,
        adapter_info: &wgpu::AdapterInfo,
        surface_config: &wgpu::SurfaceConfiguration,
    ) {
        if !self.show_window {
            return;
        }

        self.update_frame_time();

        egui::Window::new("Debug Info")
            .default_pos([10.0, 60.0])
            .default_width(320.0)
            .resizable(true)
            .scroll([false, true])
            .show(ctx, |ui| {
                ui.checkbox(&mut self.show_fps, "FPS");
                ui.checkbox(&mut self.show_world_state, "World State");
                ui.checkbox(&mut self.show_entities, "Entities");
                ui.checkbox(&mut self.show_system_info, "System Info");
                ui.checkbox(&mut self.show_hitboxes, "Show hitboxes");
                ui.separator();

                if self.show_fps {
                    ui.heading("FPS");
                    ui.label(format!("FPS: {:.1}", self.fps()));
                    let last = self.frame_times.back().copied().unwrap_or(0.0);
                    ui.label(format!("Frame time: {:.2}ms", last * 1000.0));
                    ui.separator();
                }

                if self.show_world_state {
                    ui.heading("World State");
                    ui.label(format!("Simulation time: {:.2}s", world.sim_time()));
                    ui.label(format!("Tick count: {}", world.tick_count()));

                    let mut time_scale = world.time_scale();
                    if ui
                        .add(egui::Slider::new(&mut time_scale, 0.0..=2.0).text("Time scale"))
                        .changed()
                    {
                        world.set_time_scale(time_scale);
                    }

                    let pause_label = if world.is_paused() { "Resume" } else { "Pause" };
                    if ui.button(pause_label).clicked() {
                        world.toggle_pause();
                    }

                    let session = world.session();
                    ui.label(format!("State: {:?}", session.state()));
                    ui.label(format!("Score: {:.2}", session.score()));
                    ui.label(format!("Background offset: {:.1}", session.background_offset()));
                    ui.label(format!("Seed: {}", session.rng_seed()));
                    ui.separator();
                }

                if self.show_entities {
                    let session = world.session();
                    let player = session.player();
                    let rect = player.rect();

                    ui.heading("Player");
                    ui.label(format!("Position: ({:.1}, {:.1})", rect.x, rect.y));
                    ui.label(format!("Velocity: {:.2}", player.vertical_velocity()));
                    ui.label(format!("Grounded: {}", player.is_grounded()));
                    ui.label(format!(
                        "Animation: {:?} frame {}",
                        player.animation(),
                        player.frame_index()
                    ));

                    ui.heading("Buildings");
                    for (i, building) in session.buildings().buildings().iter().enumerate() {
                        let r = building.rect();
                        ui.label(format!(
                            "#{i}: x {:.0} y {:.0} w {:.0}{}",
                            r.x,
                            r.y,
                            r.w,
                            if building.has_obstacle() { " [barrel]" } else { "" }
                        ));
                    }
                    ui.separator();
                }

                if self.show_system_info {
                    ui.heading("System Info");
                    let summary = self.system_summary.get_or_insert_with(SystemSummary::gather);
                    ui.label(format!("OS: {}", summary.os));
                    ui.label(format!("Kernel: {}", summary.kernel));
                    ui.label(format!("Physical cores: {}", summary.physical_cores));
                    ui.label(format!("Logical cores: {}", summary.logical_cores));
                    ui.label(format!("Memory: {:.1} GB", summary.memory_gb));

                    ui.label(format!(
                        "Adapter: {} ({:?})",
                        adapter_info.name, adapter_info.backend
                    ));
                    ui.label(format!(
                        "Surface: {}x{} {:?}",
                        surface_config.width, surface_config.height, surface_config.format
                    ));
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_average() {
        let mut state = DebugUIState::default();
        assert_eq!(state.fps(), 0.0);

        for _ in 0..10 {
            state.record_frame_time(0.02);
        }
        assert!((state.fps() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_frame_history_is_bounded() {
        let mut state = DebugUIState::default();
        for _ in 0..(FRAME_HISTORY * 2) {
            state.record_frame_time(0.01);
        }
        assert_eq!(state.frame_times.len(), FRAME_HISTORY);
    }

    #[test]
    fn test_hitboxes_need_open_window() {
        let mut state = DebugUIState {
            show_window: false,
            show_hitboxes: true,
            ..DebugUIState::default()
        };
        assert!(!state.hitboxes_visible());
        state.toggle_window();
        assert!(state.hitboxes_visible());
    }
}
