//! Game application module
//!
//! Handles windowing, rendering, audio and user input around the simulation.

pub mod audio;
pub mod config;
mod debug_ui;
mod hud;
pub mod input;
mod line_renderer;
mod rect_renderer;
mod renderer;
mod runner;
mod shader_system;
mod shape_pipeline;
mod window;

pub use audio::{Audio, AudioError};
pub use config::{AppConfig, AudioConfig, WindowConfig};
pub use input::KeyBindings;
pub use runner::App;
pub use window::window_attributes_from_config;
