//! Rooftop Run
//!
//! An endless runner across the city's rooftops, built with winit, wgpu and egui.

/// Game application - windowing, rendering, audio and input handling
pub mod app;

/// Build-time information (git SHA, branch, timestamp, etc.)
pub mod build_info;

/// Startup and CI health checks
pub mod health;

/// Game simulation - session state, player physics and the scrolling city
pub mod sim;
