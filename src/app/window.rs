//! Window attributes

use winit::dpi::LogicalSize;
use winit::window::{Fullscreen, WindowAttributes};

use super::config::WindowConfig;

/// Windows never shrink below a quarter of the default area
const MIN_SIZE: LogicalSize<f64> = LogicalSize::new(640.0, 360.0);

/// Builds window attributes from configuration
///
/// Fullscreen uses a borderless window on the current monitor.
pub fn window_attributes_from_config(config: &WindowConfig) -> WindowAttributes {
    let fullscreen = config.fullscreen.then_some(Fullscreen::Borderless(None));

    WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(
            config.width.max(MIN_SIZE.width),
            config.height.max(MIN_SIZE.height),
        ))
        .with_min_inner_size(MIN_SIZE)
        .with_resizable(config.resizable)
        .with_decorations(config.decorated)
        .with_fullscreen(fullscreen)
}
