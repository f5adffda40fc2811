//! Built-in health checks

pub mod audio;
pub mod build_info;
pub mod config;
pub mod graphics_backend;
pub mod session;
pub mod system_info;

pub use audio::AudioDeviceCheck;
pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use graphics_backend::GraphicsBackendCheck;
pub use session::SessionCheck;
pub use system_info::SystemInfoCheck;
