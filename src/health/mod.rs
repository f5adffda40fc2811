//! Health check system for validating startup and the simulation core
//!
//! Useful for:
//! - Validating a build before shipping it (`rooftop-run --health`)
//! - CI health checks that need no window or audio device
//! - Debugging configuration problems
//!
//! # Example
//!
//! ```no_run
//! use rooftop_run::health::{HealthCheckRunner, checks::*};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(ConfigCheck::new())
//!     .add_check(SessionCheck::new())
//!     .add_check(BuildInfoCheck::new())
//!     .add_check(SystemInfoCheck::new())
//!     .run();
//!
//! if report.is_healthy() {
//!     println!("All systems operational!");
//! }
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, CheckStatus, Findings, SystemCheck};
pub use reporter::{format_report, print_report};
pub use runner::{HealthCheckReport, HealthCheckRunner};

/// Runs the checks that need no window or audio device
pub fn run_all_checks() -> HealthCheckReport {
    run_checks(false)
}

/// Runs the default checks, plus the audio and graphics probes when `devices` is set
pub fn run_checks(devices: bool) -> HealthCheckReport {
    HealthCheckRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::SessionCheck::new())
        .add_check(checks::BuildInfoCheck::new())
        .add_check(checks::SystemInfoCheck::new())
        .add_check_if(devices, checks::AudioDeviceCheck::new())
        .add_check_if(devices, checks::GraphicsBackendCheck::new())
        .run()
}
