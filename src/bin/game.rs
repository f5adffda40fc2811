use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

use rooftop_run::app::{App, AppConfig};
use rooftop_run::{build_info, health};

/// Endless rooftop runner
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration profile (debug, release); defaults to APP_PROFILE or "release"
    #[arg(long)]
    profile: Option<String>,

    /// Seed for the building layout
    #[arg(long)]
    seed: Option<u64>,

    /// Start with sound disabled
    #[arg(long)]
    mute: bool,

    /// Run health checks and exit with the report's exit code
    #[arg(long)]
    health: bool,

    /// With --health, also probe the audio and graphics devices
    #[arg(long, requires = "health")]
    devices: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    if cli.health {
        let report = health::run_checks(cli.devices);
        health::print_report(&report);
        std::process::exit(report.exit_code());
    }

    info!(version = %build_info::version_string(), "Rooftop Run");

    let profile = cli.profile.unwrap_or_else(AppConfig::profile_from_env);
    let mut config = AppConfig::load(&profile).unwrap_or_else(|e| {
        warn!(error = %e, %profile, "Failed to load config, using built-in defaults");
        AppConfig::builtin(&profile)
    });

    if let Some(seed) = cli.seed {
        config.game.seed = Some(seed);
    }
    if cli.mute {
        config.audio.enabled = false;
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
