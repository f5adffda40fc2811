//! Configuration system health check

use crate::app::AppConfig;
use crate::health::check::{CheckResult, CheckStatus, Findings, SystemCheck};

/// Checks that every profile loads and carries playable game tuning
pub struct ConfigCheck {
    profiles: Vec<&'static str>,
}

impl ConfigCheck {
    /// Creates a new config check with default profiles
    pub fn new() -> Self {
        Self {
            profiles: vec!["debug", "release"],
        }
    }

    /// Creates a config check with custom profiles
    pub fn with_profiles(profiles: Vec<&'static str>) -> Self {
        Self { profiles }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Loads each profile and validates the game tuning it produces")
    }

    fn check(&self) -> CheckResult {
        let mut findings = Findings::new();

        for profile in &self.profiles {
            let config = match AppConfig::load(profile) {
                Ok(config) => config,
                Err(e) => {
                    findings.record(
                        CheckStatus::Fail,
                        format!("Profile '{profile}': failed to load - {e}"),
                    );
                    continue;
                }
            };

            let problems = config.game.problems();
            if findings.require(
                problems.is_empty(),
                format!(
                    "Profile '{profile}': window {}x{}, {} buildings, seed {}",
                    config.window.width,
                    config.window.height,
                    config.game.building_count,
                    config
                        .game
                        .seed
                        .map_or_else(|| "random".to_string(), |s| s.to_string())
                ),
            ) {
                continue;
            }
            for problem in problems {
                findings.note(format!("  {problem}"));
            }
        }

        match AppConfig::load_from_env() {
            Ok(config) => findings.record(
                CheckStatus::Pass,
                format!("Environment config: profile '{}' loaded", config.profile),
            ),
            Err(e) => findings.record(CheckStatus::Warn, format!("Environment config: {e}")),
        }

        findings.finish(
            &format!("{} profiles validated", self.profiles.len()),
            "Config loaded with warnings",
            "One or more profiles failed to load or validate",
        )
    }
}
