//! Build information health check

use crate::build_info;
use crate::health::check::{CheckResult, CheckStatus, Findings, SystemCheck};

/// Checks that build metadata was captured
pub struct BuildInfoCheck;

impl BuildInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuildInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates build metadata (git, rustc, timestamps)")
    }

    fn check(&self) -> CheckResult {
        let mut findings = Findings::new();

        findings.note(format!("Version: {}", build_info::version_string()));

        // Builds from a source tarball carry no git metadata
        let git = format!(
            "Git: {}@{} (dirty: {})",
            build_info::GIT_BRANCH,
            build_info::git_sha_short(),
            build_info::is_git_dirty()
        );
        if !build_info::has_git_info() {
            findings.record(CheckStatus::Warn, git);
        } else {
            findings.note(git);
        }

        findings.note(format!("Build time: {}", build_info::BUILD_TIMESTAMP));
        findings.note(format!(
            "Rustc: {} ({})",
            build_info::RUSTC_SEMVER,
            build_info::RUSTC_CHANNEL
        ));
        findings.note(format!("Target: {}", build_info::CARGO_TARGET_TRIPLE));
        findings.note(format!("Opt level: {}", build_info::CARGO_OPT_LEVEL));

        findings.finish(
            "Build metadata accessible",
            "Build metadata missing git details",
            "Build metadata unavailable",
        )
    }
}
