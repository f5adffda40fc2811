//! System information health check

use sysinfo::System;

use crate::health::check::{CheckResult, CheckStatus, Findings, SystemCheck};

/// Below this much memory the game may stutter
const MIN_MEMORY_GB: f64 = 1.0;

/// Checks that system information can be gathered
pub struct SystemInfoCheck;

impl SystemInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for SystemInfoCheck {
    fn name(&self) -> &'static str {
        "System Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates OS, CPU, and memory information gathering")
    }

    fn check(&self) -> CheckResult {
        let mut sys = System::new_all();
        sys.refresh_all();

        let mut findings = Findings::new();
        let unknown = || "Unknown".to_string();

        findings.note(format!(
            "OS: {} {}",
            System::name().unwrap_or_else(unknown),
            System::os_version().unwrap_or_else(unknown)
        ));
        findings.note(format!(
            "Kernel: {}",
            System::kernel_version().unwrap_or_else(unknown)
        ));

        let physical_cores = System::physical_core_count().unwrap_or(0);
        let logical_cores = sys.cpus().len();
        let cores = format!("CPU cores: {physical_cores} physical, {logical_cores} logical");
        if physical_cores == 0 || logical_cores == 0 {
            findings.record(CheckStatus::Warn, cores);
        } else {
            findings.note(cores);
        }

        let total_memory_gb = sys.total_memory() as f64 / 1_073_741_824.0;
        let memory = format!("Memory: {total_memory_gb:.1} GB total");
        if total_memory_gb < MIN_MEMORY_GB {
            findings.record(CheckStatus::Warn, memory);
        } else {
            findings.note(memory);
        }

        if let Some(hostname) = System::host_name() {
            findings.note(format!("Hostname: {hostname}"));
        }

        findings.finish(
            "System info gathered successfully",
            "System info incomplete or resources low",
            "System info unavailable",
        )
    }
}
