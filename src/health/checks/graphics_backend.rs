//! Graphics backend health check

use std::collections::BTreeSet;

use crate::health::check::{CheckResult, CheckStatus, Findings, SystemCheck};

/// Checks that a wgpu adapter is available
///
/// Headless machines have none, so a missing adapter only warns.
pub struct GraphicsBackendCheck;

impl GraphicsBackendCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GraphicsBackendCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for GraphicsBackendCheck {
    fn name(&self) -> &'static str {
        "Graphics Backend"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates wgpu instance creation and adapter availability")
    }

    fn check(&self) -> CheckResult {
        let mut findings = Findings::new();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let adapters: Vec<_> = instance.enumerate_adapters(wgpu::Backends::all());

        if adapters.is_empty() {
            findings.record(CheckStatus::Warn, "No graphics adapters found");
            return findings.finish("", "No graphics adapter; the game window cannot open", "");
        }

        let mut hardware = false;
        let mut backends = BTreeSet::new();
        for (i, adapter) in adapters.iter().enumerate() {
            let info = adapter.get_info();
            backends.insert(format!("{:?}", info.backend));
            hardware |= matches!(
                info.device_type,
                wgpu::DeviceType::DiscreteGpu | wgpu::DeviceType::IntegratedGpu
            );
            findings.note(format!(
                "[{i}] {} - {:?} ({:?})",
                info.name, info.device_type, info.backend
            ));
        }
        findings.note(format!(
            "Backends available: {}",
            backends.into_iter().collect::<Vec<_>>().join(", ")
        ));

        // A flat-colour 2D scene runs fine on software adapters, but slowly
        if !hardware {
            findings.record(CheckStatus::Warn, "No hardware GPU detected");
        }

        findings.finish(
            &format!("{} adapter(s) found", adapters.len()),
            "Software rendering only",
            "",
        )
    }
}
