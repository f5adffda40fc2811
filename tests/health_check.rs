//! Integration tests for the health check system

use rooftop_run::health::{self, CheckStatus, HealthCheckRunner, SystemCheck, checks::*};

#[test]
fn test_all_health_checks() {
    let report = health::run_all_checks();

    // Print report for debugging if tests fail
    if !report.is_healthy() {
        eprintln!("\n{}", health::format_report(&report));
    }

    assert!(
        report.is_healthy(),
        "Health checks failed: {} failures, {} warnings",
        report.failed,
        report.warned
    );
    assert_eq!(report.total, 4);
}

#[test]
fn test_config_check() {
    let result = ConfigCheck::new().check();

    assert!(
        result.status.is_ok(),
        "Config check failed: {}",
        result.message
    );
}

#[test]
fn test_unknown_profile_falls_back_to_defaults() {
    // Missing profile files are optional, so defaults still validate
    let result = ConfigCheck::with_profiles(vec!["no-such-profile"]).check();
    assert!(result.status.is_ok(), "{}", result.message);
}

#[test]
fn test_session_check() {
    let result = SessionCheck::new().check();

    assert_eq!(
        result.status,
        CheckStatus::Pass,
        "Session check failed: {}\n{}",
        result.message,
        result.details.unwrap_or_default()
    );
}

#[test]
fn test_session_check_other_seeds() {
    for seed in [0, 1, 99, u64::MAX] {
        let result = SessionCheck::with_seed(seed).check();
        assert_eq!(
            result.status,
            CheckStatus::Pass,
            "seed {seed}: {}",
            result.details.unwrap_or_default()
        );
    }
}

#[test]
fn test_build_info_check() {
    let result = BuildInfoCheck::new().check();

    assert!(
        result.status.is_ok(),
        "Build info check failed: {}",
        result.message
    );
}

#[test]
fn test_system_info_check() {
    let result = SystemInfoCheck::new().check();

    assert!(
        result.status.is_ok(),
        "System info check failed: {}",
        result.message
    );
}

#[test]
fn test_device_checks_never_fail() {
    // Headless machines have neither a GPU nor a sound card
    assert!(GraphicsBackendCheck::new().check().status.is_ok());
    assert!(AudioDeviceCheck::new().check().status.is_ok());
}

#[test]
fn test_audio_check_reports_device_format() {
    let result = AudioDeviceCheck::new().check();
    if result.status == CheckStatus::Pass {
        let details = result.details.unwrap_or_default();
        assert!(details.contains("Hz"), "details: {details}");
    }
}

#[test]
fn test_runner_collects_all_checks() {
    let report = HealthCheckRunner::new()
        .add_check(ConfigCheck::new())
        .add_check(SessionCheck::new())
        .run();

    assert_eq!(report.total, 2, "Expected 2 checks in report");
    assert_eq!(report.passed + report.warned + report.failed, report.total);
    assert!(report.result("Session/Simulation").is_some());
}

#[test]
fn test_report_exit_codes() {
    let report = HealthCheckRunner::new().add_check(ConfigCheck::new()).run();

    if report.failed > 0 {
        assert_eq!(report.exit_code(), 1);
    } else if report.warned > 0 {
        assert_eq!(report.exit_code(), 2);
    } else {
        assert_eq!(report.exit_code(), 0);
    }
}

#[test]
fn test_format_report_has_summary() {
    let report = HealthCheckRunner::new().add_check(SessionCheck::new()).run();
    let text = health::format_report(&report);

    assert!(text.contains("Session/Simulation"));
    assert!(text.contains("Summary"));
}
