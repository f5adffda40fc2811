//! Runner orchestrating health checks

use std::time::Instant;

use tracing::{debug, warn};

use super::check::{CheckResult, CheckStatus, SystemCheck};

/// Results from running a health check suite
#[derive(Debug)]
pub struct HealthCheckReport {
    /// Individual check results with their system names
    pub results: Vec<(String, CheckResult)>,
    pub total: usize,
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
}

impl HealthCheckReport {
    /// Builds a report and its tallies from finished results
    pub fn from_results(results: Vec<(String, CheckResult)>) -> Self {
        let count = |status| results.iter().filter(|(_, r)| r.status == status).count();
        let (passed, warned, failed) = (
            count(CheckStatus::Pass),
            count(CheckStatus::Warn),
            count(CheckStatus::Fail),
        );

        Self {
            total: results.len(),
            results,
            passed,
            warned,
            failed,
        }
    }

    /// Returns true if all checks passed (no failures)
    pub fn is_healthy(&self) -> bool {
        self.failed == 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warned > 0
    }

    /// Result for the named system
    pub fn result(&self, name: &str) -> Option<&CheckResult> {
        self.results
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, result)| result)
    }

    /// Returns the appropriate exit code for this report
    /// 0 = all pass, 1 = any fail, 2 = any warn (but no fail)
    pub fn exit_code(&self) -> i32 {
        if self.failed > 0 {
            1
        } else if self.warned > 0 {
            2
        } else {
            0
        }
    }
}

/// Orchestrates running health checks and collecting results
#[derive(Default)]
pub struct HealthCheckRunner {
    checks: Vec<Box<dyn SystemCheck>>,
}

impl HealthCheckRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a check to the runner
    pub fn add_check<C: SystemCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Adds a check only when `enabled`
    pub fn add_check_if<C: SystemCheck + 'static>(self, enabled: bool, check: C) -> Self {
        if enabled { self.add_check(check) } else { self }
    }

    /// Runs all registered checks in order and returns a report
    pub fn run(self) -> HealthCheckReport {
        let results = self
            .checks
            .into_iter()
            .map(|check| {
                let name = check.name().to_string();
                let start = Instant::now();
                let result = check.check().with_duration(start.elapsed());

                if result.status.is_fail() {
                    warn!(check = %name, message = %result.message, "Health check failed");
                } else {
                    debug!(check = %name, status = result.status.label(), "Health check finished");
                }

                (name, result)
            })
            .collect();

        HealthCheckReport::from_results(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, CheckStatus);

    impl SystemCheck for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn check(&self) -> CheckResult {
            match self.1 {
                CheckStatus::Pass => CheckResult::pass("ok"),
                CheckStatus::Warn => CheckResult::warn("meh"),
                CheckStatus::Fail => CheckResult::fail("bad"),
            }
        }
    }

    #[test]
    fn test_tallies_and_exit_codes() {
        let report = HealthCheckRunner::new()
            .add_check(Fixed("a", CheckStatus::Pass))
            .add_check(Fixed("b", CheckStatus::Warn))
            .run();
        assert_eq!((report.total, report.passed, report.warned), (2, 1, 1));
        assert_eq!(report.exit_code(), 2);
        assert!(report.is_healthy());

        let report = HealthCheckRunner::new()
            .add_check(Fixed("a", CheckStatus::Pass))
            .add_check(Fixed("c", CheckStatus::Fail))
            .run();
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.result("c").map(|r| r.status), Some(CheckStatus::Fail));
    }

    #[test]
    fn test_conditional_checks() {
        let report = HealthCheckRunner::new()
            .add_check_if(false, Fixed("skipped", CheckStatus::Fail))
            .add_check_if(true, Fixed("kept", CheckStatus::Pass))
            .run();
        assert_eq!(report.total, 1);
        assert!(report.result("skipped").is_none());
        assert_eq!(report.exit_code(), 0);
    }
}
