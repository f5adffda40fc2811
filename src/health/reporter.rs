//! Formatting and reporting for health check results

use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::runner::HealthCheckReport;

/// Formats a health check report as a table followed by a summary
pub fn format_report(report: &HealthCheckReport) -> String {
    let mut builder = Builder::default();
    builder.push_record(["System", "Status", "Duration", "Message"]);

    for (name, result) in &report.results {
        builder.push_record([
            name.clone(),
            result.status.as_colored_str(),
            format!("{:.2?}", result.duration),
            result.message.clone(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    format!("{table}\n{}", format_summary(report))
}

fn format_summary(report: &HealthCheckReport) -> String {
    let mut lines = vec![
        String::new(),
        "Summary".bold().underline().to_string(),
        format!("  Total checks: {}", report.total),
        format!("  {} Passed: {}", "✓".green(), report.passed),
    ];

    if report.warned > 0 {
        lines.push(format!("  {} Warned: {}", "⚠".yellow(), report.warned));
    }
    if report.failed > 0 {
        lines.push(format!("  {} Failed: {}", "✗".red(), report.failed));
    }

    let overall = match (report.is_healthy(), report.has_warnings()) {
        (false, _) => "Overall: UNHEALTHY".red().bold(),
        (true, true) => "Overall: HEALTHY (with warnings)".yellow().bold(),
        (true, false) => "Overall: HEALTHY".green().bold(),
    };
    lines.push(String::new());
    lines.push(format!("  {overall}"));

    lines.join("\n") + "\n"
}

/// Prints a report to stdout, with per-check details after the table
pub fn print_report(report: &HealthCheckReport) {
    println!("{}", format_report(report));

    for (name, result) in &report.results {
        if let Some(details) = result.details.as_deref().filter(|d| !d.is_empty()) {
            println!("\n{} Details:", name.bold());
            println!("{details}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::check::CheckResult;

    #[test]
    fn test_report_lists_every_system() {
        let report = HealthCheckReport::from_results(vec![
            ("Config".to_string(), CheckResult::pass("loaded")),
            ("Audio".to_string(), CheckResult::warn("no device")),
        ]);

        let text = format_report(&report);
        assert!(text.contains("Config"));
        assert!(text.contains("no device"));
        assert!(text.contains("HEALTHY (with warnings)"));
    }
}
