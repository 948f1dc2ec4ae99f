//! Durations and the adapt summary.

use console::Term;
use owo_colors::OwoColorize;
use std::time::Duration;
use swa_adapter::AdaptReport;

use super::paint;

/// Format a duration as `ms`, `s` or `m s`.
///
/// ```
/// use std::time::Duration;
/// use swa_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print where the adapter wrote its output.
pub fn print_adapt_summary(report: &AdaptReport) {
    let width = Term::stderr().size().1 as usize;

    let api_dir = report.api_dir.display().to_string();
    let static_dir = report.static_dir.display().to_string();

    eprintln!("\n{}", paint("Adapter Summary", |s| s.bold().underline().to_string()));
    eprintln!("{}", "─".repeat(width.clamp(20, 80)));
    eprintln!("  {:<16} {}", "Server function", paint(api_dir.as_str(), |s| s.cyan().to_string()));
    eprintln!("  {:<16} {}", "Static assets", paint(static_dir.as_str(), |s| s.cyan().to_string()));
    eprintln!("  {:<16} {}", "Routes", report.config.routes.len());
    if report.warnings > 0 {
        eprintln!("  {:<16} {}", "Warnings", paint(&report.warnings, |n| n.yellow().to_string()));
    }
    let duration = format_duration(report.duration);
    eprintln!("  {:<16} {}", "Duration", paint(duration.as_str(), |s| s.dimmed().to_string()));
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(0)), "0ms");
        assert_eq!(format_duration(Duration::from_millis(999)), "999ms");
        assert_eq!(format_duration(Duration::from_millis(1000)), "1.00s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }
}
