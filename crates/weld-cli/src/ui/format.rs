//! Formatting of sizes, durations, plans and merge summaries.

use std::time::Duration;

use owo_colors::OwoColorize;
use weld_core::{MergeReport, PlannedModule};

use super::{colors_enabled, messages};

/// Format a byte count in the largest fitting unit.
///
/// ```
/// use weld_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit_idx = 0;
    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Format a duration as `50ms`, `1.50s` or `1m 30s`.
///
/// ```
/// use std::time::Duration;
/// use weld_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{total_ms}ms")
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// One line per planned module, padded into columns.
pub(crate) fn plan_lines(modules: &[PlannedModule]) -> Vec<String> {
    let ns_width = modules.iter().map(|m| m.namespace.len()).max().unwrap_or(0);
    let colored = colors_enabled();

    modules
        .iter()
        .map(|module| {
            let layer = format!("{:>3}", module.layer);
            let namespace = format!("{:<ns_width$}", module.namespace);
            let marker = if module.entry { " (entry)" } else { "" };
            if colored {
                format!(
                    "{}  {}  {}{}",
                    layer.dimmed(),
                    namespace.cyan(),
                    module.path,
                    marker.green()
                )
            } else {
                format!("{layer}  {namespace}  {}{marker}", module.path)
            }
        })
        .collect()
}

/// Print the emission order to stdout.
pub fn print_plan(modules: &[PlannedModule]) {
    for line in plan_lines(modules) {
        println!("{line}");
    }
}

/// Print the outcome of a merge to stderr.
pub fn print_merge_summary(report: &MergeReport) {
    let entries = report.modules.iter().filter(|m| m.entry).count();
    let target = report
        .output
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<memory>".to_string());

    messages::success(&format!(
        "Merged {} modules ({} entries) into {}",
        report.modules.len(),
        entries,
        target
    ));
    messages::info(&format!(
        "{} hoisted constants, {}",
        report.constants,
        format_size(report.bytes as u64)
    ));
}
