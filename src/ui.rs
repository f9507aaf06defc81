//! Console output for the treebump binary.
//!
//! Formatting is kept in pure `format_*` functions so it can be tested;
//! the `display_*` wrappers only print.

use console::style;

use crate::bump::{BumpReport, FileOutcome};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Describe what happened to one file during a bump run
pub fn format_outcome(file: &str, outcome: &FileOutcome) -> String {
    match outcome {
        FileOutcome::Bumped { from, to } => format!("{}: {} -> {}", file, from, to),
        FileOutcome::SkippedNewer { current } => {
            format!("{}: skipped, already at newer {}", file, current)
        }
        FileOutcome::Unchanged => format!("{}: unchanged", file),
    }
}

/// Print one line per file followed by a summary of the run.
pub fn display_report(report: &BumpReport) {
    for (file, outcome) in &report.outcomes {
        match outcome {
            FileOutcome::Bumped { .. } => display_success(&format_outcome(file, outcome)),
            _ => display_status(&format_outcome(file, outcome)),
        }
    }

    if report.changed {
        display_success("Committed version bump");
    } else {
        display_status("No version files changed, nothing to commit");
    }
}
