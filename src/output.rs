//! # Output Module
//!
//! User-facing output for headerstamp: one status line per file on stdout,
//! colored when the terminal supports it, silent under `--quiet`.

use owo_colors::{OwoColorize, Stream};

use crate::logging::is_quiet;
use crate::report::{FileReport, VersionAction};

/// Symbols used in output
pub mod symbols {
  /// File is up to date or was stamped
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// File needs stamping (check mode)
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// File was rewritten
  pub const UPDATED: &str = "\u{21bb}"; // ↻
}

/// Describes the changes in a report, e.g. "license added, version set to 1.4".
pub fn describe_changes(report: &FileReport) -> String {
  let mut parts = Vec::new();
  if report.license_inserted {
    parts.push("license added".to_string());
  }
  match report.version_action {
    VersionAction::Unchanged => {}
    VersionAction::Normalized => parts.push(format!("version set to {}", report.version)),
    VersionAction::Inserted => parts.push(format!("version {} added", report.version)),
    VersionAction::Synthesized => parts.push(format!("doc comment with version {} added", report.version)),
  }
  if report.line_endings_normalized {
    parts.push("line endings normalized".to_string());
  }
  if parts.is_empty() {
    parts.push("content normalized".to_string());
  }
  parts.join(", ")
}

/// Prints the status line for a processed file.
pub fn print_report(report: &FileReport) {
  if is_quiet() {
    return;
  }

  let path = report.path.display();

  if !report.changed {
    println!(
      "{} {} is up to date",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
      path
    );
  } else if report.written {
    println!(
      "{} {} ({})",
      symbols::UPDATED.if_supports_color(Stream::Stdout, |s| s.cyan()),
      path,
      describe_changes(report)
    );
  } else {
    println!(
      "{} {} needs stamping ({})",
      symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
      path,
      describe_changes(report)
    );
  }
}
