//! # Report Module
//!
//! The outcome of stamping one file, and its JSON form for `--report-json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

pub use crate::rewriter::VersionAction;

/// Outcome of processing a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
  /// The file that was processed
  pub path: PathBuf,

  /// The version written into the documentation comment
  pub version: String,

  /// Whether the stamped content differs from what was on disk
  pub changed: bool,

  /// Whether the file was actually rewritten
  pub written: bool,

  /// Whether the license block was prepended
  pub license_inserted: bool,

  /// What happened to the `@version` tag
  pub version_action: VersionAction,

  /// Whether line terminators were rewritten (CRLF input, missing final
  /// newline)
  pub line_endings_normalized: bool,
}

impl FileReport {
  /// Renders the report as pretty-printed JSON.
  pub fn to_json(&self) -> Result<String> {
    serde_json::to_string_pretty(self).context("Failed to serialize report")
  }

  /// Writes the JSON report to `output`, replacing any previous content.
  pub fn write_json(&self, output: &Path) -> Result<()> {
    let json = self.to_json()?;
    std::fs::write(output, json + "\n").with_context(|| format!("Failed to write report: {}", output.display()))
  }
}
