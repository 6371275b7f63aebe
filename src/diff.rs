//! # Diff Module
//!
//! Renders the pending change to a file as a unified diff, for `--show-diff`
//! and `--save-diff`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use similar::TextDiff;

/// Lines of unchanged context around each hunk.
const CONTEXT_RADIUS: usize = 3;

/// Shows and/or saves diffs between a file and its stamped form.
#[derive(Debug, Default, Clone)]
pub struct DiffManager {
  /// Print the diff to stderr
  pub show_diff: bool,

  /// Append the diff to this file
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Whether any diff output was asked for.
  pub const fn is_enabled(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Builds the unified diff text for one file.
  pub fn render(path: &Path, original: &str, new: &str) -> String {
    let name = path.display().to_string();
    TextDiff::from_lines(original, new)
      .unified_diff()
      .context_radius(CONTEXT_RADIUS)
      .header(&format!("a/{name}"), &format!("b/{name}"))
      .to_string()
  }

  /// Displays and/or saves the diff between `original` and `new`.
  ///
  /// Saved diffs are appended, so one file can collect the output of many
  /// invocations driven by a batch script.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    if !self.is_enabled() {
      return Ok(());
    }

    let diff = Self::render(path, original, new);

    if self.show_diff {
      for line in diff.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
          eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.bold()));
        } else if line.starts_with('+') {
          eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.green()));
        } else if line.starts_with('-') {
          eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.red()));
        } else if line.starts_with("@@") {
          eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.cyan()));
        } else {
          eprintln!("{line}");
        }
      }
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;
      file
        .write_all(diff.as_bytes())
        .with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}
