#![allow(dead_code)]

use std::path::{Path, PathBuf};

use anyhow::Result;
use headerstamp::license::{LicenseBlock, LicenseVariant};
use headerstamp::rewriter::{Rewriter, RewriterConfig};

/// The phrase that identifies the default (EPL) notice.
pub const EPL_PHRASE: &str = "Eclipse Distribution License";

/// Writes `content` to `dir/name` and returns the path.
pub fn write_source(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
  let path = dir.join(name);
  std::fs::write(&path, content)?;
  Ok(path)
}

/// Reads a file back as lines.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
  Ok(std::fs::read_to_string(path)?.lines().map(str::to_string).collect())
}

/// The EPL notice as it appears at the top of a stamped file.
pub fn epl_header() -> String {
  let mut header = LicenseBlock::builtin(LicenseVariant::Epl).lines().join("\n");
  header.push('\n');
  header
}

/// Creates a rewriter with the default version and EPL notice.
pub fn default_rewriter(check_only: bool) -> Rewriter {
  Rewriter::new(RewriterConfig {
    check_only,
    ..RewriterConfig::default()
  })
}

/// Counts lines containing `needle`.
pub fn count_lines_containing(lines: &[String], needle: &str) -> usize {
  lines.iter().filter(|line| line.contains(needle)).count()
}
