//! # File I/O Module
//!
//! Reading a file as lines and writing lines back. Files are read whole; there
//! is no streaming.

use std::path::Path;

use anyhow::{Context, Result};

/// Terminator appended to every written line, the last one included.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// File I/O operations for the rewriter.
pub struct FileIO;

impl FileIO {
  /// Reads the full content of a file.
  ///
  /// Fails if the file cannot be opened or is not valid UTF-8.
  pub fn read_full_content(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
  }

  /// Splits content into lines, dropping `\n` and `\r\n` terminators.
  pub fn split_lines(content: &str) -> Vec<String> {
    content.lines().map(str::to_string).collect()
  }

  /// Joins lines, terminating each with [`LINE_ENDING`].
  pub fn render_lines(lines: &[String]) -> String {
    let capacity = lines.iter().map(|line| line.len() + LINE_ENDING.len()).sum();
    let mut rendered = String::with_capacity(capacity);
    for line in lines {
      rendered.push_str(line);
      rendered.push_str(LINE_ENDING);
    }
    rendered
  }

  /// Overwrites a file with the given content.
  pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
  }
}
