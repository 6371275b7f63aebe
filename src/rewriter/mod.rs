//! # Rewriter Module
//!
//! Stamps one source file with a license notice and a current `@version` tag.
//!
//! The module is organized into several submodules:
//! - [`scanner`] - Locates the documentation comment and the declaration
//! - [`transform`] - Builds the stamped lines from a located file
//! - [`file_io`] - Reading lines and writing them back
//!
//! [`Rewriter`] is the entry point: it reads a file, transforms it in memory,
//! optionally shows a diff, and writes the result back over the same path.
//! Nothing is written unless every structural check has passed.

mod file_io;
mod scanner;
mod transform;

use std::path::Path;

use anyhow::{Context, Result};
pub use file_io::FileIO;
pub use scanner::{CommentSpan, Layout, StructureError, is_declaration_line, locate};
pub use transform::{HeaderTransformer, Rewrite, VersionAction};
use tracing::{debug, trace};

use crate::diff::DiffManager;
use crate::license::{LicenseBlock, LicenseDetector};
use crate::report::FileReport;

/// The version written when nothing else is configured.
pub const DEFAULT_VERSION: &str = "1.4";

/// Configuration for creating a [`Rewriter`].
pub struct RewriterConfig {
  pub version: String,
  pub license: LicenseBlock,

  /// Compute the result but never write
  pub check_only: bool,

  pub diff_manager: Option<DiffManager>,
  pub license_detector: Option<Box<dyn LicenseDetector>>,
}

impl RewriterConfig {
  /// Creates a config with required fields and defaults for the rest.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// RewriterConfig {
  ///     check_only: true,
  ///     ..RewriterConfig::new("1.4", LicenseBlock::default())
  /// }
  /// ```
  pub fn new(version: impl Into<String>, license: LicenseBlock) -> Self {
    Self {
      version: version.into(),
      license,
      check_only: false,
      diff_manager: None,
      license_detector: None,
    }
  }
}

impl Default for RewriterConfig {
  fn default() -> Self {
    Self::new(DEFAULT_VERSION, LicenseBlock::default())
  }
}

/// Rewrites files in place.
pub struct Rewriter {
  transformer: HeaderTransformer,
  check_only: bool,
  diff_manager: DiffManager,
}

impl Rewriter {
  pub fn new(config: RewriterConfig) -> Self {
    let mut transformer = HeaderTransformer::new(config.version, config.license);
    if let Some(detector) = config.license_detector {
      transformer = transformer.with_detector(detector);
    }

    Self {
      transformer,
      check_only: config.check_only,
      diff_manager: config.diff_manager.unwrap_or_default(),
    }
  }

  /// Whether this rewriter leaves files untouched.
  pub const fn is_check_only(&self) -> bool {
    self.check_only
  }

  /// Stamps the file at `path`.
  ///
  /// In check-only mode the file is never written; the report says whether it
  /// would have changed. Otherwise the file is overwritten when its stamped
  /// form differs from what is on disk, and any diff is shown or saved only
  /// after that write has succeeded.
  ///
  /// # Parameters
  ///
  /// * `path` - The source file to stamp in place
  ///
  /// # Returns
  ///
  /// A [`FileReport`] describing what changed and whether it was written.
  ///
  /// # Errors
  ///
  /// Fails if the file cannot be read or written, is not UTF-8, or does not
  /// have the structure described by [`StructureError`]. The file is left as
  /// it was in every error case except a failed write.
  pub fn process_file(&self, path: &Path) -> Result<FileReport> {
    debug!("Processing {}", path.display());

    let content = FileIO::read_full_content(path)?;
    let lines = FileIO::split_lines(&content);
    trace!("Read {} lines from {}", lines.len(), path.display());

    let rewrite = self
      .transformer
      .transform(&lines)
      .with_context(|| format!("Cannot stamp {}", path.display()))?;

    trace!(
      "{}: license_inserted={} version_action={:?}",
      path.display(),
      rewrite.license_inserted,
      rewrite.version_action
    );

    let new_content = FileIO::render_lines(&rewrite.lines);
    let changed = new_content != content;
    let line_endings_normalized = FileIO::render_lines(&lines) != content;

    let written = changed && !self.check_only;
    if written {
      FileIO::write_file(path, &new_content)?;
      debug!("Wrote {}", path.display());
    } else if changed {
      debug!("Would rewrite {} (check only)", path.display());
    } else {
      debug!("{} is already up to date", path.display());
    }

    if changed {
      self.diff_manager.display_diff(path, &content, &new_content)?;
    }

    Ok(FileReport {
      path: path.to_path_buf(),
      version: self.transformer.version().to_string(),
      changed,
      written,
      license_inserted: rewrite.license_inserted,
      version_action: rewrite.version_action,
      line_endings_normalized,
    })
  }
}
