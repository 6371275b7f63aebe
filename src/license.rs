//! # License Module
//!
//! License blocks prepended to files that lack one, and the detection of an
//! existing notice.
//!
//! A license block is a fixed, verbatim block comment together with a literal
//! phrase unique to it. The phrase is what makes the rewrite idempotent: once
//! the block is in a file, the phrase is found on the next run and nothing is
//! prepended again.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;

use crate::rewriter::is_declaration_line;

/// Eclipse Public License / Eclipse Distribution License notice.
const EPL_TEXT: &str = "/*
 * Copyright (c) 2016 Vivid Solutions.
 *
 * All rights reserved. This program and the accompanying materials
 * are made available under the terms of the Eclipse Public License v1.0
 * and Eclipse Distribution License v. 1.0 which accompanies this distribution.
 * The Eclipse Public License is available at http://www.eclipse.org/legal/epl-v10.html
 * and the Eclipse Distribution License is available at
 *
 * http://www.eclipse.org/org/documents/edl-v10.php.
 */

";

const EPL_PHRASE: &str = "Eclipse Distribution License";

/// The older GNU Lesser General Public License notice.
const LGPL_TEXT: &str = "/*
 * The JTS Topology Suite is a collection of Java classes that
 * implement the fundamental operations required to validate a given
 * geo-spatial data set to a known topological specification.
 *
 * Copyright (C) 2001 Vivid Solutions
 *
 * This library is free software; you can redistribute it and/or
 * modify it under the terms of the GNU Lesser General Public
 * License as published by the Free Software Foundation; either
 * version 2.1 of the License, or (at your option) any later version.
 *
 * This library is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * Lesser General Public License for more details.
 *
 * You should have received a copy of the GNU Lesser General Public
 * License along with this library; if not, write to the Free Software
 * Foundation, Inc., 59 Temple Place, Suite 330, Boston, MA  02111-1307  USA
 *
 * For more information, contact:
 *
 *     Vivid Solutions
 *     Suite #1A
 *     2328 Government Street
 *     Victoria BC  V8T 5G5
 *     Canada
 *
 *     (250)385-6040
 *     www.vividsolutions.com
 */

";

const LGPL_PHRASE: &str = "JTS Topology Suite";

/// The built-in license notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LicenseVariant {
  /// Eclipse Public License v1.0 and Eclipse Distribution License v1.0
  #[default]
  Epl,
  /// GNU Lesser General Public License v2.1 (older notice)
  Lgpl,
}

impl LicenseVariant {
  /// The verbatim block comment for this variant.
  pub const fn text(self) -> &'static str {
    match self {
      LicenseVariant::Epl => EPL_TEXT,
      LicenseVariant::Lgpl => LGPL_TEXT,
    }
  }

  /// The literal phrase that marks this notice as present.
  pub const fn phrase(self) -> &'static str {
    match self {
      LicenseVariant::Epl => EPL_PHRASE,
      LicenseVariant::Lgpl => LGPL_PHRASE,
    }
  }
}

impl fmt::Display for LicenseVariant {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      LicenseVariant::Epl => write!(f, "epl"),
      LicenseVariant::Lgpl => write!(f, "lgpl"),
    }
  }
}

/// Reasons a license block cannot be used.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LicenseError {
  /// The block has no lines at all.
  #[error("license text is empty")]
  Empty,

  /// The marker phrase is empty.
  #[error("license phrase is empty")]
  EmptyPhrase,

  /// The marker phrase does not occur in the text, so the block would be
  /// prepended again on every run.
  #[error("license phrase '{phrase}' does not occur in the license text")]
  PhraseNotInText { phrase: String },

  /// A line of the block would be taken for the type declaration.
  #[error("license line {line} looks like a class/interface declaration: {content}")]
  DeclarationLikeLine { line: usize, content: String },
}

/// A license notice ready to be prepended, one entry per output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseBlock {
  lines: Vec<String>,
  phrase: String,
}

impl LicenseBlock {
  /// Builds a block from its text and marker phrase.
  ///
  /// # Errors
  ///
  /// Fails if the text or phrase is empty, if the phrase does not occur in the
  /// text, or if any line would be mistaken for a declaration.
  pub fn new(text: &str, phrase: &str) -> Result<Self, LicenseError> {
    if phrase.is_empty() {
      return Err(LicenseError::EmptyPhrase);
    }

    let lines: Vec<String> = text.lines().map(str::to_string).collect();
    if lines.is_empty() {
      return Err(LicenseError::Empty);
    }

    if !lines.iter().any(|line| line.contains(phrase)) {
      return Err(LicenseError::PhraseNotInText {
        phrase: phrase.to_string(),
      });
    }

    if let Some((idx, line)) = lines.iter().enumerate().find(|(_, line)| is_declaration_line(line)) {
      return Err(LicenseError::DeclarationLikeLine {
        line: idx + 1,
        content: line.clone(),
      });
    }

    Ok(Self {
      lines,
      phrase: phrase.to_string(),
    })
  }

  /// Builds the block for one of the built-in notices.
  pub fn builtin(variant: LicenseVariant) -> Self {
    Self {
      lines: variant.text().lines().map(str::to_string).collect(),
      phrase: variant.phrase().to_string(),
    }
  }

  /// Loads a custom notice from a file.
  ///
  /// The file content is used verbatim, so it must already be a complete
  /// comment block. A trailing empty line in the file becomes an empty line
  /// between the notice and the rest of the stamped file.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the notice text
  /// * `phrase` - Literal text that identifies the notice in a stamped file
  ///
  /// # Returns
  ///
  /// The validated license block.
  ///
  /// # Errors
  ///
  /// Returns an error if:
  /// - The file cannot be read or is not valid UTF-8
  /// - The text fails the checks of [`LicenseBlock::new`]
  pub fn from_file(path: &Path, phrase: &str) -> Result<Self> {
    let text =
      std::fs::read_to_string(path).with_context(|| format!("Failed to read license file: {}", path.display()))?;
    Self::new(&text, phrase).with_context(|| format!("Invalid license file: {}", path.display()))
  }

  /// The lines of the notice, without terminators.
  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  /// The marker phrase.
  pub fn phrase(&self) -> &str {
    &self.phrase
  }
}

impl Default for LicenseBlock {
  fn default() -> Self {
    Self::builtin(LicenseVariant::default())
  }
}

/// Decides whether a file region already carries a license notice.
pub trait LicenseDetector: Send + Sync {
  /// Checks the given lines for an existing notice.
  fn has_license(&self, lines: &[String]) -> bool;
}

/// Detects a notice by a literal, case-sensitive phrase on any line.
pub struct PhraseDetector {
  phrase: String,
}

impl PhraseDetector {
  pub fn new(phrase: impl Into<String>) -> Self {
    Self { phrase: phrase.into() }
  }
}

impl LicenseDetector for PhraseDetector {
  fn has_license(&self, lines: &[String]) -> bool {
    lines.iter().any(|line| line.contains(&self.phrase))
  }
}

impl From<&LicenseBlock> for PhraseDetector {
  fn from(block: &LicenseBlock) -> Self {
    Self::new(block.phrase())
  }
}
