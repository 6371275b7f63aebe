//! # Header Transformer Module
//!
//! Turns the lines of a file into their stamped form: the documentation
//! comment carries `@version <current>` and a license notice precedes
//! everything when the file does not already have one.
//!
//! The transformation is pure. It validates the whole structure before
//! building any output, so a rejected file produces nothing to write.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

use super::scanner::{StructureError, locate};
use crate::license::{LicenseBlock, LicenseDetector, PhraseDetector};

/// Matches a version tag and everything after it on the line, except a
/// trailing comment close marker which is captured so it survives.
static VERSION_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"@version\b.*?(\s*\*/.*)?$").expect("version regex must compile"));

/// Opening and closing lines of a synthesized documentation comment.
const SYNTHESIZED_COMMENT: [&str; 2] = ["/**", " */"];

/// What happened to the version tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionAction {
  /// The tag already carried the current version.
  Unchanged,
  /// One or more existing tags were rewritten to the current version.
  Normalized,
  /// The comment had no tag; one was added before its closing line.
  Inserted,
  /// There was no comment; one was created holding only the tag.
  Synthesized,
}

/// The stamped lines plus what was done to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
  pub lines: Vec<String>,
  pub license_inserted: bool,
  pub version_action: VersionAction,
}

/// Stamps a version tag and license notice onto file lines.
pub struct HeaderTransformer {
  version: String,
  license: LicenseBlock,
  detector: Box<dyn LicenseDetector>,
}

impl HeaderTransformer {
  /// Creates a transformer that detects the license by the block's own phrase.
  pub fn new(version: impl Into<String>, license: LicenseBlock) -> Self {
    let detector = Box::new(PhraseDetector::from(&license));
    Self {
      version: version.into(),
      license,
      detector,
    }
  }

  /// Replaces the license detector.
  pub fn with_detector(mut self, detector: Box<dyn LicenseDetector>) -> Self {
    self.detector = detector;
    self
  }

  /// The version written into `@version` tags.
  pub fn version(&self) -> &str {
    &self.version
  }

  /// Produces the stamped form of `lines`.
  ///
  /// The structure is located and validated first; output is only built for
  /// a file that passes. Lines outside the license region and the comment are
  /// carried over unchanged and in order.
  ///
  /// # Parameters
  ///
  /// * `lines` - The file content, one entry per line, without terminators
  ///
  /// # Returns
  ///
  /// A [`Rewrite`] holding the stamped lines, whether the license was
  /// prepended, and what happened to the version tag.
  ///
  /// # Errors
  ///
  /// Returns a [`StructureError`] when the file has no declaration, a
  /// malformed comment, or content between the comment and the declaration.
  pub fn transform(&self, lines: &[String]) -> Result<Rewrite, StructureError> {
    let layout = locate(lines)?;
    let header_start = layout.header_start();

    let (mut comment, rest_start, synthesized) = match layout.comment {
      Some(span) => (lines[span.start..=span.end].to_vec(), span.end + 1, false),
      None => (
        SYNTHESIZED_COMMENT.iter().map(|line| (*line).to_string()).collect(),
        layout.declaration,
        true,
      ),
    };

    let normalized = self.normalize_version(&mut comment);
    let inserted = self.ensure_version(&mut comment);

    let version_action = if synthesized {
      VersionAction::Synthesized
    } else if inserted {
      VersionAction::Inserted
    } else if normalized {
      VersionAction::Normalized
    } else {
      VersionAction::Unchanged
    };

    let license_inserted = !self.detector.has_license(&lines[..header_start]);

    let mut output = Vec::with_capacity(lines.len() + comment.len() + self.license.lines().len());
    if license_inserted {
      output.extend_from_slice(self.license.lines());
    }
    output.extend_from_slice(&lines[..header_start]);
    output.extend(comment);
    output.extend_from_slice(&lines[rest_start..]);

    Ok(Rewrite {
      lines: output,
      license_inserted,
      version_action,
    })
  }

  /// Rewrites every version tag in the comment to the current version.
  ///
  /// Returns `true` if any line changed.
  fn normalize_version(&self, comment: &mut [String]) -> bool {
    let mut changed = false;
    for line in comment.iter_mut() {
      let updated = VERSION_REGEX
        .replace_all(line.as_str(), |caps: &Captures| {
          let close = caps.get(1).map_or("", |m| m.as_str());
          format!("@version {}{}", self.version, close)
        })
        .into_owned();
      if updated != *line {
        *line = updated;
        changed = true;
      }
    }
    changed
  }

  /// Adds a version tag before the closing line if the comment has none.
  ///
  /// Returns `true` if lines were inserted.
  fn ensure_version(&self, comment: &mut Vec<String>) -> bool {
    if comment.iter().any(|line| VERSION_REGEX.is_match(line)) {
      return false;
    }
    insert_before_last(comment, [" *".to_string(), format!(" * @version {}", self.version)]);
    true
  }
}

/// Inserts `new` ahead of the last element, or at the end of an empty vector.
fn insert_before_last<const N: usize>(lines: &mut Vec<String>, new: [String; N]) {
  let at = lines.len().saturating_sub(1);
  lines.splice(at..at, new);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::license::LicenseVariant;

  fn to_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
  }

  fn transformer() -> HeaderTransformer {
    HeaderTransformer::new("1.4", LicenseBlock::builtin(LicenseVariant::Epl))
  }

  fn licensed(body: &str) -> Vec<String> {
    let mut lines = LicenseBlock::builtin(LicenseVariant::Epl).lines().to_vec();
    lines.extend(to_lines(body));
    lines
  }

  #[test]
  fn test_normalizes_existing_version() {
    let input = licensed("package foo;\n\n/**\n * Foo.\n *\n * @version 1.3\n */\npublic class Foo {\n}");
    let rewrite = transformer().transform(&input).expect("should transform");

    assert!(!rewrite.license_inserted);
    assert_eq!(rewrite.version_action, VersionAction::Normalized);
    assert_eq!(rewrite.lines.len(), input.len());

    let changed: Vec<_> = input.iter().zip(&rewrite.lines).filter(|(a, b)| a != b).collect();
    assert_eq!(changed.len(), 1);
    assert_eq!(changed[0].0, " * @version 1.3");
    assert_eq!(changed[0].1, " * @version 1.4");
  }

  #[test]
  fn test_normalize_replaces_trailing_content_and_keeps_prefix() {
    let input = licensed("/**\n *@version    1.0 beta (old)\n */\nclass Foo");
    let rewrite = transformer().transform(&input).expect("should transform");
    assert!(rewrite.lines.contains(&" *@version 1.4".to_string()));
  }

  #[test]
  fn test_normalize_rewrites_every_tag() {
    let input = licensed("/**\n * @version 1.3\n * @version 9i\n */\nclass Foo");
    let rewrite = transformer().transform(&input).expect("should transform");
    let tags = rewrite.lines.iter().filter(|l| l.contains("@version")).collect::<Vec<_>>();
    assert_eq!(tags, vec![" * @version 1.4", " * @version 1.4"]);
    assert_eq!(rewrite.version_action, VersionAction::Normalized);
  }

  #[test]
  fn test_normalize_keeps_close_marker_on_tag_line() {
    let input = licensed("/**\n * Foo\n * @version 1.3 */\nclass Foo");
    let rewrite = transformer().transform(&input).expect("should transform");
    assert!(rewrite.lines.contains(&" * @version 1.4 */".to_string()));
  }

  #[test]
  fn test_current_version_is_unchanged() {
    let input = licensed("/**\n * @version 1.4\n */\nclass Foo");
    let rewrite = transformer().transform(&input).expect("should transform");
    assert_eq!(rewrite.version_action, VersionAction::Unchanged);
    assert_eq!(rewrite.lines, input);
  }

  #[test]
  fn test_inserts_version_before_closing_line() {
    let input = licensed("/**\n * Bar does things.\n * @author someone\n */\n\npublic class Bar {");
    let rewrite = transformer().transform(&input).expect("should transform");

    assert_eq!(rewrite.version_action, VersionAction::Inserted);
    assert_eq!(rewrite.lines.len(), input.len() + 2);

    let tail: Vec<&str> = rewrite.lines[rewrite.lines.len() - 7..].iter().map(String::as_str).collect();
    assert_eq!(
      tail,
      vec![
        " * Bar does things.",
        " * @author someone",
        " *",
        " * @version 1.4",
        " */",
        "",
        "public class Bar {"
      ]
    );
  }

  #[test]
  fn test_synthesizes_comment_when_missing() {
    let input = to_lines("package foo;\n\npublic class Bar {\n}");
    let rewrite = transformer().transform(&input).expect("should transform");

    assert_eq!(rewrite.version_action, VersionAction::Synthesized);
    assert!(rewrite.license_inserted);

    let tail: Vec<&str> = rewrite.lines[rewrite.lines.len() - 8..].iter().map(String::as_str).collect();
    assert_eq!(
      tail,
      vec!["package foo;", "", "/**", " *", " * @version 1.4", " */", "public class Bar {", "}"]
    );
  }

  #[test]
  fn test_prepends_license_when_phrase_missing() {
    let input = to_lines("public class Bar {\n}");
    let rewrite = transformer().transform(&input).expect("should transform");

    let license = LicenseBlock::builtin(LicenseVariant::Epl);
    assert!(rewrite.license_inserted);
    assert_eq!(&rewrite.lines[..license.lines().len()], license.lines());
    assert_eq!(
      &rewrite.lines[license.lines().len()..],
      &to_lines("/**\n *\n * @version 1.4\n */\npublic class Bar {\n}")[..]
    );
  }

  #[test]
  fn test_license_phrase_after_comment_does_not_count() {
    // Only the region before the comment is searched.
    let input = to_lines("/**\n * @version 1.4\n */\npublic class Bar {\n// Eclipse Distribution License\n}");
    let rewrite = transformer().transform(&input).expect("should transform");
    assert!(rewrite.license_inserted);
  }

  #[test]
  fn test_other_license_variant_is_not_detected() {
    let mut input = LicenseBlock::builtin(LicenseVariant::Lgpl).lines().to_vec();
    input.extend(to_lines("/**\n * @version 1.4\n */\nclass Foo"));

    let rewrite = transformer().transform(&input).expect("should transform");
    assert!(rewrite.license_inserted);
  }

  #[test]
  fn test_transform_is_idempotent() {
    let inputs = [
      "public class Bar {\n}",
      "package foo;\n\nimport java.util.List;\n\npublic interface Shape {\n}",
      "/**\n * Doc\n */\npublic class Foo {",
      "/**\n * @version 0.9\n */\n\n\npublic class Foo {",
    ];

    let transformer = transformer();
    for input in inputs {
      let once = transformer.transform(&to_lines(input)).expect("first pass");
      let twice = transformer.transform(&once.lines).expect("second pass");
      assert_eq!(once.lines, twice.lines, "not idempotent for {input:?}");
      assert!(!twice.license_inserted);
      assert_eq!(twice.version_action, VersionAction::Unchanged);
    }
  }

  #[test]
  fn test_structure_errors_propagate() {
    let err = transformer()
      .transform(&to_lines("package foo;"))
      .expect_err("should fail");
    assert_eq!(err, StructureError::MissingDeclaration);
  }

  #[test]
  fn test_custom_detector() {
    struct Always;
    impl LicenseDetector for Always {
      fn has_license(&self, _lines: &[String]) -> bool {
        true
      }
    }

    let rewrite = transformer()
      .with_detector(Box::new(Always))
      .transform(&to_lines("class Foo"))
      .expect("should transform");
    assert!(!rewrite.license_inserted);
  }

  #[test]
  fn test_insert_before_last() {
    let mut lines = vec!["a".to_string(), "z".to_string()];
    insert_before_last(&mut lines, ["b".to_string(), "c".to_string()]);
    assert_eq!(lines, vec!["a", "b", "c", "z"]);

    let mut empty: Vec<String> = Vec::new();
    insert_before_last(&mut empty, ["x".to_string()]);
    assert_eq!(empty, vec!["x"]);
  }
}
